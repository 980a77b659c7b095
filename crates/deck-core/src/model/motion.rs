use super::ParseKeywordError;
use crate::units::Quantity;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Integration ensemble of the equations of motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DynamicsMode {
    /// Constant-energy Hamiltonian dynamics.
    Nve,
    /// Constant-temperature dynamics; requires a thermostat.
    Nvt,
}

impl FromStr for DynamicsMode {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nve" => Ok(DynamicsMode::Nve),
            "nvt" => Ok(DynamicsMode::Nvt),
            other => Err(ParseKeywordError::new("dynamics mode", other, "nve, nvt")),
        }
    }
}

impl fmt::Display for DynamicsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicsMode::Nve => write!(f, "nve"),
            DynamicsMode::Nvt => write!(f, "nvt"),
        }
    }
}

/// Stochastic thermostatting scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThermostatMode {
    /// Path-integral Langevin equation, local in normal-mode space.
    PileL,
    /// Path-integral Langevin equation with global centroid rescaling.
    PileG,
    /// Plain white-noise Langevin on every degree of freedom.
    Langevin,
    /// Stochastic velocity rescaling.
    Svr,
}

impl FromStr for ThermostatMode {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pile_l" => Ok(ThermostatMode::PileL),
            "pile_g" => Ok(ThermostatMode::PileG),
            "langevin" => Ok(ThermostatMode::Langevin),
            "svr" => Ok(ThermostatMode::Svr),
            other => Err(ParseKeywordError::new(
                "thermostat mode",
                other,
                "pile_l, pile_g, langevin, svr",
            )),
        }
    }
}

impl fmt::Display for ThermostatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThermostatMode::PileL => write!(f, "pile_l"),
            ThermostatMode::PileG => write!(f, "pile_g"),
            ThermostatMode::Langevin => write!(f, "langevin"),
            ThermostatMode::Svr => write!(f, "svr"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Thermostat {
    pub mode: ThermostatMode,
    /// Relaxation time of the coupling.
    pub tau: Quantity,
}

/// Integrator settings: algorithm mode, timestep, thermostat and the
/// multiple-time-stepping schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionSpec {
    pub mode: DynamicsMode,
    pub timestep: Quantity,
    pub thermostat: Option<Thermostat>,
    /// Number of integration sub-steps at each MTS level, outermost first.
    /// `[1]` means plain single-level integration.
    pub nmts: Vec<usize>,
}

impl MotionSpec {
    /// Number of MTS levels; force-entry weight vectors must match it.
    pub fn mts_levels(&self) -> usize {
        self.nmts.len()
    }
}
