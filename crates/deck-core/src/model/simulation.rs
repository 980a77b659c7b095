use super::{
    EnsembleSpec, ForceEntry, ForceFieldSocket, InitializeSpec, MotionSpec, OutputSpec,
    ParseKeywordError,
};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BuildError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// How talkative the engine should be while running this deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

impl FromStr for Verbosity {
    type Err = ParseKeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Verbosity::Low),
            "medium" => Ok(Verbosity::Medium),
            "high" => Ok(Verbosity::High),
            other => Err(ParseKeywordError::new(
                "verbosity",
                other,
                "low, medium, high",
            )),
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verbosity::Low => write!(f, "low"),
            Verbosity::Medium => write!(f, "medium"),
            Verbosity::High => write!(f, "high"),
        }
    }
}

/// The physical system block: initialization, force composition,
/// integrator and ensemble.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSpec {
    pub initialize: InitializeSpec,
    pub forces: Vec<ForceEntry>,
    pub motion: MotionSpec,
    pub ensemble: EnsembleSpec,
}

/// A complete input deck: the document root.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub verbosity: Verbosity,
    pub total_steps: usize,
    /// Seed of the engine's pseudo-random number generator; `None` lets
    /// the engine seed itself.
    pub seed: Option<u64>,
    pub forcefields: Vec<ForceFieldSocket>,
    pub output: OutputSpec,
    pub system: SystemSpec,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    /// The socket a force entry refers to, if it is declared.
    pub fn socket(&self, name: &str) -> Option<&ForceFieldSocket> {
        self.forcefields.iter().find(|ff| ff.name == name)
    }
}

/// Builds a [`Simulation`] programmatically, reporting each missing
/// required field by name.
#[derive(Default)]
pub struct SimulationBuilder {
    verbosity: Option<Verbosity>,
    total_steps: Option<usize>,
    seed: Option<u64>,
    forcefields: Vec<ForceFieldSocket>,
    output: Option<OutputSpec>,
    initialize: Option<InitializeSpec>,
    forces: Vec<ForceEntry>,
    motion: Option<MotionSpec>,
    ensemble: Option<EnsembleSpec>,
}

impl SimulationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = Some(verbosity);
        self
    }
    pub fn total_steps(mut self, steps: usize) -> Self {
        self.total_steps = Some(steps);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
    pub fn forcefield(mut self, socket: ForceFieldSocket) -> Self {
        self.forcefields.push(socket);
        self
    }
    pub fn output(mut self, output: OutputSpec) -> Self {
        self.output = Some(output);
        self
    }
    pub fn initialize(mut self, initialize: InitializeSpec) -> Self {
        self.initialize = Some(initialize);
        self
    }
    pub fn force(mut self, entry: ForceEntry) -> Self {
        self.forces.push(entry);
        self
    }
    pub fn motion(mut self, motion: MotionSpec) -> Self {
        self.motion = Some(motion);
        self
    }
    pub fn ensemble(mut self, ensemble: EnsembleSpec) -> Self {
        self.ensemble = Some(ensemble);
        self
    }

    pub fn build(self) -> Result<Simulation, BuildError> {
        Ok(Simulation {
            verbosity: self.verbosity.unwrap_or(Verbosity::Low),
            total_steps: self
                .total_steps
                .ok_or(BuildError::MissingField("total_steps"))?,
            seed: self.seed,
            forcefields: self.forcefields,
            output: self.output.ok_or(BuildError::MissingField("output"))?,
            system: SystemSpec {
                initialize: self.initialize.unwrap_or_default(),
                forces: self.forces,
                motion: self.motion.ok_or(BuildError::MissingField("motion"))?,
                ensemble: self.ensemble.ok_or(BuildError::MissingField("ensemble"))?,
            },
        })
    }
}
