//! The typed data model of a simulation input deck.
//!
//! Every record here is pure data: parsed once, held immutably, and handed
//! to the external engine's configuration. No record owns any behavior of
//! the simulation itself.
//!
//! # Overview
//!
//! - [`Simulation`] — the document root, with its builder
//! - [`ForceFieldSocket`] — a force-provider connection endpoint
//! - [`OutputSpec`] — trajectory, property and checkpoint emitters
//! - [`MotionSpec`] — integrator, thermostat and MTS schedule
//! - [`ForceEntry`] — a force-list reference to a declared socket
//! - [`InitializeSpec`] — starting configuration of the ring polymer
//! - [`EnsembleSpec`] — thermodynamic targets

mod cell;
mod ensemble;
mod forcefield;
mod forces;
mod initialize;
mod motion;
mod output;
mod simulation;

pub use cell::{Cell, CellError, CellShape, abc_to_h, h_to_abc};
pub use ensemble::EnsembleSpec;
pub use forcefield::{ForceFieldSocket, SocketMode};
pub use forces::ForceEntry;
pub use initialize::{FileFormat, FileSource, InitializeSpec, VelocitySpec};
pub use motion::{DynamicsMode, MotionSpec, Thermostat, ThermostatMode};
pub use output::{
    CheckpointOutput, OutputSpec, PropertiesOutput, PropertyRequest, TrajectoryFormat,
    TrajectoryOutput,
};
pub use simulation::{BuildError, Simulation, SimulationBuilder, SystemSpec, Verbosity};

use thiserror::Error;

/// Error returned when a deck keyword does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what}: '{value}' (expected one of: {expected})")]
pub struct ParseKeywordError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseKeywordError {
    pub(crate) fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            what,
            value: value.to_string(),
            expected,
        }
    }
}
