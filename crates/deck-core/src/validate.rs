//! Semantic validation of a parsed deck.
//!
//! The reader guarantees the document is well-formed; the checks here are
//! the cross-record ones the external engine would otherwise fail on at
//! startup: dangling force-field references, inconsistent bead counts,
//! unknown output quantities, and physically meaningless parameters.
//! All violations are collected, not just the first.

use crate::model::{DynamicsMode, Simulation, SocketMode, VelocitySpec};
use crate::properties;
use crate::units::{Dimension, Quantity, UnitError, convert};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Violation {
    #[error("deck declares no force-field sockets")]
    NoForceFields,
    #[error("duplicate force-field socket name '{0}'")]
    DuplicateSocketName(String),
    #[error("sockets '{first}' and '{second}' claim the same endpoint")]
    DuplicateEndpoint { first: String, second: String },
    #[error("socket '{0}' has an empty address")]
    EmptyAddress(String),
    #[error("inet socket '{0}' has port 0")]
    ZeroPort(String),
    #[error("socket '{0}' has a slot count of 0")]
    ZeroSlots(String),
    #[error("socket '{socket}' has a negative {field} ({value})")]
    NegativeInterval {
        socket: String,
        field: &'static str,
        value: f64,
    },
    #[error("socket '{socket}' lists atom index {index} more than once")]
    DuplicateActiveIndex { socket: String, index: usize },
    #[error("force list is empty; nothing would drive the dynamics")]
    NoForceEntries,
    #[error("force entry refers to undeclared force field '{0}'")]
    UnknownForceField(String),
    #[error(
        "force entry '{forcefield}' contracts onto {nbeads} beads, outside 1..={system_nbeads}"
    )]
    ContractionOutOfRange {
        forcefield: String,
        nbeads: usize,
        system_nbeads: usize,
    },
    #[error("force entry '{forcefield}' has {weights} MTS weights for {levels} levels")]
    WeightCountMismatch {
        forcefield: String,
        weights: usize,
        levels: usize,
    },
    #[error("MTS schedule contains a zero sub-step count")]
    ZeroMtsSubSteps,
    #[error("timestep must be positive (got {0})")]
    NonPositiveTimestep(f64),
    #[error("{context}: {source}")]
    BadUnit {
        context: &'static str,
        source: UnitError,
    },
    #[error("nvt dynamics requires a thermostat")]
    MissingThermostat,
    #[error("nve dynamics must not carry a thermostat")]
    UnexpectedThermostat,
    #[error("thermostat relaxation time must be positive (got {0})")]
    NonPositiveTau(f64),
    #[error("{context} must be positive (got {value})")]
    NonPositiveTemperature { context: &'static str, value: f64 },
    #[error("bead count must be at least 1")]
    ZeroBeads,
    #[error("total step count must be at least 1")]
    ZeroTotalSteps,
    #[error("{emitter} emitter has stride 0")]
    ZeroStride { emitter: &'static str },
    #[error("output filename '{0}' is used by more than one emitter")]
    DuplicateOutputFile(String),
    #[error("unknown property '{0}' in properties list")]
    UnknownProperty(String),
    #[error("property '{name}' does not accept a unit annotation")]
    UnitOnUnitlessProperty { name: String },
    #[error("unknown trajectory quantity '{0}'")]
    UnknownTrajectoryQuantity(String),
}

/// A deck rejected by [`ensure_valid`].
#[derive(Debug, Error, Clone, PartialEq)]
#[error("deck failed validation with {} violation(s)", .0.len())]
pub struct InvalidDeck(pub Vec<Violation>);

/// Checks every semantic rule and returns all violations found.
pub fn validate(sim: &Simulation) -> Vec<Violation> {
    let mut violations = Vec::new();
    check_forcefields(sim, &mut violations);
    check_forces(sim, &mut violations);
    check_motion(sim, &mut violations);
    check_system(sim, &mut violations);
    check_output(sim, &mut violations);
    violations
}

/// [`validate`], folded into a `Result` for callers that only need a gate.
pub fn ensure_valid(sim: &Simulation) -> Result<(), InvalidDeck> {
    let violations = validate(sim);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(InvalidDeck(violations))
    }
}

fn check_forcefields(sim: &Simulation, violations: &mut Vec<Violation>) {
    if sim.forcefields.is_empty() {
        violations.push(Violation::NoForceFields);
    }

    let mut names = HashSet::new();
    let mut endpoints: Vec<(String, String)> = Vec::new();
    for socket in &sim.forcefields {
        if !names.insert(socket.name.as_str()) {
            violations.push(Violation::DuplicateSocketName(socket.name.clone()));
        }
        if socket.address.is_empty() {
            violations.push(Violation::EmptyAddress(socket.name.clone()));
        }
        if socket.mode == SocketMode::Inet && socket.port == 0 {
            violations.push(Violation::ZeroPort(socket.name.clone()));
        }
        if socket.slots == 0 {
            violations.push(Violation::ZeroSlots(socket.name.clone()));
        }
        for (field, value) in [("latency", socket.latency), ("timeout", socket.timeout)] {
            if value < 0.0 {
                violations.push(Violation::NegativeInterval {
                    socket: socket.name.clone(),
                    field,
                    value,
                });
            }
        }
        if let Some(active) = &socket.active {
            let mut seen = HashSet::new();
            for &index in active {
                if !seen.insert(index) {
                    violations.push(Violation::DuplicateActiveIndex {
                        socket: socket.name.clone(),
                        index,
                    });
                    break;
                }
            }
        }

        let endpoint = match socket.mode {
            SocketMode::Unix => format!("unix:{}", socket.address),
            SocketMode::Inet => format!("inet:{}:{}", socket.address, socket.port),
        };
        if let Some((first, _)) = endpoints.iter().find(|(_, e)| *e == endpoint) {
            violations.push(Violation::DuplicateEndpoint {
                first: first.clone(),
                second: socket.name.clone(),
            });
        }
        endpoints.push((socket.name.clone(), endpoint));
    }
}

fn check_forces(sim: &Simulation, violations: &mut Vec<Violation>) {
    let levels = sim.system.motion.mts_levels();
    let system_nbeads = sim.system.initialize.nbeads;

    if sim.system.forces.is_empty() {
        violations.push(Violation::NoForceEntries);
    }
    for entry in &sim.system.forces {
        if sim.socket(&entry.forcefield).is_none() {
            violations.push(Violation::UnknownForceField(entry.forcefield.clone()));
        }
        if let Some(nbeads) = entry.nbeads {
            if nbeads == 0 || nbeads > system_nbeads {
                violations.push(Violation::ContractionOutOfRange {
                    forcefield: entry.forcefield.clone(),
                    nbeads,
                    system_nbeads,
                });
            }
        }
        if !entry.weights.is_empty() && entry.weights.len() != levels {
            violations.push(Violation::WeightCountMismatch {
                forcefield: entry.forcefield.clone(),
                weights: entry.weights.len(),
                levels,
            });
        }
    }
}

fn check_motion(sim: &Simulation, violations: &mut Vec<Violation>) {
    let motion = &sim.system.motion;

    match motion.timestep.to_atomic(Dimension::Time) {
        Ok(dt) if dt <= 0.0 => violations.push(Violation::NonPositiveTimestep(dt)),
        Ok(_) => {}
        Err(source) => violations.push(Violation::BadUnit {
            context: "timestep",
            source,
        }),
    }

    if motion.nmts.contains(&0) {
        violations.push(Violation::ZeroMtsSubSteps);
    }

    match (motion.mode, &motion.thermostat) {
        (DynamicsMode::Nvt, None) => violations.push(Violation::MissingThermostat),
        (DynamicsMode::Nve, Some(_)) => violations.push(Violation::UnexpectedThermostat),
        (_, Some(thermostat)) => match thermostat.tau.to_atomic(Dimension::Time) {
            Ok(tau) if tau <= 0.0 => violations.push(Violation::NonPositiveTau(tau)),
            Ok(_) => {}
            Err(source) => violations.push(Violation::BadUnit {
                context: "thermostat tau",
                source,
            }),
        },
        (DynamicsMode::Nve, None) => {}
    }
}

fn check_system(sim: &Simulation, violations: &mut Vec<Violation>) {
    if sim.system.initialize.nbeads == 0 {
        violations.push(Violation::ZeroBeads);
    }
    if sim.total_steps == 0 {
        violations.push(Violation::ZeroTotalSteps);
    }

    check_temperature(
        "ensemble temperature",
        &sim.system.ensemble.temperature,
        violations,
    );
    if let Some(VelocitySpec::Thermal { temperature }) = &sim.system.initialize.velocities {
        check_temperature("initial velocity temperature", temperature, violations);
    }
}

fn check_temperature(
    context: &'static str,
    temperature: &Quantity,
    violations: &mut Vec<Violation>,
) {
    match temperature.to_atomic(Dimension::Temperature) {
        Ok(value) if value <= 0.0 => violations.push(Violation::NonPositiveTemperature {
            context,
            value: temperature.value,
        }),
        Ok(_) => {}
        Err(source) => violations.push(Violation::BadUnit { context, source }),
    }
}

fn check_output(sim: &Simulation, violations: &mut Vec<Violation>) {
    let output = &sim.output;
    let mut filenames = HashSet::new();

    for trajectory in &output.trajectories {
        if trajectory.stride == 0 {
            violations.push(Violation::ZeroStride {
                emitter: "trajectory",
            });
        }
        if !filenames.insert(trajectory.filename.clone()) {
            violations.push(Violation::DuplicateOutputFile(trajectory.filename.clone()));
        }
        if properties::trajectory_quantity(&trajectory.quantity).is_none() {
            violations.push(Violation::UnknownTrajectoryQuantity(
                trajectory.quantity.clone(),
            ));
        }
    }

    if let Some(props) = &output.properties {
        if props.stride == 0 {
            violations.push(Violation::ZeroStride {
                emitter: "properties",
            });
        }
        if !filenames.insert(props.filename.clone()) {
            violations.push(Violation::DuplicateOutputFile(props.filename.clone()));
        }
        for request in &props.quantities {
            match properties::property(&request.name) {
                None => violations.push(Violation::UnknownProperty(request.name.clone())),
                Some(def) => {
                    if let Some(unit) = &request.unit {
                        match def.dimension {
                            None => violations.push(Violation::UnitOnUnitlessProperty {
                                name: request.name.clone(),
                            }),
                            Some(dimension) => {
                                if let Err(source) = convert(1.0, unit, dimension) {
                                    violations.push(Violation::BadUnit {
                                        context: "property unit annotation",
                                        source,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    if let Some(checkpoint) = &output.checkpoint {
        if checkpoint.stride == 0 {
            violations.push(Violation::ZeroStride {
                emitter: "checkpoint",
            });
        }
        if !filenames.insert(checkpoint.filename.clone()) {
            violations.push(Violation::DuplicateOutputFile(checkpoint.filename.clone()));
        }
    }
}
