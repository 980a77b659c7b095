//! Registry of the output quantities the engine can record.
//!
//! The scalar properties mirror the engine's property dictionary exactly;
//! a deck requesting a name outside this table would be rejected by the
//! engine at startup, so validation rejects it here first. Each entry
//! carries the dimension of the quantity, used to check a requested output
//! unit (`temperature{kelvin}`) against what the column measures.

use crate::units::Dimension;
use phf::phf_map;

/// A scalar property the properties emitter can record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDef {
    pub name: &'static str,
    /// `None` for composite columns (such as the cell parameters) that do
    /// not accept a unit annotation.
    pub dimension: Option<Dimension>,
    pub about: &'static str,
}

static PROPERTIES: phf::Map<&'static str, PropertyDef> = phf_map! {
    "time" => PropertyDef {
        name: "time",
        dimension: Some(Dimension::Time),
        about: "elapsed simulation time",
    },
    "conserved" => PropertyDef {
        name: "conserved",
        dimension: Some(Dimension::Energy),
        about: "conserved quantity of the dynamics",
    },
    "kinetic_md" => PropertyDef {
        name: "kinetic_md",
        dimension: Some(Dimension::Energy),
        about: "classical kinetic energy estimator",
    },
    "potential" => PropertyDef {
        name: "potential",
        dimension: Some(Dimension::Energy),
        about: "potential energy estimator",
    },
    "temperature" => PropertyDef {
        name: "temperature",
        dimension: Some(Dimension::Temperature),
        about: "classical kinetic temperature estimator",
    },
    "cell_parameters" => PropertyDef {
        name: "cell_parameters",
        dimension: None,
        about: "cell edge lengths and the angles between them",
    },
    "V" => PropertyDef {
        name: "V",
        dimension: None,
        about: "cell volume",
    },
    "stress_md.xx" => PropertyDef {
        name: "stress_md.xx",
        dimension: Some(Dimension::Pressure),
        about: "xx component of the classical stress tensor estimator",
    },
    "pressure_md" => PropertyDef {
        name: "pressure_md",
        dimension: Some(Dimension::Pressure),
        about: "classical pressure estimator",
    },
    "kinetic_cv" => PropertyDef {
        name: "kinetic_cv",
        dimension: Some(Dimension::Energy),
        about: "quantum centroid-virial kinetic energy estimator",
    },
    "stress_cv.xx" => PropertyDef {
        name: "stress_cv.xx",
        dimension: Some(Dimension::Pressure),
        about: "xx component of the centroid-virial stress tensor estimator",
    },
    "pressure_cv" => PropertyDef {
        name: "pressure_cv",
        dimension: Some(Dimension::Pressure),
        about: "centroid-virial pressure estimator",
    },
    "kinetic_yamamoto" => PropertyDef {
        name: "kinetic_yamamoto",
        dimension: Some(Dimension::Energy),
        about: "displaced-path quantum kinetic energy estimator",
    },
};

static TRAJECTORIES: phf::Map<&'static str, &'static str> = phf_map! {
    "positions" => "bead Cartesian coordinates",
    "velocities" => "bead Cartesian velocities",
    "forces" => "forces acting on each bead",
    "momenta" => "bead momenta",
};

/// Looks up a scalar property by name.
pub fn property(name: &str) -> Option<&'static PropertyDef> {
    PROPERTIES.get(name)
}

/// Describes a per-atom trajectory quantity, if the name is known.
pub fn trajectory_quantity(name: &str) -> Option<&'static str> {
    TRAJECTORIES.get(name).copied()
}

/// Names of every scalar property, in no particular order.
pub fn property_names() -> impl Iterator<Item = &'static str> {
    PROPERTIES.keys().copied()
}
