//! Physical units accepted by the deck dialect.
//!
//! The external engine works internally in Hartree atomic units. Every unit
//! name a deck may declare is listed here together with its dimension and
//! its conversion factor to atomic units. The special name `atomic_unit`
//! is accepted for any dimension with a factor of one.

use phf::phf_map;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The physical dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Time,
    Length,
    Energy,
    Temperature,
    Mass,
    Pressure,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Time => "time",
            Dimension::Length => "length",
            Dimension::Energy => "energy",
            Dimension::Temperature => "temperature",
            Dimension::Mass => "mass",
            Dimension::Pressure => "pressure",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitError {
    #[error("unknown unit name: '{0}'")]
    Unknown(String),
    #[error("unit '{unit}' measures {actual}, expected {expected}")]
    DimensionMismatch {
        unit: String,
        actual: Dimension,
        expected: Dimension,
    },
}

/// A named unit with its conversion factor to atomic units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitDef {
    pub name: &'static str,
    pub dimension: Dimension,
    pub to_atomic: f64,
}

static UNITS: phf::Map<&'static str, UnitDef> = phf_map! {
    "second" => UnitDef { name: "second", dimension: Dimension::Time, to_atomic: 4.1341373e16 },
    "picosecond" => UnitDef { name: "picosecond", dimension: Dimension::Time, to_atomic: 41341.373 },
    "femtosecond" => UnitDef { name: "femtosecond", dimension: Dimension::Time, to_atomic: 41.341373 },
    "angstrom" => UnitDef { name: "angstrom", dimension: Dimension::Length, to_atomic: 1.8897261 },
    "nanometer" => UnitDef { name: "nanometer", dimension: Dimension::Length, to_atomic: 18.897261 },
    "electronvolt" => UnitDef { name: "electronvolt", dimension: Dimension::Energy, to_atomic: 0.036749326 },
    "kelvin" => UnitDef { name: "kelvin", dimension: Dimension::Temperature, to_atomic: 3.1668152e-6 },
    "dalton" => UnitDef { name: "dalton", dimension: Dimension::Mass, to_atomic: 1822.8885 },
    "pascal" => UnitDef { name: "pascal", dimension: Dimension::Pressure, to_atomic: 3.3988278e-14 },
    "bar" => UnitDef { name: "bar", dimension: Dimension::Pressure, to_atomic: 3.3988278e-9 },
    "atmosphere" => UnitDef { name: "atmosphere", dimension: Dimension::Pressure, to_atomic: 3.4438619e-9 },
};

/// Looks up a unit definition by name. `atomic_unit` is not listed here
/// because it belongs to every dimension; use [`convert`] instead when the
/// expected dimension is known.
pub fn lookup(name: &str) -> Option<&'static UnitDef> {
    UNITS.get(name)
}

/// Converts `value` declared in unit `name` to atomic units, checking that
/// the unit measures the `expected` dimension.
pub fn convert(value: f64, name: &str, expected: Dimension) -> Result<f64, UnitError> {
    if name == "atomic_unit" {
        return Ok(value);
    }
    let unit = UNITS
        .get(name)
        .ok_or_else(|| UnitError::Unknown(name.to_string()))?;
    if unit.dimension != expected {
        return Err(UnitError::DimensionMismatch {
            unit: name.to_string(),
            actual: unit.dimension,
            expected,
        });
    }
    Ok(value * unit.to_atomic)
}

/// A scalar deck value together with the unit it was declared in.
///
/// Values with no declared unit are taken to already be in atomic units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: Option<String>,
}

impl Quantity {
    pub fn atomic(value: f64) -> Self {
        Self { value, unit: None }
    }

    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: Some(unit.into()),
        }
    }

    /// The value in atomic units, checked against the expected dimension.
    pub fn to_atomic(&self, expected: Dimension) -> Result<f64, UnitError> {
        match &self.unit {
            None => Ok(self.value),
            Some(name) => convert(self.value, name, expected),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.unit {
            Some(unit) => write!(f, "{} {}", self.value, unit),
            None => write!(f, "{} atomic_unit", self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_scales_femtoseconds_to_atomic_time() {
        let dt = convert(0.5, "femtosecond", Dimension::Time).unwrap();
        assert!((dt - 20.6706865).abs() < 1e-6);
    }

    #[test]
    fn convert_accepts_atomic_unit_for_any_dimension() {
        assert_eq!(convert(2.0, "atomic_unit", Dimension::Time).unwrap(), 2.0);
        assert_eq!(
            convert(2.0, "atomic_unit", Dimension::Pressure).unwrap(),
            2.0
        );
    }

    #[test]
    fn convert_rejects_unknown_unit_names() {
        let result = convert(1.0, "parsec", Dimension::Length);
        assert_eq!(result, Err(UnitError::Unknown("parsec".to_string())));
    }

    #[test]
    fn convert_rejects_dimension_mismatch() {
        let result = convert(300.0, "kelvin", Dimension::Time);
        assert!(matches!(
            result,
            Err(UnitError::DimensionMismatch {
                actual: Dimension::Temperature,
                expected: Dimension::Time,
                ..
            })
        ));
    }

    #[test]
    fn quantity_without_unit_is_already_atomic() {
        let q = Quantity::atomic(3.5);
        assert_eq!(q.to_atomic(Dimension::Energy).unwrap(), 3.5);
    }

    #[test]
    fn quantity_converts_kelvin_to_atomic_temperature() {
        let temp = Quantity::new(300.0, "kelvin");
        let atomic = temp.to_atomic(Dimension::Temperature).unwrap();
        assert!((atomic - 9.5004456e-4).abs() < 1e-9);
    }

    #[test]
    fn lookup_finds_listed_units() {
        let unit = lookup("angstrom").unwrap();
        assert_eq!(unit.dimension, Dimension::Length);
        assert!((unit.to_atomic - 1.8897261).abs() < 1e-7);
        assert!(lookup("atomic_unit").is_none());
    }
}
