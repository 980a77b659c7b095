use crate::units::Quantity;
use serde::Serialize;

/// Thermodynamic targets of the run. Only the canonical target
/// temperature is parametrized here; the pressure of constant-pressure
/// ensembles is not part of this dialect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsembleSpec {
    pub temperature: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Dimension;

    #[test]
    fn target_temperature_converts_to_atomic_units() {
        let ensemble = EnsembleSpec {
            temperature: Quantity::new(300.0, "kelvin"),
        };
        let atomic = ensemble.temperature.to_atomic(Dimension::Temperature).unwrap();
        assert!(atomic > 0.0);
        assert!(atomic < 1e-2);
    }
}
