use nalgebra::Matrix3;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellError {
    #[error("cell edge lengths must be positive (got {0})")]
    NonPositiveLength(f64),
    #[error("cell angles must lie strictly between 0 and 180 degrees (got {0})")]
    BadAngle(f64),
    #[error("cell angles describe a degenerate cell")]
    DegenerateAngles,
    #[error("cell matrix must be upper triangular with a positive diagonal")]
    BadMatrix,
}

/// The three conventions a deck may use to state the cell geometry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellShape {
    /// Orthorhombic cell given by its three edge lengths (`mode="abc"`).
    Lengths([f64; 3]),
    /// Triclinic cell given by edge lengths and the angles between them in
    /// degrees (`mode="abcABC"`).
    LengthsAngles {
        lengths: [f64; 3],
        angles_deg: [f64; 3],
    },
    /// The full upper-triangular cell matrix, columns holding the lattice
    /// vectors (`mode="h"`).
    Matrix(Matrix3<f64>),
}

/// Cell geometry together with the length unit its numbers were declared in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub shape: CellShape,
    pub units: Option<String>,
}

impl Cell {
    /// The upper-triangular cell matrix, in the declared length unit.
    pub fn matrix(&self) -> Result<Matrix3<f64>, CellError> {
        match &self.shape {
            CellShape::Lengths(abc) => abc_to_h(*abc, [90.0, 90.0, 90.0]),
            CellShape::LengthsAngles {
                lengths,
                angles_deg,
            } => abc_to_h(*lengths, *angles_deg),
            CellShape::Matrix(h) => {
                check_matrix_shape(h)?;
                Ok(*h)
            }
        }
    }

    /// Cell volume in the cube of the declared length unit.
    pub fn volume(&self) -> Result<f64, CellError> {
        let h = self.matrix()?;
        Ok(h[(0, 0)] * h[(1, 1)] * h[(2, 2)])
    }
}

fn check_matrix_shape(h: &Matrix3<f64>) -> Result<(), CellError> {
    let lower_zero = h[(1, 0)] == 0.0 && h[(2, 0)] == 0.0 && h[(2, 1)] == 0.0;
    let diag_positive = h[(0, 0)] > 0.0 && h[(1, 1)] > 0.0 && h[(2, 2)] > 0.0;
    if lower_zero && diag_positive {
        Ok(())
    } else {
        Err(CellError::BadMatrix)
    }
}

/// Builds the upper-triangular cell matrix from edge lengths and angles in
/// degrees, with the first lattice vector along x.
pub fn abc_to_h(lengths: [f64; 3], angles_deg: [f64; 3]) -> Result<Matrix3<f64>, CellError> {
    let [a, b, c] = lengths;
    for length in lengths {
        if length <= 0.0 {
            return Err(CellError::NonPositiveLength(length));
        }
    }
    for angle in angles_deg {
        if angle <= 0.0 || angle >= 180.0 {
            return Err(CellError::BadAngle(angle));
        }
    }
    let [alpha, beta, gamma] = angles_deg.map(f64::to_radians);

    let h01 = b * gamma.cos();
    let h02 = c * beta.cos();
    let h11 = b * gamma.sin();
    let h12 = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let h22_sq = c * c - h02 * h02 - h12 * h12;
    if h22_sq <= 0.0 {
        return Err(CellError::DegenerateAngles);
    }

    Ok(Matrix3::new(
        a,
        h01,
        h02,
        0.0,
        h11,
        h12,
        0.0,
        0.0,
        h22_sq.sqrt(),
    ))
}

/// Recovers edge lengths and angles in degrees from an upper-triangular
/// cell matrix. Inverse of [`abc_to_h`].
pub fn h_to_abc(h: &Matrix3<f64>) -> Result<([f64; 3], [f64; 3]), CellError> {
    check_matrix_shape(h)?;
    let a = h[(0, 0)];
    let b = (h[(0, 1)].powi(2) + h[(1, 1)].powi(2)).sqrt();
    let c = (h[(0, 2)].powi(2) + h[(1, 2)].powi(2) + h[(2, 2)].powi(2)).sqrt();
    let gamma = (h[(0, 1)] / b).acos().to_degrees();
    let beta = (h[(0, 2)] / c).acos().to_degrees();
    let alpha = ((h[(0, 1)] * h[(0, 2)] + h[(1, 1)] * h[(1, 2)]) / (b * c))
        .acos()
        .to_degrees();
    Ok(([a, b, c], [alpha, beta, gamma]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthorhombic_lengths_give_diagonal_matrix() {
        let cell = Cell {
            shape: CellShape::Lengths([10.0, 12.0, 14.0]),
            units: Some("angstrom".to_string()),
        };
        let h = cell.matrix().unwrap();
        assert_eq!(h[(0, 0)], 10.0);
        assert_eq!(h[(1, 1)], 12.0);
        assert_eq!(h[(2, 2)], 14.0);
        assert_eq!(h[(0, 1)], 0.0);
        assert!((cell.volume().unwrap() - 1680.0).abs() < 1e-9);
    }

    #[test]
    fn abc_to_h_round_trips_through_h_to_abc() {
        let lengths = [8.0, 9.0, 10.0];
        let angles = [80.0, 95.0, 104.0];
        let h = abc_to_h(lengths, angles).unwrap();
        let (lengths_back, angles_back) = h_to_abc(&h).unwrap();
        for i in 0..3 {
            assert!((lengths[i] - lengths_back[i]).abs() < 1e-9);
            assert!((angles[i] - angles_back[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn abc_to_h_rejects_non_positive_lengths() {
        assert_eq!(
            abc_to_h([0.0, 1.0, 1.0], [90.0, 90.0, 90.0]),
            Err(CellError::NonPositiveLength(0.0))
        );
    }

    #[test]
    fn abc_to_h_rejects_out_of_range_angles() {
        assert_eq!(
            abc_to_h([1.0, 1.0, 1.0], [90.0, 180.0, 90.0]),
            Err(CellError::BadAngle(180.0))
        );
    }

    #[test]
    fn abc_to_h_rejects_degenerate_angle_combinations() {
        // alpha larger than beta + gamma cannot close into a cell.
        let result = abc_to_h([1.0, 1.0, 1.0], [170.0, 60.0, 60.0]);
        assert_eq!(result, Err(CellError::DegenerateAngles));
    }

    #[test]
    fn h_to_abc_rejects_matrices_it_cannot_invert() {
        let mut lower = Matrix3::identity();
        lower[(1, 0)] = 0.5;
        assert_eq!(h_to_abc(&lower), Err(CellError::BadMatrix));

        let mut flat = Matrix3::identity();
        flat[(1, 1)] = 0.0;
        assert_eq!(h_to_abc(&flat), Err(CellError::BadMatrix));
    }

    #[test]
    fn matrix_shape_rejects_lower_triangular_entries() {
        let mut h = Matrix3::identity();
        h[(1, 0)] = 0.5;
        let cell = Cell {
            shape: CellShape::Matrix(h),
            units: None,
        };
        assert_eq!(cell.matrix(), Err(CellError::BadMatrix));
    }
}
