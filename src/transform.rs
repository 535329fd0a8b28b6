use ndarray::Array1;

use crate::distance::Distances;
use crate::error::{RbfError, Result};

/// Gaussian features of both distance columns, aligned by row.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub phi1: Array1<f64>,
    pub phi2: Array1<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct GaussianKernel {
    gamma: f64,
}

impl GaussianKernel {
    /// Builds `exp(-r^2 / (2 * sigma_sq))`. Fails on zero, negative or
    /// non-finite variance.
    #[allow(clippy::float_cmp)]
    pub fn new(sigma_sq: f64) -> Result<Self> {
        if sigma_sq == 0.0 {
            return Err(RbfError::ZeroVariance);
        }
        if !sigma_sq.is_finite() || sigma_sq < 0.0 {
            return Err(RbfError::InvalidVariance(sigma_sq));
        }

        Ok(Self {
            gamma: 1.0 / (2.0 * sigma_sq),
        })
    }

    /// In `(0, 1]` mathematically, but underflows to `0.0` once
    /// `squared_distance / (2 * sigma_sq)` exceeds roughly 745.
    pub fn apply(&self, squared_distance: f64) -> f64 {
        (-self.gamma * squared_distance).exp()
    }

    pub fn transform(&self, distances: &Distances) -> Features {
        Features {
            phi1: distances.r1_sq.mapv(|r| self.apply(r)),
            phi2: distances.r2_sq.mapv(|r| self.apply(r)),
        }
    }
}

pub fn rbf_features(distances: &Distances, sigma_sq: f64) -> Result<Features> {
    Ok(GaussianKernel::new(sigma_sq)?.transform(distances))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_reference_point() {
        let distances = Distances {
            r1_sq: array![2.0],
            r2_sq: array![2.0],
        };
        let features = rbf_features(&distances, 2.0).unwrap();

        assert_abs_diff_eq!(features.phi1[0], (-0.5f64).exp(), epsilon = 1e-12);
        assert_abs_diff_eq!(features.phi2[0], 0.6065, epsilon = 1e-4);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_zero_distance_is_one() {
        let kernel = GaussianKernel::new(0.3).unwrap();

        assert_eq!(kernel.apply(0.0), 1.0);
        assert!(kernel.apply(1e-9) < 1.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_far_points_underflow_to_zero() {
        let kernel = GaussianKernel::new(0.001).unwrap();

        assert_eq!(kernel.apply(2_000_000.0), 0.0);
        assert!(kernel.apply(1.0) > 0.0);
    }

    #[test]
    fn test_rejects_zero_variance() {
        let distances = Distances {
            r1_sq: array![0.0, 1.0],
            r2_sq: array![4.0, 1.0],
        };

        assert!(matches!(
            rbf_features(&distances, 0.0),
            Err(RbfError::ZeroVariance)
        ));
        assert!(matches!(
            rbf_features(&distances, -0.0),
            Err(RbfError::ZeroVariance)
        ));
    }

    #[test]
    fn test_rejects_negative_and_non_finite_variance() {
        for sigma_sq in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GaussianKernel::new(sigma_sq),
                Err(RbfError::InvalidVariance(_))
            ));
        }
    }
}
