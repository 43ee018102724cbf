//! Covariance estimation and principal-axis decomposition
//!
//! Each bivariate sample reduces to one or more 2x2 covariance matrices.
//! A covariance matrix is symmetric positive-semi-definite, so its SVD
//! `W = U S R` coincides with its eigendecomposition: `S` holds the
//! eigenvalues in descending order and the columns of `U` are the major and
//! minor unit axes.
//!
//! # Orientation
//!
//! SVD signs are arbitrary. Every decomposition is normalized so that the
//! major axis has a non-negative second component; when it does not, both
//! `U` and `R` are negated in full. Applying this independently at every
//! continuum node keeps ellipses drawn at adjacent nodes from flipping.

use nalgebra::{Matrix2, Vector2};
use ndarray::{ArrayView2, Axis};

use crate::config::{DecompositionConfig, Normalization};
use crate::error::{SampleError, SampleResult};

/// 2x2 covariance of an `[observations, 2]` view
///
/// The off-diagonal entry is computed once, so the result is exactly
/// symmetric.
pub fn covariance(points: ArrayView2<'_, f64>, normalization: Normalization) -> Matrix2<f64> {
    let n = points.len_of(Axis(0));
    let (x, y) = (points.column(0), points.column(1));
    let mean_x = x.sum() / n as f64;
    let mean_y = y.sum() / n as f64;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let divisor = normalization.divisor(n);
    let cxy = sxy / divisor;
    Matrix2::new(sxx / divisor, cxy, cxy, syy / divisor)
}

/// Oriented SVD of a 2x2 covariance matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes {
    /// Left singular vectors; columns are the major and minor axes
    u: Matrix2<f64>,
    /// Singular values, descending
    singular_values: Vector2<f64>,
    /// Right singular factor (`V^T`)
    rotation: Matrix2<f64>,
    /// Whether orientation correction negated the raw factors
    flipped: bool,
}

impl PrincipalAxes {
    /// Decompose a covariance matrix
    ///
    /// A non-finite matrix is not handed to the SVD routine; its axes and
    /// singular values come back as NaN.
    pub fn decompose(covariance: &Matrix2<f64>, config: &DecompositionConfig) -> SampleResult<Self> {
        if covariance.iter().any(|v| !v.is_finite()) {
            tracing::warn!(
                "Covariance matrix is not finite, principal axes are undefined: [{}, {}; {}, {}]",
                covariance[(0, 0)],
                covariance[(0, 1)],
                covariance[(1, 0)],
                covariance[(1, 1)]
            );
            return Ok(Self::undefined());
        }

        let svd = covariance
            .clone_owned()
            .try_svd(true, true, config.epsilon, config.max_iterations)
            .ok_or_else(|| SampleError::Decomposition {
                message: format!(
                    "SVD did not converge within {} iterations",
                    config.max_iterations
                ),
            })?;

        match (svd.u, svd.v_t) {
            (Some(u), Some(v_t)) => Ok(Self::from_factors(u, svd.singular_values, v_t)),
            _ => Err(SampleError::Decomposition {
                message: "SVD did not produce singular vectors".to_string(),
            }),
        }
    }

    /// Build from raw SVD factors, ordering singular values descending and
    /// applying the orientation convention
    pub fn from_factors(
        mut u: Matrix2<f64>,
        mut singular_values: Vector2<f64>,
        mut rotation: Matrix2<f64>,
    ) -> Self {
        if singular_values[1] > singular_values[0] {
            singular_values.swap_rows(0, 1);
            u.swap_columns(0, 1);
            rotation.swap_rows(0, 1);
        }

        let flipped = u.column(0).dot(&Vector2::y()) < 0.0;
        if flipped {
            tracing::trace!(
                "Flipping principal axes: major axis ({}, {})",
                u[(0, 0)],
                u[(1, 0)]
            );
            u = -u;
            rotation = -rotation;
        }

        Self {
            u,
            singular_values,
            rotation,
            flipped,
        }
    }

    fn undefined() -> Self {
        Self {
            u: Matrix2::from_element(f64::NAN),
            singular_values: Vector2::from_element(f64::NAN),
            rotation: Matrix2::from_element(f64::NAN),
            flipped: false,
        }
    }

    /// Major axis unit vector, `U[:, 0]`
    pub fn major_axis(&self) -> Vector2<f64> {
        self.u.column(0).into_owned()
    }

    /// Minor axis unit vector, `U[:, 1]`
    pub fn minor_axis(&self) -> Vector2<f64> {
        self.u.column(1).into_owned()
    }

    /// Left singular vectors
    pub fn u(&self) -> &Matrix2<f64> {
        &self.u
    }

    /// Singular values (eigenvalues), descending
    pub fn singular_values(&self) -> &Vector2<f64> {
        &self.singular_values
    }

    /// Right singular factor `R`
    pub fn rotation(&self) -> &Matrix2<f64> {
        &self.rotation
    }

    /// Whether the raw decomposition was negated to satisfy the orientation
    /// convention
    pub fn was_flipped(&self) -> bool {
        self.flipped
    }

    /// Angle of the major axis from the first component axis, in radians
    pub fn angle(&self) -> f64 {
        self.u[(1, 0)].atan2(self.u[(0, 0)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_covariance_biased() {
        let points = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let w = covariance(points.view(), Normalization::Biased);

        assert_relative_eq!(w[(0, 0)], 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(w[(0, 1)], 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(w[(1, 1)], 8.0 / 3.0, epsilon = 1e-12);
        assert_eq!(w[(0, 1)], w[(1, 0)]);
    }

    #[test]
    fn test_covariance_unbiased() {
        let points = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let w = covariance(points.view(), Normalization::Unbiased);
        assert_relative_eq!(w[(0, 0)], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_decompose_collinear() {
        let w = Matrix2::new(1.0, 1.0, 1.0, 1.0);
        let axes = PrincipalAxes::decompose(&w, &DecompositionConfig::default()).unwrap();

        let half = std::f64::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(axes.major_axis()[0], half, epsilon = 1e-10);
        assert_relative_eq!(axes.major_axis()[1], half, epsilon = 1e-10);
        assert_relative_eq!(axes.singular_values()[0], 2.0, epsilon = 1e-10);
        assert!(axes.singular_values()[1].abs() < 1e-10);
    }

    #[test]
    fn test_from_factors_flips_negative_major_axis() {
        let half = std::f64::consts::FRAC_1_SQRT_2;
        // Major axis (half, -half) points below the first component axis.
        let u = Matrix2::new(half, half, -half, half);
        let r = u.transpose();
        let axes = PrincipalAxes::from_factors(u, Vector2::new(3.0, 1.0), r);

        assert!(axes.was_flipped());
        assert!(axes.major_axis()[1] >= 0.0);
        assert_eq!(*axes.u(), -u);
        assert_eq!(*axes.rotation(), -r);
    }

    #[test]
    fn test_from_factors_orders_singular_values() {
        let u = Matrix2::identity();
        let axes = PrincipalAxes::from_factors(u, Vector2::new(1.0, 4.0), u);

        assert_eq!(*axes.singular_values(), Vector2::new(4.0, 1.0));
        assert_eq!(axes.major_axis(), Vector2::new(0.0, 1.0));
        assert_eq!(axes.minor_axis(), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_decompose_non_finite() {
        let w = Matrix2::new(f64::NAN, 0.0, 0.0, 1.0);
        let axes = PrincipalAxes::decompose(&w, &DecompositionConfig::default()).unwrap();
        assert!(axes.major_axis()[0].is_nan());
        assert!(axes.singular_values()[0].is_nan());
    }

    #[test]
    fn test_decompose_without_iteration_bound() {
        let w = Matrix2::new(3.0, 1.0, 1.0, 2.0);
        let unbounded = DecompositionConfig {
            max_iterations: 0,
            ..DecompositionConfig::default()
        };
        let axes = PrincipalAxes::decompose(&w, &unbounded).unwrap();
        let reference = PrincipalAxes::decompose(&w, &DecompositionConfig::default()).unwrap();
        for i in 0..2 {
            assert_relative_eq!(
                axes.singular_values()[i],
                reference.singular_values()[i],
                epsilon = 1e-12
            );
            assert_relative_eq!(axes.major_axis()[i], reference.major_axis()[i], epsilon = 1e-12);
        }
        assert!(axes.major_axis()[1] >= 0.0);
    }

    #[test]
    fn test_decompose_reconstructs_covariance() {
        let w = Matrix2::new(2.0, -0.5, -0.5, 1.0);
        let axes = PrincipalAxes::decompose(&w, &DecompositionConfig::default()).unwrap();
        let s = Matrix2::from_diagonal(axes.singular_values());
        let rebuilt = axes.u() * s * axes.rotation();

        for (a, b) in rebuilt.iter().zip(w.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_angle() {
        let w = Matrix2::new(1.0, 0.0, 0.0, 4.0);
        let axes = PrincipalAxes::decompose(&w, &DecompositionConfig::default()).unwrap();
        assert_relative_eq!(axes.angle(), std::f64::consts::FRAC_PI_2, epsilon = 1e-10);
    }
}
