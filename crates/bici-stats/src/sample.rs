//! Capability traits shared by all sample containers
//!
//! Region estimators and renderers accept any value implementing these
//! traits rather than a specific sample type. A 0-D sample is presented as a
//! functional sample with a single node, so the same estimator can read a
//! scalar mean or a per-node mean through one interface.

use nalgebra::{Matrix2, Vector2};
use ndarray::{Array, Array1, ArrayBase, ArrayView1, Axis, Data, RemoveAxis};

use crate::decomposition::PrincipalAxes;
use crate::error::{validation, SampleKind, SampleResult};

/// Common read-only view of a sample
pub trait StatisticalSample {
    /// Which container this is
    fn kind(&self) -> SampleKind;

    /// Number of observations, fixed at construction
    fn observation_count(&self) -> usize;

    /// Number of continuum nodes; 1 for 0-D samples
    fn node_count(&self) -> usize {
        1
    }

    /// Alias of [`StatisticalSample::observation_count`]
    fn sample_size(&self) -> usize {
        self.observation_count()
    }
}

/// Per-node univariate summaries
pub trait UnivariateStatistics: StatisticalSample {
    /// Mean at each node
    fn node_means(&self) -> ArrayView1<'_, f64>;

    /// Unbiased standard deviation at each node
    fn node_standard_deviations(&self) -> ArrayView1<'_, f64>;
}

/// Per-node bivariate summaries
pub trait BivariateStatistics: StatisticalSample {
    /// Mean 2-vector at each node
    fn component_means(&self) -> &[Vector2<f64>];

    /// Covariance matrix at each node
    fn node_covariances(&self) -> &[Matrix2<f64>];

    /// Oriented principal axes at each node
    fn node_principal_axes(&self) -> &[PrincipalAxes];

    /// Major axis unit vector at each node
    fn major_axes(&self) -> Vec<Vector2<f64>> {
        self.node_principal_axes()
            .iter()
            .map(PrincipalAxes::major_axis)
            .collect()
    }

    /// Minor axis unit vector at each node
    fn minor_axes(&self) -> Vec<Vector2<f64>> {
        self.node_principal_axes()
            .iter()
            .map(PrincipalAxes::minor_axis)
            .collect()
    }
}

/// Node coordinates: `0..node_count` when none are supplied, otherwise a copy
/// of the supplied coordinates, which must have one entry per node
pub fn node_coordinates(node_count: usize, x: Option<&[f64]>) -> SampleResult<Array1<f64>> {
    match x {
        None => Ok(Array1::from_iter((0..node_count).map(|q| q as f64))),
        Some(x) => {
            validation::validate_length("node coordinates", node_count, x.len())?;
            Ok(Array1::from(x.to_vec()))
        }
    }
}

/// `f64::min` that returns NaN when either side is NaN
pub(crate) fn nan_min(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.min(v)
    }
}

/// `f64::max` that returns NaN when either side is NaN
pub(crate) fn nan_max(acc: f64, v: f64) -> f64 {
    if acc.is_nan() || v.is_nan() {
        f64::NAN
    } else {
        acc.max(v)
    }
}

/// Minimum and maximum over the observation axis; a lane holding any NaN
/// reports NaN for both
pub(crate) fn observation_range<S, D>(
    data: &ArrayBase<S, D>,
) -> (Array<f64, D::Smaller>, Array<f64, D::Smaller>)
where
    S: Data<Elem = f64>,
    D: RemoveAxis,
{
    let min = data.fold_axis(Axis(0), f64::INFINITY, |&acc, &v| nan_min(acc, v));
    let max = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &v| nan_max(acc, v));
    (min, max)
}

/// Warn once per sample when the unbiased standard deviation is undefined
pub(crate) fn warn_single_observation(kind: SampleKind, observation_count: usize) {
    if observation_count == 1 {
        tracing::warn!(
            "{} has a single observation; standard deviation is undefined",
            kind
        );
    }
}
