//! 1-D bivariate sample
//!
//! Observations of a 2-component continuum, shape `[J, Q, 2]`. Each node `q`
//! gets its own covariance matrix and oriented principal axes, computed from
//! the `[J, 2]` slice of observations at that node.
//!
//! # Parallel Processing
//!
//! Nodes are independent. When the `parallel` feature is enabled and the node
//! count reaches [`SampleConfig::parallel_min_nodes`], the per-node
//! decomposition runs on the rayon pool. Results are identical to the serial
//! path.

use std::fmt;

use nalgebra::{Matrix2, Vector2};
use ndarray::{Array1, Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bivariate::{vector2, BivariateSample};
use crate::config::{Normalization, SampleConfig};
use crate::decomposition::{covariance, PrincipalAxes};
use crate::error::{validation, SampleError, SampleKind, SampleResult};
use crate::region::{RegionEstimator, RegionKind, RegionRequest, RegionSource};
use crate::sample::{
    node_coordinates, observation_range, warn_single_observation, BivariateStatistics,
    StatisticalSample,
};

/// A sample of 2-component continua, shape `[J, Q, 2]`
#[derive(Debug, Clone, PartialEq)]
pub struct BivariateFunctionalSample {
    data: Array3<f64>,
    config: SampleConfig,
    mean: Vec<Vector2<f64>>,
    std_dev: Array2<f64>,
    min: Array2<f64>,
    max: Array2<f64>,
    covariance: Vec<Matrix2<f64>>,
    axes: Vec<PrincipalAxes>,
}

impl BivariateFunctionalSample {
    /// Build a sample with the default configuration
    pub fn new(data: Array3<f64>) -> SampleResult<Self> {
        Self::with_config(data, &SampleConfig::default())
    }

    /// Build a sample; fails with a shape error unless the last axis has
    /// length 2 and the other axes are non-empty
    pub fn with_config(data: Array3<f64>, config: &SampleConfig) -> SampleResult<Self> {
        let kind = SampleKind::BivariateFunctional;
        validation::validate_shape(kind, data.shape())?;

        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| SampleError::shape(kind, data.shape()))?;
        let std_dev = data.std_axis(Axis(0), 1.0);
        let (min, max) = observation_range(&data);
        let (covariance, axes) = decompose_nodes(data.view(), config)?;

        let (observations, nodes) = (data.len_of(Axis(0)), data.len_of(Axis(1)));
        warn_single_observation(kind, observations);
        tracing::debug!(
            "Built bivariate functional sample: {} observations x {} nodes, {} axes flipped",
            observations,
            nodes,
            axes.iter().filter(|a| a.was_flipped()).count()
        );

        Ok(Self {
            mean: mean.rows().into_iter().map(vector2).collect(),
            data,
            config: config.clone(),
            std_dev,
            min,
            max,
            covariance,
            axes,
        })
    }

    /// Build a sample from per-observation rows of `(x, y)` node values
    pub fn from_nested(rows: &[Vec<[f64; 2]>]) -> SampleResult<Self> {
        let kind = SampleKind::BivariateFunctional;
        let nodes = validation::validate_rows(kind, rows)?;
        let flat: Vec<f64> = rows.iter().flatten().flatten().copied().collect();
        let data = Array3::from_shape_vec((rows.len(), nodes, 2), flat)
            .map_err(|_| SampleError::shape(kind, &[rows.len(), nodes, 2]))?;
        Self::new(data)
    }

    pub fn observation_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    pub fn sample_size(&self) -> usize {
        self.observation_count()
    }

    pub fn node_count(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Always 2
    pub fn component_count(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// Mean 2-vector at each node
    pub fn mean(&self) -> &[Vector2<f64>] {
        &self.mean
    }

    /// Unbiased standard deviation, shape `[Q, 2]`
    pub fn standard_deviation(&self) -> &Array2<f64> {
        &self.std_dev
    }

    /// Per-node, per-component `(min, max)`, each of shape `[Q, 2]`
    pub fn range(&self) -> (&Array2<f64>, &Array2<f64>) {
        (&self.min, &self.max)
    }

    /// Covariance at each node under the configured normalization
    pub fn covariance(&self) -> &[Matrix2<f64>] {
        &self.covariance
    }

    /// Covariance at each node recomputed under `normalization`
    pub fn covariance_with(&self, normalization: Normalization) -> Vec<Matrix2<f64>> {
        self.data
            .axis_iter(Axis(1))
            .map(|frame| covariance(frame, normalization))
            .collect()
    }

    pub fn principal_axes(&self) -> &[PrincipalAxes] {
        &self.axes
    }

    /// Major axis unit vector at each node
    pub fn major_axis(&self) -> Vec<Vector2<f64>> {
        self.major_axes()
    }

    /// Minor axis unit vector at each node
    pub fn minor_axis(&self) -> Vec<Vector2<f64>> {
        self.minor_axes()
    }

    /// Singular values at each node
    pub fn singular_values(&self) -> Vec<Vector2<f64>> {
        self.axes.iter().map(|a| *a.singular_values()).collect()
    }

    /// Node coordinates, `0..Q` unless supplied
    pub fn node_coordinates(&self, x: Option<&[f64]>) -> SampleResult<Array1<f64>> {
        node_coordinates(self.node_count(), x)
    }

    /// The observations at one node as a 0-D sample
    ///
    /// Statistics are re-derived from the raw slice with this sample's
    /// configuration, not copied from the per-node caches.
    pub fn extract_frame(&self, node: usize) -> SampleResult<BivariateSample> {
        validation::validate_node_index(node, self.node_count())?;
        BivariateSample::from_view(self.data.index_axis(Axis(1), node), &self.config)
    }

    pub fn data(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    /// Owned copy of the observations
    pub fn to_array(&self) -> Array3<f64> {
        self.data.clone()
    }

    pub fn ci2<'a, E>(&'a self, alpha: f64) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Ci2, alpha))
    }

    pub fn confidence_ellipse<'a, E>(&'a self, alpha: f64, fwhm: Option<f64>) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Confidence, alpha).with_fwhm(fwhm))
    }

    pub fn prediction_ellipse<'a, E>(&'a self, alpha: f64, fwhm: Option<f64>) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Prediction, alpha).with_fwhm(fwhm))
    }
}

/// Covariance and oriented axes for every node
fn decompose_nodes(
    data: ArrayView3<'_, f64>,
    config: &SampleConfig,
) -> SampleResult<(Vec<Matrix2<f64>>, Vec<PrincipalAxes>)> {
    let node_count = data.len_of(Axis(1));
    let decompose = |q: usize| -> SampleResult<(Matrix2<f64>, PrincipalAxes)> {
        let frame: ArrayView2<'_, f64> = data.index_axis(Axis(1), q);
        let w = covariance(frame, config.covariance);
        let axes = PrincipalAxes::decompose(&w, &config.decomposition)?;
        Ok((w, axes))
    };

    // Decompose nodes - parallel when feature enabled
    #[cfg(feature = "parallel")]
    let nodes: Vec<(Matrix2<f64>, PrincipalAxes)> = if node_count >= config.parallel_min_nodes {
        (0..node_count)
            .into_par_iter()
            .map(&decompose)
            .collect::<SampleResult<_>>()?
    } else {
        (0..node_count)
            .map(&decompose)
            .collect::<SampleResult<_>>()?
    };

    #[cfg(not(feature = "parallel"))]
    let nodes: Vec<(Matrix2<f64>, PrincipalAxes)> = (0..node_count)
        .map(&decompose)
        .collect::<SampleResult<_>>()?;

    Ok(nodes.into_iter().unzip())
}

impl TryFrom<ArrayD<f64>> for BivariateFunctionalSample {
    type Error = SampleError;

    fn try_from(data: ArrayD<f64>) -> SampleResult<Self> {
        let shape = data.shape().to_vec();
        let data = data
            .into_dimensionality::<Ix3>()
            .map_err(|_| SampleError::shape(SampleKind::BivariateFunctional, &shape))?;
        Self::new(data)
    }
}

impl StatisticalSample for BivariateFunctionalSample {
    fn kind(&self) -> SampleKind {
        SampleKind::BivariateFunctional
    }

    fn observation_count(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    fn node_count(&self) -> usize {
        self.data.len_of(Axis(1))
    }
}

impl BivariateStatistics for BivariateFunctionalSample {
    fn component_means(&self) -> &[Vector2<f64>] {
        &self.mean
    }

    fn node_covariances(&self) -> &[Matrix2<f64>] {
        &self.covariance
    }

    fn node_principal_axes(&self) -> &[PrincipalAxes] {
        &self.axes
    }
}

impl fmt::Display for BivariateFunctionalSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SampleKind::BivariateFunctional)?;
        writeln!(f, "   sample size:     {}", self.sample_size())?;
        writeln!(f, "   nnodes:          {}", self.node_count())?;
        writeln!(f, "   ncomponents:     {}", self.component_count())
    }
}
