//! 0-D bivariate sample
//!
//! Rows are observations, the two columns are the components. The covariance
//! and its oriented principal axes are computed once at construction.

use std::fmt;

use nalgebra::{Matrix2, Vector2};
use ndarray::{Array2, ArrayD, ArrayView1, ArrayView2, Axis, Ix2};

use crate::config::{Normalization, SampleConfig};
use crate::decomposition::{covariance, PrincipalAxes};
use crate::error::{validation, SampleError, SampleKind, SampleResult};
use crate::plot::{MarkerStyle, PlotTarget};
use crate::region::{RegionEstimator, RegionKind, RegionRequest, RegionSource};
use crate::sample::{
    observation_range, warn_single_observation, BivariateStatistics, StatisticalSample,
};

/// A sample of 2-component observations, shape `[J, 2]`
#[derive(Debug, Clone, PartialEq)]
pub struct BivariateSample {
    data: Array2<f64>,
    mean: Vector2<f64>,
    std_dev: Vector2<f64>,
    min: Vector2<f64>,
    max: Vector2<f64>,
    covariance: Matrix2<f64>,
    axes: PrincipalAxes,
}

impl BivariateSample {
    /// Build a sample with the default configuration
    pub fn new(data: Array2<f64>) -> SampleResult<Self> {
        Self::with_config(data, &SampleConfig::default())
    }

    /// Build a sample; fails with a shape error unless `data` has exactly two
    /// columns and at least one row
    pub fn with_config(data: Array2<f64>, config: &SampleConfig) -> SampleResult<Self> {
        let kind = SampleKind::Bivariate;
        validation::validate_shape(kind, data.shape())?;

        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| SampleError::shape(kind, data.shape()))?;
        let std_dev = data.std_axis(Axis(0), 1.0);
        let (min, max) = observation_range(&data);
        let covariance = covariance(data.view(), config.covariance);
        let axes = PrincipalAxes::decompose(&covariance, &config.decomposition)?;

        warn_single_observation(kind, data.nrows());
        tracing::debug!("Built bivariate sample with {} observations", data.nrows());

        Ok(Self {
            mean: vector2(mean.view()),
            std_dev: vector2(std_dev.view()),
            min: vector2(min.view()),
            max: vector2(max.view()),
            data,
            covariance,
            axes,
        })
    }

    /// Build a sample from a view, copying the data
    pub fn from_view(data: ArrayView2<'_, f64>, config: &SampleConfig) -> SampleResult<Self> {
        Self::with_config(data.to_owned(), config)
    }

    /// Build a sample from `(x, y)` points
    pub fn from_points(points: &[[f64; 2]]) -> SampleResult<Self> {
        let flat: Vec<f64> = points.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((points.len(), 2), flat)
            .map_err(|_| SampleError::shape(SampleKind::Bivariate, &[points.len(), 2]))?;
        Self::new(data)
    }

    pub fn observation_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn sample_size(&self) -> usize {
        self.observation_count()
    }

    /// Always 2
    pub fn component_count(&self) -> usize {
        self.data.ncols()
    }

    pub fn mean(&self) -> Vector2<f64> {
        self.mean
    }

    /// Unbiased standard deviation of each component
    pub fn standard_deviation(&self) -> Vector2<f64> {
        self.std_dev
    }

    /// Per-component `(min, max)`
    pub fn range(&self) -> (Vector2<f64>, Vector2<f64>) {
        (self.min, self.max)
    }

    /// Covariance under the configured normalization (biased by default)
    pub fn covariance(&self) -> &Matrix2<f64> {
        &self.covariance
    }

    /// Covariance recomputed from the data under `normalization`
    pub fn covariance_with(&self, normalization: Normalization) -> Matrix2<f64> {
        covariance(self.data.view(), normalization)
    }

    pub fn principal_axes(&self) -> &PrincipalAxes {
        &self.axes
    }

    /// Major axis unit vector; its second component is never negative
    pub fn major_axis(&self) -> Vector2<f64> {
        self.axes.major_axis()
    }

    /// Minor axis unit vector
    pub fn minor_axis(&self) -> Vector2<f64> {
        self.axes.minor_axis()
    }

    pub fn singular_values(&self) -> Vector2<f64> {
        *self.axes.singular_values()
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Owned copy of the observations
    pub fn to_array(&self) -> Array2<f64> {
        self.data.clone()
    }

    pub fn ci2<'a, E>(&'a self, alpha: f64) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Ci2, alpha))
    }

    pub fn confidence_ellipse<'a, E>(&'a self, alpha: f64) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Confidence, alpha))
    }

    pub fn prediction_ellipse<'a, E>(&'a self, alpha: f64) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Prediction, alpha))
    }

    /// Draw the first component against the second
    pub fn plot_scatter<T: PlotTarget + ?Sized>(&self, target: &mut T, style: &MarkerStyle) {
        let x = self.data.column(0).to_vec();
        let y = self.data.column(1).to_vec();
        target.scatter(&x, &y, style);
    }
}

pub(crate) fn vector2(values: ArrayView1<'_, f64>) -> Vector2<f64> {
    Vector2::new(values[0], values[1])
}

impl TryFrom<ArrayD<f64>> for BivariateSample {
    type Error = SampleError;

    fn try_from(data: ArrayD<f64>) -> SampleResult<Self> {
        let shape = data.shape().to_vec();
        let data = data
            .into_dimensionality::<Ix2>()
            .map_err(|_| SampleError::shape(SampleKind::Bivariate, &shape))?;
        Self::new(data)
    }
}

impl StatisticalSample for BivariateSample {
    fn kind(&self) -> SampleKind {
        SampleKind::Bivariate
    }

    fn observation_count(&self) -> usize {
        self.data.nrows()
    }
}

impl BivariateStatistics for BivariateSample {
    fn component_means(&self) -> &[Vector2<f64>] {
        std::slice::from_ref(&self.mean)
    }

    fn node_covariances(&self) -> &[Matrix2<f64>] {
        std::slice::from_ref(&self.covariance)
    }

    fn node_principal_axes(&self) -> &[PrincipalAxes] {
        std::slice::from_ref(&self.axes)
    }
}

impl fmt::Display for BivariateSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SampleKind::Bivariate)?;
        writeln!(f, "   ncomponents:     {}", self.component_count())?;
        writeln!(f, "   sample size:     {}", self.sample_size())?;
        writeln!(f, "   mean:            [{}, {}]", self.mean[0], self.mean[1])
    }
}
