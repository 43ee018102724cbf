//! 0-D univariate sample

use std::fmt;

use ndarray::{Array1, ArrayD, ArrayView1, Ix1};

use crate::error::{validation, SampleError, SampleKind, SampleResult};
use crate::plot::{Color, MarkerStyle, PlotOptions, PlotTarget};
use crate::region::{RegionEstimator, RegionKind, RegionRequest, RegionSource};
use crate::sample::{
    nan_max, nan_min, warn_single_observation, StatisticalSample, UnivariateStatistics,
};

/// A sample of scalar observations, shape `[J]`
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarSample {
    data: Array1<f64>,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl ScalarSample {
    /// Build a sample; fails with a shape error if `data` is empty
    pub fn new(data: Array1<f64>) -> SampleResult<Self> {
        let kind = SampleKind::Scalar;
        validation::validate_shape(kind, data.shape())?;

        let mean = data
            .mean()
            .ok_or_else(|| SampleError::shape(kind, data.shape()))?;
        let std_dev = data.std(1.0);
        let min = data.fold(f64::INFINITY, |acc, &v| nan_min(acc, v));
        let max = data.fold(f64::NEG_INFINITY, |acc, &v| nan_max(acc, v));

        warn_single_observation(kind, data.len());
        tracing::debug!("Built scalar sample with {} observations", data.len());

        Ok(Self {
            data,
            mean,
            std_dev,
            min,
            max,
        })
    }

    /// Build a sample from a slice of observations
    pub fn from_slice(values: &[f64]) -> SampleResult<Self> {
        Self::new(Array1::from(values.to_vec()))
    }

    pub fn observation_count(&self) -> usize {
        self.data.len()
    }

    pub fn sample_size(&self) -> usize {
        self.observation_count()
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased (`N - 1`) standard deviation; NaN for a single observation
    pub fn standard_deviation(&self) -> f64 {
        self.std_dev
    }

    /// `(min, max)`
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn data(&self) -> ArrayView1<'_, f64> {
        self.data.view()
    }

    /// Owned copy of the observations
    pub fn to_array(&self) -> Array1<f64> {
        self.data.clone()
    }

    pub fn confidence_region<'a, E>(&'a self, alpha: f64) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Confidence, alpha))
    }

    pub fn prediction_region<'a, E>(&'a self, alpha: f64) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        self.region(RegionRequest::new(RegionKind::Prediction, alpha))
    }

    /// Draw the observations as a column of markers at abscissa `x`
    /// (default 0), optionally with the mean as a large open marker
    pub fn plot<T: PlotTarget + ?Sized>(&self, target: &mut T, x: Option<f64>, options: PlotOptions) {
        let x = x.unwrap_or(0.0);
        let xs = vec![x; self.data.len()];
        let ys = self.data.to_vec();
        let observations = MarkerStyle::default()
            .with_face_color(Color::Gray(0.3))
            .with_label("Observations");
        target.scatter(&xs, &ys, &observations);

        if options.plot_sample_mean {
            let mean = MarkerStyle::default()
                .with_face_color(Color::WHITE)
                .with_size(15.0)
                .with_label("Sample mean");
            target.scatter(&[x], &[self.mean], &mean);
        }
    }
}

impl TryFrom<ArrayD<f64>> for ScalarSample {
    type Error = SampleError;

    fn try_from(data: ArrayD<f64>) -> SampleResult<Self> {
        let shape = data.shape().to_vec();
        let data = data
            .into_dimensionality::<Ix1>()
            .map_err(|_| SampleError::shape(SampleKind::Scalar, &shape))?;
        Self::new(data)
    }
}

impl StatisticalSample for ScalarSample {
    fn kind(&self) -> SampleKind {
        SampleKind::Scalar
    }

    fn observation_count(&self) -> usize {
        self.data.len()
    }
}

impl UnivariateStatistics for ScalarSample {
    fn node_means(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(std::slice::from_ref(&self.mean))
    }

    fn node_standard_deviations(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(std::slice::from_ref(&self.std_dev))
    }
}

impl fmt::Display for ScalarSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SampleKind::Scalar)?;
        writeln!(f, "   sample size:  {}", self.sample_size())?;
        writeln!(f, "   mean:         {}", self.mean)?;
        writeln!(f, "   st.dev.:      {}", self.std_dev)?;
        writeln!(f, "   range:        ({}, {})", self.min, self.max)
    }
}
