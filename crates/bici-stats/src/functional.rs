//! 1-D univariate (functional) sample
//!
//! Rows are observations, columns are continuum nodes. Means and unbiased
//! standard deviations are computed per node.

use std::fmt;

use ndarray::{Array1, Array2, ArrayD, ArrayView1, ArrayView2, Axis, Ix2};

use crate::error::{validation, SampleError, SampleKind, SampleResult};
use crate::plot::{Color, LineStyle, PlotOptions, PlotTarget};
use crate::region::{RegionEstimator, RegionKind, RegionRequest, RegionSource};
use crate::sample::{
    node_coordinates, observation_range, warn_single_observation, StatisticalSample,
    UnivariateStatistics,
};

/// A sample of 1-D continua, shape `[J, Q]`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalSample {
    data: Array2<f64>,
    mean: Array1<f64>,
    std_dev: Array1<f64>,
    min: Array1<f64>,
    max: Array1<f64>,
}

impl FunctionalSample {
    /// Build a sample; fails with a shape error if either axis is empty
    pub fn new(data: Array2<f64>) -> SampleResult<Self> {
        let kind = SampleKind::Functional;
        validation::validate_shape(kind, data.shape())?;

        let mean = data
            .mean_axis(Axis(0))
            .ok_or_else(|| SampleError::shape(kind, data.shape()))?;
        let std_dev = data.std_axis(Axis(0), 1.0);
        let (min, max) = observation_range(&data);

        warn_single_observation(kind, data.nrows());
        tracing::debug!(
            "Built functional sample: {} observations x {} nodes",
            data.nrows(),
            data.ncols()
        );

        Ok(Self {
            data,
            mean,
            std_dev,
            min,
            max,
        })
    }

    /// Build a sample from rows of equal length
    pub fn from_rows(rows: &[Vec<f64>]) -> SampleResult<Self> {
        let kind = SampleKind::Functional;
        let width = validation::validate_rows(kind, rows)?;
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        let data = Array2::from_shape_vec((rows.len(), width), flat)
            .map_err(|_| SampleError::shape(kind, &[rows.len(), width]))?;
        Self::new(data)
    }

    pub fn observation_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn sample_size(&self) -> usize {
        self.observation_count()
    }

    pub fn node_count(&self) -> usize {
        self.data.ncols()
    }

    /// Mean at each node
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Unbiased standard deviation at each node
    pub fn standard_deviation(&self) -> &Array1<f64> {
        &self.std_dev
    }

    /// Per-node `(min, max)`
    pub fn range(&self) -> (&Array1<f64>, &Array1<f64>) {
        (&self.min, &self.max)
    }

    /// Node coordinates, `0..Q` unless supplied
    pub fn node_coordinates(&self, x: Option<&[f64]>) -> SampleResult<Array1<f64>> {
        node_coordinates(self.node_count(), x)
    }

    pub fn data(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Owned copy of the observations
    pub fn to_array(&self) -> Array2<f64> {
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

    /// Draw each observation as a gray trace over the node coordinates,
    /// optionally with a bold mean trace
    pub fn plot<T: PlotTarget + ?Sized>(
        &self,
        target: &mut T,
        x: Option<&[f64]>,
        options: PlotOptions,
    ) -> SampleResult<()> {
        let x = self.node_coordinates(x)?.to_vec();
        let width = if options.plot_sample_mean { 0.5 } else { 1.0 };
        let trace = LineStyle::new(Color::Gray(0.7), width);
        for row in self.data.rows() {
            target.line(&x, &row.to_vec(), &trace);
        }

        if options.plot_sample_mean {
            let mean = LineStyle::new(Color::BLACK, 3.0).with_label("Sample mean");
            target.line(&x, &self.mean.to_vec(), &mean);
        }
        Ok(())
    }
}

impl TryFrom<ArrayD<f64>> for FunctionalSample {
    type Error = SampleError;

    fn try_from(data: ArrayD<f64>) -> SampleResult<Self> {
        let shape = data.shape().to_vec();
        let data = data
            .into_dimensionality::<Ix2>()
            .map_err(|_| SampleError::shape(SampleKind::Functional, &shape))?;
        Self::new(data)
    }
}

impl StatisticalSample for FunctionalSample {
    fn kind(&self) -> SampleKind {
        SampleKind::Functional
    }

    fn observation_count(&self) -> usize {
        self.data.nrows()
    }

    fn node_count(&self) -> usize {
        self.data.ncols()
    }
}

impl UnivariateStatistics for FunctionalSample {
    fn node_means(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    fn node_standard_deviations(&self) -> ArrayView1<'_, f64> {
        self.std_dev.view()
    }
}

impl fmt::Display for FunctionalSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SampleKind::Functional)?;
        writeln!(f, "   sample size:  {}", self.sample_size())?;
        writeln!(f, "   nnodes:       {}", self.node_count())
    }
}
