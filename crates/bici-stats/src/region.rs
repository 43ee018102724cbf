//! Region estimator boundary
//!
//! Confidence and prediction regions are computed by estimators that live
//! outside this crate. A sample hands itself and a [`RegionRequest`] to the
//! estimator and does no work on its behalf; the estimator reads the
//! sample's statistics through the traits in [`crate::sample`].
//!
//! `alpha` and `fwhm` are passed through unchecked. Range checks and
//! quantile computation belong to the estimator.

use serde::{Deserialize, Serialize};

use crate::sample::StatisticalSample;

/// Default significance level
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Which region an estimator is asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// Confidence interval (univariate) or confidence ellipse (bivariate)
    Confidence,
    /// Prediction interval (univariate) or prediction ellipse (bivariate)
    Prediction,
    /// Bivariate region built from the two component-wise intervals
    Ci2,
}

/// Parameters handed to an estimator along with the sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRequest {
    pub kind: RegionKind,
    /// Significance level, nominally in (0, 1)
    pub alpha: f64,
    /// Smoothness for continuum corrections (bivariate functional only)
    pub fwhm: Option<f64>,
}

impl RegionRequest {
    pub fn new(kind: RegionKind, alpha: f64) -> Self {
        Self {
            kind,
            alpha,
            fwhm: None,
        }
    }

    pub fn with_fwhm(mut self, fwhm: Option<f64>) -> Self {
        self.fwhm = fwhm;
        self
    }
}

impl Default for RegionRequest {
    fn default() -> Self {
        Self::new(RegionKind::Confidence, DEFAULT_ALPHA)
    }
}

/// An estimator constructed from a borrowed sample
///
/// The estimator may keep the borrow but can never mutate the sample.
pub trait RegionEstimator<'a, S: ?Sized>: Sized {
    type Error;

    fn estimate(sample: &'a S, request: RegionRequest) -> Result<Self, Self::Error>;
}

/// Factory entry point available on every sample
pub trait RegionSource: StatisticalSample {
    fn region<'a, E>(&'a self, request: RegionRequest) -> Result<E, E::Error>
    where
        E: RegionEstimator<'a, Self>,
    {
        E::estimate(self, request)
    }
}

impl<S: StatisticalSample + ?Sized> RegionSource for S {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarSample;
    use crate::sample::UnivariateStatistics;

    /// Records what it was given
    struct MeanEcho {
        mean: f64,
        observations: usize,
        request: RegionRequest,
    }

    impl<'a, S: UnivariateStatistics> RegionEstimator<'a, S> for MeanEcho {
        type Error = std::convert::Infallible;

        fn estimate(sample: &'a S, request: RegionRequest) -> Result<Self, Self::Error> {
            Ok(Self {
                mean: sample.node_means()[0],
                observations: sample.observation_count(),
                request,
            })
        }
    }

    #[test]
    fn test_request_defaults() {
        let request = RegionRequest::default();
        assert_eq!(request.kind, RegionKind::Confidence);
        assert_eq!(request.alpha, DEFAULT_ALPHA);
        assert!(request.fwhm.is_none());
    }

    #[test]
    fn test_region_passes_sample_and_request() {
        let sample = ScalarSample::from_slice(&[1.0, 2.0, 3.0]).unwrap();
        let request = RegionRequest::new(RegionKind::Prediction, 0.1);
        let echo: MeanEcho = sample.region(request).unwrap();

        assert_eq!(echo.mean, 2.0);
        assert_eq!(echo.observations, 3);
        assert_eq!(echo.request, request);
    }

    #[test]
    fn test_alpha_not_validated() {
        let sample = ScalarSample::from_slice(&[1.0, 2.0]).unwrap();
        let echo: MeanEcho = sample
            .region(RegionRequest::new(RegionKind::Confidence, 7.5))
            .unwrap();
        assert_eq!(echo.request.alpha, 7.5);
    }
}
