//! bici-stats - Sample containers for bivariate confidence regions
//!
//! This crate holds samples of scalar, functional (1-D continuum), and
//! bivariate measurements, and computes the statistics that confidence- and
//! prediction-region estimators consume:
//!
//! - **ScalarSample**: `[J]` observations; mean, st.dev., range
//! - **FunctionalSample**: `[J, Q]` continua; per-node mean and st.dev.
//! - **BivariateSample**: `[J, 2]` points; covariance and principal axes
//! - **BivariateFunctionalSample**: `[J, Q, 2]` continua; per-node covariance
//!   and principal axes, with single-node frame extraction
//!
//! # Principal Axes
//!
//! Bivariate covariance matrices are decomposed by SVD. Axis signs are
//! normalized so the major axis never points below the first component axis,
//! independently at every node. See [`decomposition`].
//!
//! # Estimators and Rendering
//!
//! Region estimators and plotting surfaces are external. Samples hand
//! themselves to a [`RegionEstimator`] or draw onto a [`PlotTarget`], and
//! expose their statistics through [`StatisticalSample`],
//! [`UnivariateStatistics`], and [`BivariateStatistics`].

pub mod bivariate;
pub mod bivariate_functional;
pub mod config;
pub mod decomposition;
pub mod error;
pub mod functional;
pub mod plot;
pub mod region;
pub mod sample;
pub mod scalar;

pub use bivariate::BivariateSample;
pub use bivariate_functional::BivariateFunctionalSample;
pub use config::*;
pub use decomposition::PrincipalAxes;
pub use error::{SampleError, SampleKind, SampleResult};
pub use functional::FunctionalSample;
pub use plot::*;
pub use region::*;
pub use sample::*;
pub use scalar::ScalarSample;
