//! Configuration for bici-stats
//!
//! Settings that control how samples derive their statistics: covariance
//! normalization, SVD convergence bounds, and when per-node work goes parallel.

use serde::{Deserialize, Serialize};

/// Covariance normalization
///
/// Sample means and standard deviations are always unbiased (`N - 1`).
/// The covariance used for principal axes defaults to biased (`N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// Divide by `N`
    #[default]
    Biased,
    /// Divide by `N - 1`
    Unbiased,
}

impl Normalization {
    /// Divisor applied to the sum of cross-products for `n` observations
    pub fn divisor(&self, n: usize) -> f64 {
        match self {
            Normalization::Biased => n as f64,
            Normalization::Unbiased => n as f64 - 1.0,
        }
    }
}

/// SVD convergence settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecompositionConfig {
    /// Convergence tolerance passed to the SVD routine
    pub epsilon: f64,
    /// Iteration bound; reaching it is a decomposition error. `0` removes the
    /// bound. Only finite matrices reach the SVD, so the unbounded loop
    /// still terminates.
    pub max_iterations: usize,
}

impl Default for DecompositionConfig {
    fn default() -> Self {
        Self {
            epsilon: f64::EPSILON,
            max_iterations: 1000,
        }
    }
}

/// Sample construction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleConfig {
    /// Normalization of the cached covariance matrices
    pub covariance: Normalization,
    /// SVD settings
    pub decomposition: DecompositionConfig,
    /// Minimum node count before per-node decomposition runs on the rayon
    /// pool (only with the `parallel` feature)
    pub parallel_min_nodes: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            covariance: Normalization::default(),
            decomposition: DecompositionConfig::default(),
            parallel_min_nodes: 64,
        }
    }
}

impl SampleConfig {
    /// Config with a specific covariance normalization
    pub fn with_covariance(mut self, covariance: Normalization) -> Self {
        self.covariance = covariance;
        self
    }

    /// Config with a specific parallel threshold
    pub fn with_parallel_min_nodes(mut self, parallel_min_nodes: usize) -> Self {
        self.parallel_min_nodes = parallel_min_nodes;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_biased() {
        let config = SampleConfig::default();
        assert_eq!(config.covariance, Normalization::Biased);
        assert_eq!(config.parallel_min_nodes, 64);
        assert_eq!(config.decomposition.max_iterations, 1000);
    }

    #[test]
    fn test_divisor() {
        assert_eq!(Normalization::Biased.divisor(5), 5.0);
        assert_eq!(Normalization::Unbiased.divisor(5), 4.0);
    }

    #[test]
    fn test_builder() {
        let config = SampleConfig::default()
            .with_covariance(Normalization::Unbiased)
            .with_parallel_min_nodes(8);
        assert_eq!(config.covariance, Normalization::Unbiased);
        assert_eq!(config.parallel_min_nodes, 8);
    }
}
