//! Error types for bici-stats
//!
//! Provides error handling for:
//! - Shape validation when a sample is constructed
//! - Auxiliary inputs whose length must agree with a sample
//! - Node indexing into functional samples
//! - Decomposition failures

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The four sample containers, used to label errors and summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleKind {
    /// 0-D univariate sample, shape `[J]`
    Scalar,
    /// 1-D univariate sample, shape `[J, Q]`
    Functional,
    /// 0-D bivariate sample, shape `[J, 2]`
    Bivariate,
    /// 1-D bivariate sample, shape `[J, Q, 2]`
    BivariateFunctional,
}

impl SampleKind {
    /// Array rank expected by this sample kind
    pub fn rank(&self) -> usize {
        match self {
            SampleKind::Scalar => 1,
            SampleKind::Functional | SampleKind::Bivariate => 2,
            SampleKind::BivariateFunctional => 3,
        }
    }

    /// Human-readable description of the expected shape
    pub fn expected_shape(&self) -> &'static str {
        match self {
            SampleKind::Scalar => "[observations]",
            SampleKind::Functional => "[observations, nodes]",
            SampleKind::Bivariate => "[observations, 2]",
            SampleKind::BivariateFunctional => "[observations, nodes, 2]",
        }
    }

    /// Type name used in textual summaries
    pub fn type_name(&self) -> &'static str {
        match self {
            SampleKind::Scalar => "ScalarSample",
            SampleKind::Functional => "FunctionalSample",
            SampleKind::Bivariate => "BivariateSample",
            SampleKind::BivariateFunctional => "BivariateFunctionalSample",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Main error type for sample operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    /// Array rank or trailing dimension does not match the sample kind
    #[error("Invalid shape for {kind}: expected {expected}, got {actual:?}")]
    Shape {
        kind: SampleKind,
        expected: String,
        actual: Vec<usize>,
    },

    /// Auxiliary input length disagrees with the sample
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Node index outside `[0, node_count)`
    #[error("Node index {index} out of range (node count: {node_count})")]
    Index { index: usize, node_count: usize },

    /// The SVD routine did not converge
    #[error("Decomposition failed: {message}")]
    Decomposition { message: String },
}

impl SampleError {
    /// Shape error with the kind's canonical expected shape
    pub fn shape(kind: SampleKind, actual: &[usize]) -> Self {
        SampleError::Shape {
            kind,
            expected: kind.expected_shape().to_string(),
            actual: actual.to_vec(),
        }
    }

    /// Whether this is a shape error
    pub fn is_shape(&self) -> bool {
        matches!(self, SampleError::Shape { .. })
    }
}

/// Result type alias for sample operations
pub type SampleResult<T> = Result<T, SampleError>;

/// Validation utilities
pub mod validation {
    use super::*;

    /// Validate that every axis of a sample array is non-empty, and that
    /// bivariate kinds carry exactly two components in the last axis.
    pub fn validate_shape(kind: SampleKind, shape: &[usize]) -> SampleResult<()> {
        if shape.len() != kind.rank() || shape.iter().any(|&len| len == 0) {
            return Err(SampleError::shape(kind, shape));
        }
        let bivariate = matches!(
            kind,
            SampleKind::Bivariate | SampleKind::BivariateFunctional
        );
        if bivariate && shape.last() != Some(&2) {
            return Err(SampleError::shape(kind, shape));
        }
        Ok(())
    }

    /// Validate that nested rows all have the same length
    pub fn validate_rows<T>(kind: SampleKind, rows: &[Vec<T>]) -> SampleResult<usize> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(row) = rows.iter().find(|row| row.len() != width) {
            return Err(SampleError::Shape {
                kind,
                expected: format!("rectangular rows of length {}", width),
                actual: vec![rows.len(), row.len()],
            });
        }
        Ok(width)
    }

    /// Validate a node index
    pub fn validate_node_index(index: usize, node_count: usize) -> SampleResult<()> {
        if index >= node_count {
            return Err(SampleError::Index { index, node_count });
        }
        Ok(())
    }

    /// Validate the length of caller-supplied auxiliary data
    pub fn validate_length(what: &str, expected: usize, actual: usize) -> SampleResult<()> {
        if expected != actual {
            return Err(SampleError::DimensionMismatch {
                what: what.to_string(),
                expected,
                actual,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_error_display() {
        let err = SampleError::shape(SampleKind::Bivariate, &[4, 3]);
        let message = err.to_string();
        assert!(message.contains("BivariateSample"));
        assert!(message.contains("[observations, 2]"));
        assert!(message.contains("[4, 3]"));
    }

    #[test]
    fn test_index_error_display() {
        let err = SampleError::Index {
            index: 7,
            node_count: 5,
        };
        assert!(err.to_string().contains("7"));
        assert!(err.to_string().contains("5"));
    }

    #[test]
    fn test_validate_shape() {
        assert!(validation::validate_shape(SampleKind::Scalar, &[3]).is_ok());
        assert!(validation::validate_shape(SampleKind::Scalar, &[0]).is_err());
        assert!(validation::validate_shape(SampleKind::Functional, &[3]).is_err());
        assert!(validation::validate_shape(SampleKind::Functional, &[3, 0]).is_err());
        assert!(validation::validate_shape(SampleKind::Bivariate, &[3, 2]).is_ok());
        assert!(validation::validate_shape(SampleKind::Bivariate, &[3, 3]).is_err());
        assert!(validation::validate_shape(SampleKind::BivariateFunctional, &[3, 10, 2]).is_ok());
        assert!(validation::validate_shape(SampleKind::BivariateFunctional, &[3, 10, 1]).is_err());
    }

    #[test]
    fn test_validate_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(validation::validate_rows(SampleKind::Functional, &rows), Ok(2));

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(validation::validate_rows(SampleKind::Functional, &ragged)
            .unwrap_err()
            .is_shape());
    }

    #[test]
    fn test_validate_node_index() {
        assert!(validation::validate_node_index(0, 1).is_ok());
        assert_eq!(
            validation::validate_node_index(1, 1),
            Err(SampleError::Index {
                index: 1,
                node_count: 1
            })
        );
    }

    #[test]
    fn test_validate_length() {
        assert!(validation::validate_length("node coordinates", 4, 4).is_ok());
        assert!(matches!(
            validation::validate_length("node coordinates", 4, 3),
            Err(SampleError::DimensionMismatch { expected: 4, actual: 3, .. })
        ));
    }
}
