//! Error types for reference and path resolution.

use thiserror::Error;

/// Errors produced when a REST path does not have the shape an operation needs.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    /// The path does not match the expected resource shape.
    #[error("Path '{path}' does not match the expected shape {expected}")]
    UnexpectedShape {
        /// The path that was rejected
        path: String,
        /// Human readable description of the accepted shape
        expected: &'static str,
    },
}

impl PathError {
    /// Check if this error is a shape mismatch.
    pub fn is_unexpected_shape(&self) -> bool {
        matches!(self, PathError::UnexpectedShape { .. })
    }

    /// The path that triggered the error.
    pub fn path(&self) -> &str {
        match self {
            PathError::UnexpectedShape { path, .. } => path,
        }
    }
}

impl From<PathError> for crate::Error {
    fn from(err: PathError) -> Self {
        crate::Error::Path(err)
    }
}
