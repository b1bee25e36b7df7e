//! Model error types

use thiserror::Error;

/// Model error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Nothing to fit on
    #[error("Empty training data")]
    EmptyTrainingData,

    /// Row width does not match the matrix or the fitted model
    #[error("Feature width mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: usize, actual: usize },

    /// Detector parameter out of range
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },
}

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
