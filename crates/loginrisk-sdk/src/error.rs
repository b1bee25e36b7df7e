//! SDK error types

use loginrisk_core::{CoreError, ValidationError};
use loginrisk_model::ModelError;
use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Engine cannot be trained with the given history or parameters
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed login attempt
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationError),

    /// Scoring requested before training completed
    #[error("Model unavailable: engine has not been trained")]
    ModelUnavailable,

    /// Detector failure
    #[error("Model error: {0}")]
    ModelError(#[from] ModelError),
}

impl From<CoreError> for SdkError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => SdkError::ValidationError(e),
            CoreError::InvalidValue(msg) => SdkError::ConfigError(msg),
        }
    }
}

impl SdkError {
    /// Short label used for error metrics
    pub fn kind(&self) -> &'static str {
        match self {
            SdkError::ConfigError(_) => "configuration",
            SdkError::ValidationError(_) => "validation",
            SdkError::ModelUnavailable => "model_unavailable",
            SdkError::ModelError(_) => "model",
        }
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
