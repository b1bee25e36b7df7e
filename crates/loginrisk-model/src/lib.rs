//! LoginRisk Model - Feature encoding and anomaly detection
//!
//! This crate holds the trainable pieces of the scoring engine:
//! - `encoder`: frozen categorical encoders with an unseen-value sentinel
//! - `matrix`: dense numeric feature matrix
//! - `isolation_forest`: unsupervised outlier detector
//! - `error`: model error types

pub mod encoder;
pub mod error;
pub mod isolation_forest;
pub mod matrix;

pub use encoder::{CategoryEncoder, UNSEEN_CODE};
pub use error::{ModelError, Result};
pub use isolation_forest::{AnomalyScore, IsolationForest, IsolationForestConfig, Verdict};
pub use matrix::FeatureMatrix;
