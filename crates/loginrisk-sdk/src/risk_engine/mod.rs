//! RiskEngine - Main API for scoring login attempts
//!
//! This module provides the `RiskEngine` that learns a principal's normal
//! behavior once and then scores live login attempts against it.
//!
//! # Architecture
//!
//! The module is organized into:
//! - `features`: Categorical encoding and feature-row construction
//! - `fusion`: Rule contributions and the additive score policy
//! - `classify`: Mapping of a capped score to an action
//! - `types`: Assessment types returned alongside the plain result
//! - `engine`: Core RiskEngine implementation (train / score)
//! - `tests`: Unit tests (test-only)

mod classify;
mod engine;
mod features;
mod fusion;
mod types;

// Re-export public types
pub use classify::{classify, ALLOW_MAX_SCORE, MFA_MAX_SCORE};
pub use engine::RiskEngine;
pub use features::{FeatureEncoders, FEATURE_COLUMNS};
pub use fusion::{fuse, triggered_factors, FusionInput, MAX_SCORE};
pub use types::{RiskAssessment, RiskFactor};

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
