//! LoginRisk Core - Core types and definitions for the LoginRisk scoring engine
//!
//! This crate provides the fundamental types used across the LoginRisk workspace:
//! - Behavioral records (historical samples and live login attempts)
//! - Risk results and the action recommendation
//! - Validation of untyped login payloads
//! - Error types

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::CoreError;
pub use types::record::BehaviorSample;
pub use types::{Action, HistoricalRecord, LoginAttempt, RiskResult, ValidationError};
