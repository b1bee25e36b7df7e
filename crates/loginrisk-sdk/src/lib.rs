//! LoginRisk Scoring Engine SDK
//!
//! High-level API for training the login risk engine on a principal's
//! history and scoring live login attempts.
//!
//! ```rust
//! use loginrisk_sdk::{LoginAttempt, RiskEngineBuilder, SyntheticHistoryProvider, Action};
//!
//! let provider = SyntheticHistoryProvider::new().with_seed(7);
//! let engine = RiskEngineBuilder::new()
//!     .with_history_provider(&provider, "user_123")
//!     .build()
//!     .unwrap();
//!
//! let result = engine
//!     .score(&LoginAttempt::new(14, "Delhi", "Chrome").with_failed_attempts(15))
//!     .unwrap();
//! assert_eq!(result.action, Action::Block);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod history;
pub mod metrics;
pub mod risk_engine;

// Re-export main types
pub use builder::RiskEngineBuilder;
pub use config::{EngineConfig, HistoryConfig};
pub use error::{Result, SdkError};
pub use history::{BehaviorProfile, HistoryProvider, SyntheticHistoryProvider};
pub use metrics::{Metrics, MetricsCollector, DEFAULT_WINDOW};
pub use risk_engine::{RiskAssessment, RiskEngine, RiskFactor};

// Re-export commonly used types from dependencies
pub use loginrisk_core::{Action, HistoricalRecord, LoginAttempt, RiskResult, ValidationError};
pub use loginrisk_model::Verdict;
