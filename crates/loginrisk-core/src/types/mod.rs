//! Type definitions for LoginRisk
//!
//! - `record`: historical samples and live login attempts
//! - `result`: risk result and action recommendation
//! - `validator`: validation of untyped login payloads

pub mod record;
pub mod result;
pub mod validator;

pub use record::{HistoricalRecord, LoginAttempt};
pub use result::{Action, RiskResult};
pub use validator::ValidationError;
