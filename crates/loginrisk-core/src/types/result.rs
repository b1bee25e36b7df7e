//! Risk result definitions

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Action recommended for a login attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Let the login through
    Allow,
    /// Require a second factor before letting the login through
    MfaChallenge,
    /// Reject the login
    Block,
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Allow => "ALLOW",
            Action::MfaChallenge => "MFA_CHALLENGE",
            Action::Block => "BLOCK",
        }
    }

    /// Name with the risk tier, as shown on monitoring screens
    pub fn label(&self) -> &'static str {
        match self {
            Action::Allow => "ALLOW (Low Risk)",
            Action::MfaChallenge => "MFA_CHALLENGE (Medium Risk)",
            Action::Block => "BLOCK (High Risk)",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALLOW" => Ok(Action::Allow),
            "MFA_CHALLENGE" => Ok(Action::MfaChallenge),
            "BLOCK" => Ok(Action::Block),
            other => Err(CoreError::InvalidValue(other.to_string())),
        }
    }
}

/// Outcome of scoring a single login attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Risk score in [0, 100]
    pub risk_score: f64,

    /// Recommended action
    pub action: Action,

    /// Short human-readable verdict
    pub details: String,
}

impl RiskResult {
    /// Create a new risk result
    pub fn new(risk_score: f64, action: Action, details: impl Into<String>) -> Self {
        Self {
            risk_score,
            action,
            details: details.into(),
        }
    }
}
