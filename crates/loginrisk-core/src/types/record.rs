//! Behavioral record definitions
//!
//! A `HistoricalRecord` is one past login of a principal and belongs to the
//! training corpus. A `LoginAttempt` has the same behavioral shape but is a
//! live event to be scored; it is never folded back into the corpus.

use serde::{Deserialize, Serialize};

/// Read access to the four behavioral features shared by historical
/// records and live attempts.
pub trait BehaviorSample {
    /// Hour of day, conventionally 0-23
    fn hour_of_day(&self) -> u32;

    /// Location label (city, region, ...)
    fn location(&self) -> &str;

    /// Device or client label
    fn device(&self) -> &str;

    /// Failed attempts observed shortly before this one
    fn recent_failed_attempts(&self) -> u32;
}

/// Past behavioral record of a single principal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Principal (user) the record belongs to
    pub principal_id: String,

    /// Hour of day (0-23)
    pub hour_of_day: u32,

    /// Location label
    pub location: String,

    /// Device label
    pub device: String,

    /// Failed attempts in the short window before the login
    pub recent_failed_attempts: u32,
}

impl HistoricalRecord {
    /// Create a new historical record
    pub fn new(
        principal_id: impl Into<String>,
        hour_of_day: u32,
        location: impl Into<String>,
        device: impl Into<String>,
        recent_failed_attempts: u32,
    ) -> Self {
        Self {
            principal_id: principal_id.into(),
            hour_of_day,
            location: location.into(),
            device: device.into(),
            recent_failed_attempts,
        }
    }
}

impl BehaviorSample for HistoricalRecord {
    fn hour_of_day(&self) -> u32 {
        self.hour_of_day
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn recent_failed_attempts(&self) -> u32 {
        self.recent_failed_attempts
    }
}

/// Live login attempt to be scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    /// Principal identifier, carried for the caller; not a model feature
    #[serde(default)]
    pub principal_id: Option<String>,

    /// Hour of day
    pub hour_of_day: u32,

    /// Location label
    pub location: String,

    /// Device label
    pub device: String,

    /// Failed attempts in the short window before this login
    #[serde(default)]
    pub recent_failed_attempts: u32,

    /// Source IP, carried for the caller; not a model feature
    #[serde(default)]
    pub ip: Option<String>,
}

impl LoginAttempt {
    /// Create a new login attempt
    pub fn new(hour_of_day: u32, location: impl Into<String>, device: impl Into<String>) -> Self {
        Self {
            principal_id: None,
            hour_of_day,
            location: location.into(),
            device: device.into(),
            recent_failed_attempts: 0,
            ip: None,
        }
    }

    /// Set the recent failed attempt count
    pub fn with_failed_attempts(mut self, count: u32) -> Self {
        self.recent_failed_attempts = count;
        self
    }

    /// Set the principal identifier
    pub fn with_principal(mut self, principal_id: impl Into<String>) -> Self {
        self.principal_id = Some(principal_id.into());
        self
    }

    /// Set the source IP
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }
}

impl BehaviorSample for LoginAttempt {
    fn hour_of_day(&self) -> u32 {
        self.hour_of_day
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn device(&self) -> &str {
        &self.device
    }

    fn recent_failed_attempts(&self) -> u32 {
        self.recent_failed_attempts
    }
}

impl From<&HistoricalRecord> for LoginAttempt {
    fn from(record: &HistoricalRecord) -> Self {
        Self {
            principal_id: Some(record.principal_id.clone()),
            hour_of_day: record.hour_of_day,
            location: record.location.clone(),
            device: record.device.clone(),
            recent_failed_attempts: record.recent_failed_attempts,
            ip: None,
        }
    }
}
