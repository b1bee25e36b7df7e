//! Login payload validation
//!
//! Turns an untyped JSON payload into a [`LoginAttempt`], rejecting payloads
//! with missing required fields or fields of the wrong type. Unknown fields
//! are ignored; they belong to the surrounding layer.
//!
//! # Fields
//!
//! | field | type | required |
//! |---|---|---|
//! | `hour_of_day` | non-negative integer | yes |
//! | `location` | non-empty string | yes |
//! | `device` | non-empty string | yes |
//! | `recent_failed_attempts` | non-negative integer | no, defaults to 0 |
//! | `user_id` / `principal_id` | string | no |
//! | `ip` | string | no |
//!
//! `failed_attempts` and `failed_attempts_last_5min` are accepted as aliases
//! of `recent_failed_attempts`.

use super::record::LoginAttempt;
use serde_json::{Map, Value};
use thiserror::Error;

const FAILED_ATTEMPT_FIELDS: &[&str] = &[
    "recent_failed_attempts",
    "failed_attempts",
    "failed_attempts_last_5min",
];

const PRINCIPAL_FIELDS: &[&str] = &["user_id", "principal_id"];

/// Validation error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Type mismatch
    #[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Required field missing
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    /// Value has the right type but is out of its domain
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl LoginAttempt {
    /// Build a login attempt from an untyped JSON payload
    ///
    /// # Example
    /// ```
    /// use loginrisk_core::LoginAttempt;
    ///
    /// let payload = serde_json::json!({
    ///     "user_id": "user_123",
    ///     "hour_of_day": 14,
    ///     "location": "Delhi",
    ///     "device": "Chrome",
    ///     "failed_attempts": 0
    /// });
    /// let attempt = LoginAttempt::from_json(&payload).unwrap();
    /// assert_eq!(attempt.hour_of_day, 14);
    /// ```
    pub fn from_json(payload: &Value) -> Result<Self, ValidationError> {
        let obj = match payload {
            Value::Object(obj) => obj,
            other => {
                return Err(ValidationError::TypeMismatch {
                    field: "root".to_string(),
                    expected: "object".to_string(),
                    actual: type_name(other).to_string(),
                })
            }
        };

        let hour_of_day = required_count(obj, "hour_of_day")?;
        let location = required_label(obj, "location")?;
        let device = required_label(obj, "device")?;

        let mut recent_failed_attempts = 0;
        for field in FAILED_ATTEMPT_FIELDS {
            if let Some(value) = present(obj, field) {
                recent_failed_attempts = as_count(field, value)?;
                break;
            }
        }

        let mut principal_id = None;
        for field in PRINCIPAL_FIELDS {
            if let Some(value) = present(obj, field) {
                principal_id = Some(as_string(field, value)?);
                break;
            }
        }

        let ip = match present(obj, "ip") {
            Some(value) => Some(as_string("ip", value)?),
            None => None,
        };

        Ok(Self {
            principal_id,
            hour_of_day,
            location,
            device,
            recent_failed_attempts,
            ip,
        })
    }
}

/// Field lookup treating an explicit `null` as absent
fn present<'a>(obj: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| !v.is_null())
}

fn required_count(obj: &Map<String, Value>, field: &str) -> Result<u32, ValidationError> {
    let value = present(obj, field).ok_or_else(|| ValidationError::RequiredFieldMissing {
        field: field.to_string(),
    })?;
    as_count(field, value)
}

fn required_label(obj: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    let value = present(obj, field).ok_or_else(|| ValidationError::RequiredFieldMissing {
        field: field.to_string(),
    })?;
    let label = as_string(field, value)?;
    if label.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(label)
}

/// Non-negative whole number that fits in `u32`; `14.0` is accepted, `14.5` is not
fn as_count(field: &str, value: &Value) -> Result<u32, ValidationError> {
    let number = match value {
        Value::Number(n) => n,
        other => {
            return Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: "integer".to_string(),
                actual: type_name(other).to_string(),
            })
        }
    };

    let whole = if let Some(u) = number.as_u64() {
        u as f64
    } else if let Some(i) = number.as_i64() {
        i as f64
    } else {
        let f = number.as_f64().unwrap_or(f64::NAN);
        if !f.is_finite() || f.fract() != 0.0 {
            return Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: "integer".to_string(),
                actual: "float".to_string(),
            });
        }
        f
    };

    if whole < 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("must be non-negative, got {}", whole),
        });
    }
    if whole > u32::MAX as f64 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("out of range: {}", whole),
        });
    }
    Ok(whole as u32)
}

fn as_string(field: &str, value: &Value) -> Result<String, ValidationError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        other => Err(ValidationError::TypeMismatch {
            field: field.to_string(),
            expected: "string".to_string(),
            actual: type_name(other).to_string(),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
