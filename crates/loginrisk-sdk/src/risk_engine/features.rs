//! Feature encoding for RiskEngine
//!
//! Column order of every feature row, at training and at scoring time:
//! `hour_of_day`, encoded `location`, encoded `device`, `recent_failed_attempts`.

use crate::error::Result;
use loginrisk_core::BehaviorSample;
use loginrisk_model::{CategoryEncoder, FeatureMatrix, UNSEEN_CODE};

/// Feature names in column order
pub const FEATURE_COLUMNS: [&str; 4] = [
    "hour_of_day",
    "location",
    "device",
    "recent_failed_attempts",
];

/// Frozen encoders for the categorical features
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoders {
    pub location: CategoryEncoder,
    pub device: CategoryEncoder,
}

/// Encoded feature row of a single sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EncodedRow {
    pub hour_of_day: u32,
    pub location_code: i64,
    pub device_code: i64,
    pub recent_failed_attempts: u32,
}

impl EncodedRow {
    pub fn to_vec(self) -> [f64; 4] {
        [
            self.hour_of_day as f64,
            self.location_code as f64,
            self.device_code as f64,
            self.recent_failed_attempts as f64,
        ]
    }

    pub fn location_unseen(&self) -> bool {
        self.location_code == UNSEEN_CODE
    }

    pub fn device_unseen(&self) -> bool {
        self.device_code == UNSEEN_CODE
    }
}

impl FeatureEncoders {
    /// Fit fresh encoders over the history
    pub fn fit<S: BehaviorSample>(history: &[S]) -> Self {
        Self {
            location: CategoryEncoder::fit("location", history.iter().map(|r| r.location())),
            device: CategoryEncoder::fit("device", history.iter().map(|r| r.device())),
        }
    }

    pub(crate) fn encode<S: BehaviorSample>(&self, sample: &S) -> EncodedRow {
        EncodedRow {
            hour_of_day: sample.hour_of_day(),
            location_code: self.location.encode(sample.location()),
            device_code: self.device.encode(sample.device()),
            recent_failed_attempts: sample.recent_failed_attempts(),
        }
    }

    /// Training matrix of the history
    pub fn matrix<S: BehaviorSample>(&self, history: &[S]) -> Result<FeatureMatrix> {
        let mut matrix = FeatureMatrix::with_capacity(FEATURE_COLUMNS.len(), history.len());
        for sample in history {
            matrix.push_row(&self.encode(sample).to_vec())?;
        }
        Ok(matrix)
    }
}
