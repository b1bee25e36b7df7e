//! Assessment types for RiskEngine

use loginrisk_core::RiskResult;
use loginrisk_model::AnomalyScore;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point contribution that fired for an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// Anomaly model flagged the attempt as an outlier
    AnomalyOutlier,
    /// More than 5 recent failures
    BruteForceVelocity,
    /// More than 2 recent failures
    ElevatedVelocity,
    /// Location never seen in the history
    NewLocation,
    /// Login outside the usual hours
    UnusualHour,
}

impl RiskFactor {
    /// Points the factor adds to the score
    pub fn points(&self) -> f64 {
        match self {
            RiskFactor::AnomalyOutlier => 40.0,
            RiskFactor::BruteForceVelocity => 80.0,
            RiskFactor::ElevatedVelocity => 20.0,
            RiskFactor::NewLocation => 30.0,
            RiskFactor::UnusualHour => 15.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RiskFactor::AnomalyOutlier => "anomaly_outlier",
            RiskFactor::BruteForceVelocity => "brute_force_velocity",
            RiskFactor::ElevatedVelocity => "elevated_velocity",
            RiskFactor::NewLocation => "new_location",
            RiskFactor::UnusualHour => "unusual_hour",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(+{})", self.name(), self.points())
    }
}

/// Result of scoring plus what produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Plain scoring result
    pub result: RiskResult,

    /// Factors that fired, in evaluation order
    pub factors: Vec<RiskFactor>,

    /// Detector output; only `verdict` feeds the score
    pub anomaly: AnomalyScore,

    /// Location was present in the training history
    pub location_seen: bool,

    /// Device was present in the training history
    pub device_seen: bool,
}

impl RiskAssessment {
    /// Sum of fired points before capping
    pub fn uncapped_score(&self) -> f64 {
        self.factors.iter().map(RiskFactor::points).sum()
    }
}
