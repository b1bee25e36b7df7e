//! Action classification

use loginrisk_core::{Action, RiskResult};

/// Highest score that is still allowed
pub const ALLOW_MAX_SCORE: f64 = 30.0;

/// Highest score that gets a second-factor challenge instead of a block
pub const MFA_MAX_SCORE: f64 = 70.0;

const NORMAL_DETAILS: &str = "Normal Behavior";
const ANOMALY_DETAILS: &str = "ML Anomaly";

/// Map a capped score to its action and details
pub fn classify(score: f64) -> RiskResult {
    let action = if score <= ALLOW_MAX_SCORE {
        Action::Allow
    } else if score <= MFA_MAX_SCORE {
        Action::MfaChallenge
    } else {
        Action::Block
    };

    let details = if score <= ALLOW_MAX_SCORE {
        NORMAL_DETAILS
    } else {
        ANOMALY_DETAILS
    };

    RiskResult::new(score, action, details)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_band() {
        for score in [0.0, 15.0, 30.0] {
            let result = classify(score);
            assert_eq!(result.action, Action::Allow);
            assert_eq!(result.details, "Normal Behavior");
        }
    }

    #[test]
    fn test_mfa_band() {
        for score in [31.0, 45.0, 70.0] {
            let result = classify(score);
            assert_eq!(result.action, Action::MfaChallenge, "score {}", score);
            assert_eq!(result.details, "ML Anomaly");
        }
    }

    #[test]
    fn test_block_band() {
        for score in [71.0, 80.0, 100.0] {
            assert_eq!(classify(score).action, Action::Block, "score {}", score);
        }
    }

    #[test]
    fn test_score_is_carried_through() {
        assert_eq!(classify(45.0).risk_score, 45.0);
    }
}
