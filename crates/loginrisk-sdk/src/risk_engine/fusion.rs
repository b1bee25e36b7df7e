//! Score fusion policy
//!
//! Each fired factor adds a flat number of points; the sum is capped at
//! [`MAX_SCORE`]. No factor subtracts, so the score never drops below zero.
//!
//! | factor | condition | points |
//! |---|---|---|
//! | anomaly outlier | detector verdict is outlier | 40 |
//! | brute-force velocity | failed attempts > 5 | 80 |
//! | elevated velocity | failed attempts > 2 (and not > 5) | 20 |
//! | new location | location encodes to the unseen sentinel | 30 |
//! | unusual hour | hour < 5 or hour > 23 | 15 |
//!
//! The `hour > 23` half of the unusual-hour rule never fires for hours in
//! the 0-23 range. It is kept as written.

use super::types::RiskFactor;
use loginrisk_model::Verdict;

/// Upper bound of the risk score
pub const MAX_SCORE: f64 = 100.0;

const BRUTE_FORCE_FAILURES: u32 = 5;
const ELEVATED_FAILURES: u32 = 2;
const EARLY_HOUR: u32 = 5;
const LATE_HOUR: u32 = 23;

/// Everything the policy looks at for one attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusionInput {
    pub verdict: Verdict,
    pub location_unseen: bool,
    pub hour_of_day: u32,
    pub recent_failed_attempts: u32,
}

/// Factors that fire for the input, in evaluation order
pub fn triggered_factors(input: &FusionInput) -> Vec<RiskFactor> {
    let mut factors = Vec::with_capacity(4);

    if input.verdict.is_outlier() {
        factors.push(RiskFactor::AnomalyOutlier);
    }

    // first match wins
    if input.recent_failed_attempts > BRUTE_FORCE_FAILURES {
        factors.push(RiskFactor::BruteForceVelocity);
    } else if input.recent_failed_attempts > ELEVATED_FAILURES {
        factors.push(RiskFactor::ElevatedVelocity);
    }

    if input.location_unseen {
        factors.push(RiskFactor::NewLocation);
    }

    if input.hour_of_day < EARLY_HOUR || input.hour_of_day > LATE_HOUR {
        factors.push(RiskFactor::UnusualHour);
    }

    factors
}

/// Capped sum of the factors' points
pub fn fuse(factors: &[RiskFactor]) -> f64 {
    factors
        .iter()
        .map(RiskFactor::points)
        .sum::<f64>()
        .min(MAX_SCORE)
}
