//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use loginrisk_sdk::{
    Action, LoginAttempt, RiskEngine, RiskEngineBuilder, RiskResult, SyntheticHistoryProvider,
};

/// Principal every test engine is trained for
pub const PRINCIPAL: &str = "user_123";

/// Engine trained on the seeded synthetic history
pub fn trained_engine() -> RiskEngine {
    trained_engine_with_seed(42)
}

/// Engine trained on synthetic history generated from `history_seed`
pub fn trained_engine_with_seed(history_seed: u64) -> RiskEngine {
    let provider = SyntheticHistoryProvider::new().with_seed(history_seed);
    RiskEngineBuilder::new()
        .with_history_provider(&provider, PRINCIPAL)
        .build()
        .expect("engine should train on synthetic history")
}

/// Usual login: office hours, dominant location and device
pub fn usual_login() -> LoginAttempt {
    LoginAttempt::new(14, "Delhi", "Chrome")
        .with_principal(PRINCIPAL)
        .with_ip("192.168.1.5")
}

/// Night login from somewhere and something never seen before
pub fn suspicious_login() -> LoginAttempt {
    LoginAttempt::new(3, "Moscow", "Tor Browser")
        .with_principal(PRINCIPAL)
        .with_ip("45.12.19.99")
}

/// Usual login preceded by a burst of failures
pub fn brute_force_login() -> LoginAttempt {
    usual_login().with_failed_attempts(15)
}

/// Assertion helpers for results
pub trait ResultAssertions {
    fn assert_action(&self, expected: Action);
    fn assert_score_in_range(&self);
}

impl ResultAssertions for RiskResult {
    fn assert_action(&self, expected: Action) {
        assert_eq!(
            self.action, expected,
            "Expected action {:?}, got {:?} (score {})",
            expected, self.action, self.risk_score
        );
    }

    fn assert_score_in_range(&self) {
        assert!(
            (0.0..=100.0).contains(&self.risk_score),
            "Score out of range: {}",
            self.risk_score
        );
    }
}
