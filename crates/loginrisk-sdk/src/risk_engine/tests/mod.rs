//! Unit tests for RiskEngine

use super::*;
use crate::config::EngineConfig;
use crate::error::SdkError;
use crate::history::{HistoryProvider, SyntheticHistoryProvider};
use crate::metrics::{Metrics, DEFAULT_WINDOW};
use loginrisk_core::{Action, HistoricalRecord, LoginAttempt};
use serde_json::json;

fn seeded_history() -> Vec<HistoricalRecord> {
    SyntheticHistoryProvider::new()
        .with_seed(42)
        .history("user_123")
}

fn trained_engine() -> RiskEngine {
    let mut engine = RiskEngine::new(EngineConfig::default());
    engine.train(&seeded_history()).unwrap();
    engine
}

#[test]
fn test_untrained_engine_reports_model_unavailable() {
    let engine = RiskEngine::new(EngineConfig::default());

    assert!(!engine.is_trained());
    let err = engine
        .score(&LoginAttempt::new(14, "Delhi", "Chrome"))
        .unwrap_err();
    assert!(matches!(err, SdkError::ModelUnavailable));
    assert_eq!(engine.metrics().counter("errors_model_unavailable").get(), 1);
}

#[test]
fn test_empty_history_rejected() {
    let mut engine = RiskEngine::new(EngineConfig::default());
    let err = engine.train(&[]).unwrap_err();

    assert!(matches!(err, SdkError::ConfigError(_)));
    assert!(err.to_string().contains("empty"));
    assert!(!engine.is_trained());
}

#[test]
fn test_small_history_rejected() {
    let history: Vec<_> = seeded_history().into_iter().take(9).collect();
    let mut engine = RiskEngine::new(EngineConfig::default());
    let err = engine.train(&history).unwrap_err();

    assert!(err.to_string().contains("at least 10"));
}

#[test]
fn test_minimum_history_accepted() {
    let history: Vec<_> = seeded_history().into_iter().take(10).collect();
    let mut engine = RiskEngine::new(EngineConfig::default());
    engine.train(&history).unwrap();

    assert_eq!(engine.training_records(), Some(10));
}

#[test]
fn test_training_happens_once() {
    let mut engine = trained_engine();
    let err = engine.train(&seeded_history()).unwrap_err();
    assert!(err.to_string().contains("already trained"));
}

#[test]
fn test_invalid_config_rejected_at_training() {
    let mut engine = RiskEngine::new(EngineConfig::new().with_contamination(0.0));
    let err = engine.train(&seeded_history()).unwrap_err();
    assert!(matches!(err, SdkError::ConfigError(_)));
}

#[test]
fn test_encoders_frozen_after_training() {
    let engine = trained_engine();
    let before = engine.encoders().cloned().unwrap();

    engine
        .score(&LoginAttempt::new(3, "Moscow", "Tor Browser"))
        .unwrap();

    assert_eq!(engine.encoders().unwrap(), &before);
    assert!(!before.location.contains("Moscow"));
}

#[test]
fn test_normal_login_allowed() {
    let engine = trained_engine();
    let result = engine
        .score(&LoginAttempt::new(14, "Delhi", "Chrome"))
        .unwrap();

    assert_eq!(result.action, Action::Allow);
    assert_eq!(result.risk_score, 0.0);
    assert_eq!(result.details, "Normal Behavior");
}

#[test]
fn test_new_location_adds_points() {
    let engine = trained_engine();
    let assessment = engine
        .assess(&LoginAttempt::new(3, "Moscow", "Tor Browser"))
        .unwrap();

    assert!(!assessment.location_seen);
    assert!(!assessment.device_seen);
    assert!(assessment.factors.contains(&RiskFactor::NewLocation));
    assert!(assessment.factors.contains(&RiskFactor::UnusualHour));
    assert!(assessment.result.risk_score >= 45.0);
    assert_ne!(assessment.result.action, Action::Allow);
    assert_eq!(assessment.result.details, "ML Anomaly");
}

#[test]
fn test_brute_force_always_blocks() {
    let engine = trained_engine();
    let result = engine
        .score(&LoginAttempt::new(14, "Delhi", "Chrome").with_failed_attempts(15))
        .unwrap();

    assert_eq!(result.action, Action::Block);
    assert!(result.risk_score >= 80.0);
}

#[test]
fn test_assessment_matches_score() {
    let engine = trained_engine();
    let attempt = LoginAttempt::new(2, "Pune", "Chrome").with_failed_attempts(4);

    let assessment = engine.assess(&attempt).unwrap();
    let result = engine.score(&attempt).unwrap();

    assert_eq!(assessment.result, result);
    assert_eq!(
        result.risk_score,
        assessment.uncapped_score().min(MAX_SCORE)
    );
    assert_eq!(
        assessment.factors.contains(&RiskFactor::AnomalyOutlier),
        assessment.anomaly.verdict.is_outlier()
    );
}

#[test]
fn test_calculate_risk_from_payload() {
    let engine = trained_engine();
    let result = engine
        .calculate_risk(&json!({
            "user_id": "user_123",
            "hour_of_day": 14,
            "location": "Delhi",
            "device": "Chrome",
            "ip": "192.168.1.5",
            "failed_attempts_last_5min": 15
        }))
        .unwrap();

    assert_eq!(result.action, Action::Block);
}

#[test]
fn test_calculate_risk_rejects_malformed_payload() {
    let engine = trained_engine();
    let err = engine
        .calculate_risk(&json!({"hour_of_day": "noon", "location": "Delhi", "device": "Chrome"}))
        .unwrap_err();

    assert!(matches!(err, SdkError::ValidationError(_)));
    assert_eq!(engine.metrics().counter("errors_validation").get(), 1);
}

#[test]
fn test_metrics_count_actions() {
    let engine = trained_engine();

    engine.score(&LoginAttempt::new(14, "Delhi", "Chrome")).unwrap();
    engine
        .score(&LoginAttempt::new(14, "Delhi", "Chrome").with_failed_attempts(9))
        .unwrap();

    let metrics = engine.metrics();
    assert_eq!(metrics.counter("scored_total").get(), 2);
    assert_eq!(metrics.counter("action_allow").get(), 1);
    assert_eq!(metrics.counter("action_block").get(), 1);
    assert_eq!(metrics.histogram("score_duration").count(), 2);
}

#[test]
fn test_long_running_scoring_keeps_latency_window_bounded() {
    let engine = trained_engine();
    let attempt = LoginAttempt::new(14, "Delhi", "Chrome");
    let scored = DEFAULT_WINDOW * 5;

    for _ in 0..scored {
        engine.score(&attempt).unwrap();
    }

    let durations = engine.metrics().histogram("score_duration");
    assert_eq!(durations.count(), scored as u64);
    assert_eq!(durations.retained(), DEFAULT_WINDOW);
    assert_eq!(engine.metrics().counter("scored_total").get(), scored as u64);
}

#[test]
fn test_metrics_disabled() {
    let mut engine = RiskEngine::new(EngineConfig::new().enable_metrics(false));
    engine.train(&seeded_history()).unwrap();
    engine.score(&LoginAttempt::new(14, "Delhi", "Chrome")).unwrap();

    assert!(engine.metrics().counter_names().is_empty());
}

#[test]
fn test_engine_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RiskEngine>();
}

#[test]
fn test_shared_engine_scores_from_threads() {
    let engine = std::sync::Arc::new(trained_engine());
    let expected = engine
        .score(&LoginAttempt::new(3, "Moscow", "Tor Browser"))
        .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine
                    .score(&LoginAttempt::new(3, "Moscow", "Tor Browser"))
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_out_of_convention_hour_reaches_late_hour_rule() {
    let engine = trained_engine();
    let assessment = engine
        .assess(&LoginAttempt::new(24, "Delhi", "Chrome"))
        .unwrap();
    assert!(assessment.factors.contains(&RiskFactor::UnusualHour));
}

/// Collects formatted log output for assertions
#[derive(Clone, Default)]
struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_training_log_is_plain_text() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let mut engine = RiskEngine::new(EngineConfig::default());
        engine.train(&seeded_history()).unwrap();
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("risk model trained"), "{}", output);
    assert!(output.is_ascii(), "{}", output);
}
