//! Core RiskEngine implementation

use super::classify::classify;
use super::features::FeatureEncoders;
use super::fusion::{fuse, triggered_factors, FusionInput};
use super::types::RiskAssessment;
use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::metrics::{Metrics, MetricsCollector};
use loginrisk_core::{Action, HistoricalRecord, LoginAttempt, RiskResult};
use loginrisk_model::IsolationForest;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything fixed by training
#[derive(Debug)]
struct TrainedState {
    encoders: FeatureEncoders,
    model: IsolationForest,
    training_records: usize,
}

/// Hybrid login risk engine
///
/// Trained once over a principal's history, then scores any number of
/// attempts through `&self`. A trained engine never changes, so it can be
/// wrapped in an `Arc` and shared by request handlers without locking.
#[derive(Debug)]
pub struct RiskEngine {
    /// Configuration
    config: EngineConfig,

    /// Encoders and detector, present once trained
    state: Option<TrainedState>,

    /// Metrics collector
    metrics: Arc<MetricsCollector>,
}

impl RiskEngine {
    /// Create an untrained engine
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: None,
            metrics: Arc::new(MetricsCollector::new()),
        }
    }

    /// Fit encoders and the anomaly model on the history
    ///
    /// Training happens once; a second call is rejected.
    pub fn train(&mut self, history: &[HistoricalRecord]) -> Result<()> {
        if self.state.is_some() {
            return Err(SdkError::ConfigError(
                "engine is already trained; build a new engine to retrain".to_string(),
            ));
        }
        self.config.validate()?;

        if history.is_empty() {
            return Err(SdkError::ConfigError(
                "training history is empty".to_string(),
            ));
        }
        if history.len() < self.config.min_training_records {
            return Err(SdkError::ConfigError(format!(
                "training history has {} records, at least {} required",
                history.len(),
                self.config.min_training_records
            )));
        }

        info!("Training risk model on {} historical records", history.len());

        let encoders = FeatureEncoders::fit(history);
        let matrix = encoders.matrix(history)?;
        let model = IsolationForest::fit(&matrix, self.config.forest_config())?;

        info!(
            locations = encoders.location.len(),
            devices = encoders.device.len(),
            offset = model.offset(),
            "risk model trained"
        );

        self.state = Some(TrainedState {
            encoders,
            model,
            training_records: history.len(),
        });
        Ok(())
    }

    /// Whether `train` has completed
    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Score a login attempt
    pub fn score(&self, attempt: &LoginAttempt) -> Result<RiskResult> {
        Ok(self.assess(attempt)?.result)
    }

    /// Validate an untyped payload and score it
    pub fn calculate_risk(&self, payload: &serde_json::Value) -> Result<RiskResult> {
        let attempt = LoginAttempt::from_json(payload).map_err(|e| {
            self.record_error(&SdkError::ValidationError(e.clone()));
            SdkError::ValidationError(e)
        })?;
        self.score(&attempt)
    }

    /// Score a login attempt and report which factors produced the score
    pub fn assess(&self, attempt: &LoginAttempt) -> Result<RiskAssessment> {
        let start = Instant::now();
        let assessment = self.assess_inner(attempt);

        match &assessment {
            Ok(assessment) => self.record_success(assessment, start),
            Err(e) => self.record_error(e),
        }
        assessment
    }

    fn assess_inner(&self, attempt: &LoginAttempt) -> Result<RiskAssessment> {
        let state = self.state.as_ref().ok_or(SdkError::ModelUnavailable)?;

        if attempt.hour_of_day > 23 {
            warn!(
                hour_of_day = attempt.hour_of_day,
                "login attempt hour outside 0-23"
            );
        }

        let row = state.encoders.encode(attempt);
        let anomaly = state.model.evaluate(&row.to_vec())?;

        let factors = triggered_factors(&FusionInput {
            verdict: anomaly.verdict,
            location_unseen: row.location_unseen(),
            hour_of_day: attempt.hour_of_day,
            recent_failed_attempts: attempt.recent_failed_attempts,
        });
        let result = classify(fuse(&factors));

        debug!(
            score = result.risk_score,
            action = %result.action,
            factors = ?factors,
            margin = anomaly.margin,
            "login attempt scored"
        );

        Ok(RiskAssessment {
            result,
            factors,
            anomaly,
            location_seen: !row.location_unseen(),
            device_seen: !row.device_unseen(),
        })
    }

    fn record_success(&self, assessment: &RiskAssessment, start: Instant) {
        if !self.config.enable_metrics {
            return;
        }
        self.metrics.counter("scored_total").inc();
        let action_counter = match assessment.result.action {
            Action::Allow => "action_allow",
            Action::MfaChallenge => "action_mfa_challenge",
            Action::Block => "action_block",
        };
        self.metrics.counter(action_counter).inc();
        if assessment.anomaly.verdict.is_outlier() {
            self.metrics.counter("anomaly_outliers").inc();
        }
        self.metrics.record_execution_time("score", start.elapsed());
    }

    fn record_error(&self, error: &SdkError) {
        if self.config.enable_metrics {
            self.metrics.record_error(error.kind());
        }
    }

    /// Number of records the engine was trained on
    pub fn training_records(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.training_records)
    }

    /// Frozen encoders, once trained
    pub fn encoders(&self) -> Option<&FeatureEncoders> {
        self.state.as_ref().map(|s| &s.encoders)
    }

    /// Get configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }
}
