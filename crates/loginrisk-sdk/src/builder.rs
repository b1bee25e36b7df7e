//! Builder pattern for RiskEngine

use crate::config::EngineConfig;
use crate::error::{Result, SdkError};
use crate::history::HistoryProvider;
use crate::risk_engine::RiskEngine;
use loginrisk_core::HistoricalRecord;

/// Builder for RiskEngine
///
/// Collects the configuration and the training history, then trains the
/// engine in `build`. The returned engine is ready to score.
///
/// # Example
///
/// ```rust
/// use loginrisk_sdk::{RiskEngineBuilder, SyntheticHistoryProvider};
///
/// let provider = SyntheticHistoryProvider::new().with_seed(1);
/// let engine = RiskEngineBuilder::new()
///     .with_history_provider(&provider, "user_123")
///     .contamination(0.05)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert!(engine.is_trained());
/// ```
pub struct RiskEngineBuilder {
    config: EngineConfig,
    history: Option<Vec<HistoricalRecord>>,
}

impl RiskEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            history: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Train on an explicit history
    pub fn with_history(mut self, history: Vec<HistoricalRecord>) -> Self {
        self.history = Some(history);
        self
    }

    /// Train on the history a provider returns for a principal
    pub fn with_history_provider<P: HistoryProvider + ?Sized>(
        mut self,
        provider: &P,
        principal_id: &str,
    ) -> Self {
        self.history = Some(provider.history(principal_id));
        self
    }

    /// Set contamination
    pub fn contamination(mut self, contamination: f64) -> Self {
        self.config.contamination = contamination;
        self
    }

    /// Set model seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set minimum history size
    pub fn min_training_records(mut self, min: usize) -> Self {
        self.config.min_training_records = min;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.config.enable_metrics = enable;
        self
    }

    /// Train and return the engine
    pub fn build(self) -> Result<RiskEngine> {
        let history = self.history.ok_or_else(|| {
            SdkError::ConfigError("no training history configured".to_string())
        })?;

        let mut engine = RiskEngine::new(self.config);
        engine.train(&history)?;
        Ok(engine)
    }
}

impl Default for RiskEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
