//! Configuration types for RiskEngine

use crate::error::{Result, SdkError};
use loginrisk_model::IsolationForestConfig;
use serde::{Deserialize, Serialize};

/// Main engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Expected fraction of outliers in the training history
    pub contamination: f64,

    /// Seed for the anomaly model
    pub seed: u64,

    /// Number of isolation trees
    pub n_estimators: usize,

    /// Rows sampled per tree
    pub max_samples: usize,

    /// Smallest history the engine agrees to train on
    pub min_training_records: usize,

    /// Enable metrics collection
    pub enable_metrics: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            contamination: 0.05,
            seed: 42,
            n_estimators: 100,
            max_samples: 256,
            min_training_records: 10,
            enable_metrics: true,
        }
    }

    /// Set contamination
    pub fn with_contamination(mut self, contamination: f64) -> Self {
        self.contamination = contamination;
        self
    }

    /// Set model seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set number of trees
    pub fn with_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Set minimum history size
    pub fn with_min_training_records(mut self, min: usize) -> Self {
        self.min_training_records = min;
        self
    }

    /// Enable metrics
    pub fn enable_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// Check ranges before any training work
    pub fn validate(&self) -> Result<()> {
        self.forest_config()
            .validate()
            .map_err(|e| SdkError::ConfigError(e.to_string()))?;
        if self.min_training_records == 0 {
            return Err(SdkError::ConfigError(
                "min_training_records must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Detector parameters
    pub fn forest_config(&self) -> IsolationForestConfig {
        IsolationForestConfig {
            n_estimators: self.n_estimators,
            max_samples: self.max_samples,
            contamination: self.contamination,
            seed: self.seed,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the training history comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Principal whose history trains the engine
    pub principal_id: String,

    /// Number of synthetic records
    pub records: usize,

    /// Seed for the synthetic generator; OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            principal_id: "user_123".to_string(),
            records: 100,
            seed: None,
        }
    }
}
