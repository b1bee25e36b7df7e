//! Historical behavior sources
//!
//! A [`HistoryProvider`] supplies the past logins of one principal that the
//! engine trains on. In production this is a query against the login store;
//! [`SyntheticHistoryProvider`] stands in for it with a generator biased
//! toward one dominant location, one dominant device and office hours.

use crate::config::HistoryConfig;
use crate::error::{Result, SdkError};
use loginrisk_core::HistoricalRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, StandardNormal};

/// Source of a principal's past behavior
pub trait HistoryProvider: Send + Sync {
    /// All historical records for the principal
    fn history(&self, principal_id: &str) -> Vec<HistoricalRecord>;
}

/// Shape of a principal's normal behavior
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorProfile {
    pub dominant_location: String,
    pub secondary_location: String,
    /// Share of logins from the dominant location
    pub dominant_location_share: f64,

    pub dominant_device: String,
    pub secondary_device: String,
    /// Share of logins from the dominant device
    pub dominant_device_share: f64,

    /// Centre of the login hour distribution
    pub typical_hour: f64,
    /// Spread of the login hour distribution
    pub hour_std_dev: f64,

    /// Share of logins preceded by a few innocuous failures
    pub retry_probability: f64,
    /// Upper bound of those failures
    pub max_retries: u32,
}

impl BehaviorProfile {
    /// Reject shares outside [0, 1] and an unusable hour spread
    pub fn validate(&self) -> Result<()> {
        Normal::new(self.typical_hour, self.hour_std_dev)
            .map_err(|e| SdkError::ConfigError(format!("hour distribution: {}", e)))?;

        for (name, share) in [
            ("dominant_location_share", self.dominant_location_share),
            ("dominant_device_share", self.dominant_device_share),
            ("retry_probability", self.retry_probability),
        ] {
            if !(0.0..=1.0).contains(&share) {
                return Err(SdkError::ConfigError(format!(
                    "{} must be in [0, 1], got {}",
                    name, share
                )));
            }
        }
        Ok(())
    }
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            dominant_location: "Delhi".to_string(),
            secondary_location: "Mumbai".to_string(),
            dominant_location_share: 0.90,
            dominant_device: "Chrome".to_string(),
            secondary_device: "Firefox".to_string(),
            dominant_device_share: 0.85,
            typical_hour: 14.0,
            hour_std_dev: 2.0,
            retry_probability: 0.05,
            max_retries: 2,
        }
    }
}

/// Generator of plausible login history
#[derive(Debug, Clone)]
pub struct SyntheticHistoryProvider {
    records: usize,
    seed: Option<u64>,
    profile: BehaviorProfile,
}

impl SyntheticHistoryProvider {
    /// 100 records, default profile, OS entropy
    pub fn new() -> Self {
        Self {
            records: 100,
            seed: None,
            profile: BehaviorProfile::default(),
        }
    }

    /// Build from history configuration
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            records: config.records,
            seed: config.seed,
            profile: BehaviorProfile::default(),
        }
    }

    /// Set the number of records per principal
    pub fn with_records(mut self, records: usize) -> Self {
        self.records = records;
        self
    }

    /// Make generation reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the behavior profile
    pub fn with_profile(mut self, profile: BehaviorProfile) -> Result<Self> {
        profile.validate()?;
        self.profile = profile;
        Ok(self)
    }

    pub fn profile(&self) -> &BehaviorProfile {
        &self.profile
    }

    /// Lazily generate the history of one principal
    pub fn iter(&self, principal_id: &str) -> SyntheticHistory<'_> {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        SyntheticHistory {
            profile: &self.profile,
            principal_id: principal_id.to_string(),
            rng,
            remaining: self.records,
        }
    }
}

impl Default for SyntheticHistoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryProvider for SyntheticHistoryProvider {
    fn history(&self, principal_id: &str) -> Vec<HistoricalRecord> {
        self.iter(principal_id).collect()
    }
}

/// Lazy record stream returned by [`SyntheticHistoryProvider::iter`]
pub struct SyntheticHistory<'a> {
    profile: &'a BehaviorProfile,
    principal_id: String,
    rng: StdRng,
    remaining: usize,
}

impl SyntheticHistory<'_> {
    fn next_record(&mut self) -> HistoricalRecord {
        let p = self.profile;

        // profile was validated, so scaling a standard normal is N(typical_hour, hour_std_dev)
        let z: f64 = self.rng.sample(StandardNormal);
        let raw_hour = p.typical_hour + p.hour_std_dev * z;
        // truncate toward zero, then clamp into the day
        let hour_of_day = (raw_hour as i64).clamp(0, 23) as u32;

        let location = if self.rng.gen_bool(p.dominant_location_share) {
            &p.dominant_location
        } else {
            &p.secondary_location
        };
        let device = if self.rng.gen_bool(p.dominant_device_share) {
            &p.dominant_device
        } else {
            &p.secondary_device
        };

        let recent_failed_attempts = if p.max_retries > 0
            && self.rng.gen_bool(p.retry_probability)
        {
            self.rng.gen_range(1..=p.max_retries)
        } else {
            0
        };

        HistoricalRecord::new(
            self.principal_id.clone(),
            hour_of_day,
            location.clone(),
            device.clone(),
            recent_failed_attempts,
        )
    }
}

impl Iterator for SyntheticHistory<'_> {
    type Item = HistoricalRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.next_record())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SyntheticHistory<'_> {}
