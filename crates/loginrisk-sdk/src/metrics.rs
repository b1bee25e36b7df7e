//! Metrics collection for scoring calls

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Counter metric
#[derive(Debug)]
pub struct Counter {
    name: String,
    value: AtomicU64,
}

impl Counter {
    /// Create a new counter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Increment the counter
    pub fn inc(&self) {
        self.add(1);
    }

    /// Add a value to the counter
    pub fn add(&self, value: u64) {
        self.value.fetch_add(value, Ordering::Relaxed);
    }

    /// Get the current value
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Reset the counter
    pub fn reset(&self) {
        self.value.store(0, Ordering::Relaxed);
    }
}

/// Observations a histogram keeps for percentiles
pub const DEFAULT_WINDOW: usize = 1024;

/// Latency histogram over a sliding window
///
/// Scoring runs for the life of the server, so only the most recent
/// `window` observations are retained for percentiles. Count and sum are
/// running totals over every observation ever made.
#[derive(Debug)]
pub struct Histogram {
    name: String,
    window: usize,
    state: RwLock<HistogramState>,
}

#[derive(Debug, Default)]
struct HistogramState {
    recent: VecDeque<f64>,
    total_count: u64,
    total_sum: f64,
}

impl Histogram {
    /// Histogram keeping the last [`DEFAULT_WINDOW`] observations
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_window(name, DEFAULT_WINDOW)
    }

    /// Histogram keeping the last `window` observations (at least one)
    pub fn with_window(name: impl Into<String>, window: usize) -> Self {
        let window = window.max(1);
        Self {
            name: name.into(),
            window,
            state: RwLock::new(HistogramState {
                recent: VecDeque::with_capacity(window),
                ..HistogramState::default()
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn observe(&self, value: f64) {
        let mut state = write(&self.state);
        if state.recent.len() == self.window {
            state.recent.pop_front();
        }
        state.recent.push_back(value);
        state.total_count += 1;
        state.total_sum += value;
    }

    /// Observe a duration, in seconds
    pub fn observe_duration(&self, duration: Duration) {
        self.observe(duration.as_secs_f64());
    }

    /// Observations made since creation or the last reset
    pub fn count(&self) -> u64 {
        read(&self.state).total_count
    }

    /// Observations currently held for percentiles
    pub fn retained(&self) -> usize {
        read(&self.state).recent.len()
    }

    pub fn sum(&self) -> f64 {
        read(&self.state).total_sum
    }

    /// Mean over every observation
    pub fn avg(&self) -> f64 {
        let state = read(&self.state);
        if state.total_count == 0 {
            0.0
        } else {
            state.total_sum / state.total_count as f64
        }
    }

    /// Nearest-rank percentile (0-100) of the retained window
    pub fn percentile(&self, p: f64) -> f64 {
        let mut values: Vec<f64> = read(&self.state).recent.iter().copied().collect();
        if values.is_empty() {
            return 0.0;
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let rank = (p.clamp(0.0, 100.0) / 100.0 * (values.len() - 1) as f64).round() as usize;
        values[rank]
    }

    pub fn reset(&self) {
        let mut state = write(&self.state);
        state.recent.clear();
        state.total_count = 0;
        state.total_sum = 0.0;
    }
}

/// Metrics trait
pub trait Metrics: Send + Sync {
    /// Get a counter
    fn counter(&self, name: &str) -> Arc<Counter>;

    /// Get a histogram
    fn histogram(&self, name: &str) -> Arc<Histogram>;

    /// Record execution time
    fn record_execution_time(&self, operation: &str, duration: Duration);

    /// Record error
    fn record_error(&self, error_type: &str);
}

/// Metrics collector
#[derive(Debug, Default)]
pub struct MetricsCollector {
    counters: RwLock<HashMap<String, Arc<Counter>>>,
    histograms: RwLock<HashMap<String, Arc<Histogram>>>,
}

impl MetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all counter names
    pub fn counter_names(&self) -> Vec<String> {
        read(&self.counters).keys().cloned().collect()
    }

    /// Get all histogram names
    pub fn histogram_names(&self) -> Vec<String> {
        read(&self.histograms).keys().cloned().collect()
    }

    /// Snapshot of every counter value
    pub fn snapshot(&self) -> HashMap<String, u64> {
        read(&self.counters)
            .iter()
            .map(|(name, counter)| (name.clone(), counter.get()))
            .collect()
    }

    /// Reset all metrics
    pub fn reset_all(&self) {
        for counter in read(&self.counters).values() {
            counter.reset();
        }
        for histogram in read(&self.histograms).values() {
            histogram.reset();
        }
    }
}

impl Metrics for MetricsCollector {
    fn counter(&self, name: &str) -> Arc<Counter> {
        if let Some(counter) = read(&self.counters).get(name) {
            return counter.clone();
        }
        write(&self.counters)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Counter::new(name)))
            .clone()
    }

    fn histogram(&self, name: &str) -> Arc<Histogram> {
        if let Some(histogram) = read(&self.histograms).get(name) {
            return histogram.clone();
        }
        write(&self.histograms)
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Histogram::new(name)))
            .clone()
    }

    fn record_execution_time(&self, operation: &str, duration: Duration) {
        let hist = self.histogram(&format!("{}_duration", operation));
        hist.observe_duration(duration);
    }

    fn record_error(&self, error_type: &str) {
        let counter = self.counter(&format!("errors_{}", error_type));
        counter.inc();
    }
}

// A panic while holding a metrics lock leaves plain numbers behind; keep using them.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
