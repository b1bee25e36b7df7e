//! REST API type definitions

use loginrisk_sdk::RiskEngine;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Application state
///
/// The engine is trained before the router is built and never mutated
/// afterwards, so handlers share it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RiskEngine>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Metrics endpoint response
#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub counters: BTreeMap<String, u64>,
    pub histograms: BTreeMap<String, HistogramSummary>,
}

/// Aggregates of one histogram, in seconds for timing histograms
#[derive(Debug, Serialize)]
pub struct HistogramSummary {
    /// Observations since startup
    pub count: u64,
    /// Observations behind `p95`
    pub retained: usize,
    pub avg: f64,
    pub p95: f64,
}
