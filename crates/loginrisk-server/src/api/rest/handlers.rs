//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::State,
    http::{header::HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use loginrisk_sdk::Metrics;
use std::time::Instant;
use tracing::{info, warn};

/// Response header carrying the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate a request id
///
/// Format: `req_YYYYMMDDHHmmss_xxxxxx`, e.g. `req_20231209143052_a3f2e1`.
pub fn generate_request_id() -> String {
    use chrono::Utc;
    use rand::Rng;

    let datetime_str = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let random: u32 = rand::thread_rng().gen_range(0..0xFFFFFF);

    format!("req_{}_{:06x}", datetime_str, random)
}

/// Health check endpoint
pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Login risk check endpoint
///
/// The raw JSON body goes straight to the engine, which owns field
/// validation; this keeps the 400 messages identical to the library's.
pub(super) async fn login_check(
    State(state): State<AppState>,
    JsonExtractor(payload): JsonExtractor<serde_json::Value>,
) -> Result<Response, ServerError> {
    let start = Instant::now();
    let request_id = generate_request_id();

    let result = match state.engine.calculate_risk(&payload) {
        Ok(result) => result,
        Err(e) => {
            warn!(request_id = %request_id, error = %e, "login check rejected");
            return Err(e.into());
        }
    };

    info!(
        request_id = %request_id,
        risk_score = result.risk_score,
        action = %result.action,
        process_time_ms = start.elapsed().as_millis() as u64,
        "login check completed"
    );

    let mut response = Json(result).into_response();
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    Ok(response)
}

/// Metrics endpoint - engine counters and timing histograms as JSON
pub(super) async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let collector = state.engine.metrics();

    let counters = collector.snapshot().into_iter().collect();
    let histograms = collector
        .histogram_names()
        .into_iter()
        .map(|name| {
            let hist = collector.histogram(&name);
            let summary = HistogramSummary {
                count: hist.count(),
                retained: hist.retained(),
                avg: hist.avg(),
                p95: hist.percentile(95.0),
            };
            (name, summary)
        })
        .collect();

    Json(MetricsResponse {
        counters,
        histograms,
    })
}
