//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use loginrisk_sdk::RiskEngine;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router over a trained engine
pub fn create_router(engine: Arc<RiskEngine>) -> Router {
    if !engine.is_trained() {
        tracing::warn!("Router created over an untrained engine; login checks will return 503");
    }

    let state = AppState { engine };

    Router::new()
        .route("/health", get(health))
        .route("/api/login-check", post(login_check))
        .route("/metrics", get(metrics))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
