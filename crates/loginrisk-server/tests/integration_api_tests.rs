//! Integration tests for REST API endpoints
//!
//! These tests train a real RiskEngine and drive the router end-to-end.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use loginrisk_sdk::{EngineConfig, RiskEngine, RiskEngineBuilder, SyntheticHistoryProvider};
use loginrisk_server::api::create_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const PRINCIPAL: &str = "user_123";

fn trained_router() -> Router {
    let provider = SyntheticHistoryProvider::new().with_seed(42);
    let engine = RiskEngineBuilder::new()
        .with_history_provider(&provider, PRINCIPAL)
        .build()
        .unwrap();
    create_router(Arc::new(engine))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn login_check(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/login-check")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = trained_router();

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_usual_login_allowed() {
    let app = trained_router();
    let body = json!({
        "user_id": PRINCIPAL,
        "hour_of_day": 14,
        "location": "Delhi",
        "device": "Chrome",
        "failed_attempts": 0,
        "ip": "103.21.58.12"
    });

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "ALLOW");
    assert_eq!(json["details"], "Normal Behavior");
    assert!(json["risk_score"].as_f64().unwrap() <= 30.0);
}

#[tokio::test]
async fn test_foreign_login_challenged() {
    let app = trained_router();
    let body = json!({
        "hour_of_day": 3,
        "location": "Moscow",
        "device": "Tor Browser",
        "recent_failed_attempts": 0
    });

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_ne!(json["action"], "ALLOW");
    assert_eq!(json["details"], "ML Anomaly");
    assert!(json["risk_score"].as_f64().unwrap() >= 45.0);
}

#[tokio::test]
async fn test_brute_force_blocked() {
    let app = trained_router();
    let body = json!({
        "hour_of_day": 14,
        "location": "Delhi",
        "device": "Chrome",
        "failed_attempts_last_5min": 15
    });

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "BLOCK");
}

#[tokio::test]
async fn test_missing_failed_attempts_defaults_to_zero() {
    let app = trained_router();
    let body = json!({
        "hour_of_day": 14,
        "location": "Delhi",
        "device": "Chrome"
    });

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "ALLOW");
}

#[tokio::test]
async fn test_request_id_header() {
    let app = trained_router();
    let body = json!({"hour_of_day": 14, "location": "Delhi", "device": "Chrome"});

    let response = app.oneshot(login_check(&body)).await.unwrap();

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(request_id.starts_with("req_"));
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let app = trained_router();
    let body = json!({"hour_of_day": 14, "location": "Delhi"});

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("device"));
}

#[tokio::test]
async fn test_wrong_type_is_bad_request() {
    let app = trained_router();
    let body = json!({"hour_of_day": "fourteen", "location": "Delhi", "device": "Chrome"});

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("hour_of_day"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = trained_router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/login-check")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("JSON syntax error"));
}

#[tokio::test]
async fn test_missing_content_type_is_bad_request() {
    let app = trained_router();
    let request = Request::builder()
        .method("POST")
        .uri("/api/login-check")
        .body(Body::from(r#"{"hour_of_day": 14}"#))
        .unwrap();

    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("Content-Type"));
}

#[tokio::test]
async fn test_untrained_engine_is_service_unavailable() {
    let app = create_router(Arc::new(RiskEngine::new(EngineConfig::default())));
    let body = json!({"hour_of_day": 14, "location": "Delhi", "device": "Chrome"});

    let (status, json) = send(app, login_check(&body)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], 503);
}

#[tokio::test]
async fn test_metrics_endpoint_counts_checks() {
    let provider = SyntheticHistoryProvider::new().with_seed(42);
    let engine = Arc::new(
        RiskEngineBuilder::new()
            .with_history_provider(&provider, PRINCIPAL)
            .build()
            .unwrap(),
    );
    let app = create_router(engine.clone());

    let body = json!({"hour_of_day": 14, "location": "Delhi", "device": "Chrome"});
    let (status, _) = send(app.clone(), login_check(&body)).await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["counters"]["scored_total"], 1);
    assert_eq!(json["histograms"]["score_duration"]["count"], 1);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = trained_router();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/login-check")
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = trained_router();
    let request = Request::builder()
        .uri("/v1/decide")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
