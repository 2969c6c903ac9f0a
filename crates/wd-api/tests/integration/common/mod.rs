//! Common test utilities for integration tests.

use axum::{
    body::Body,
    http::{Method, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;

use wd_api::{routes, AppState};
use wd_core::{Alert, AssetTier, NewAlert, Severity, Store};

/// Builds a router over a fresh in-memory store.
pub fn create_test_router() -> (Router, Arc<Store>) {
    let store = Arc::new(Store::new(Default::default()));
    let app = routes::create_router(AppState::with_store(store.clone()));
    (app, store)
}

/// Fixed base timestamp so cluster windows are predictable.
pub fn base_ts() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// Seeds one alert directly into the store, bypassing the HTTP layer.
pub async fn seed_alert(
    store: &Store,
    offset_minutes: i64,
    alert_type: &str,
    severity: Severity,
    user: Option<&str>,
    host: Option<&str>,
) -> Alert {
    store
        .ingest_alert(NewAlert {
            ts: base_ts() + chrono::Duration::minutes(offset_minutes),
            source: "test-sensor".to_string(),
            alert_type: alert_type.to_string(),
            severity,
            message: format!("{} observed", alert_type),
            user: user.map(String::from),
            host: host.map(String::from),
            ip: None,
            asset_tier: AssetTier::Normal,
            raw: serde_json::Value::Null,
        })
        .await
}

/// Helper to make GET requests.
pub fn get_request(uri: &str) -> axum::extract::Request<Body> {
    axum::extract::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to make POST requests with JSON body.
pub fn post_json_request(uri: &str, body: &str) -> axum::extract::Request<Body> {
    axum::extract::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper to make PATCH requests with JSON body.
pub fn patch_json_request(uri: &str, body: &str) -> axum::extract::Request<Body> {
    axum::extract::Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Sends request and parses JSON response.
pub async fn send_request<T: DeserializeOwned>(
    app: Router,
    request: axum::extract::Request<Body>,
) -> (StatusCode, T) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let parsed: T = serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!(
            "Failed to parse response: {} - Body: {:?}",
            e,
            String::from_utf8_lossy(&body)
        )
    });
    (status, parsed)
}

/// Sends request and returns raw response body.
pub async fn send_request_raw(
    app: Router,
    request: axum::extract::Request<Body>,
) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8_lossy(&body).to_string())
}
