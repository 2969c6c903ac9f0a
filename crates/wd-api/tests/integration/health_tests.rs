//! Health check endpoint integration tests.

use axum::http::StatusCode;
use serde_json::Value;

use super::common::{create_test_router, get_request, send_request, send_request_raw};

/// The health endpoint reports healthy with zero counts on a fresh store.
#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let (app, _store) = create_test_router();

    let (status, body) = send_request_raw(app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(
        body.contains("healthy"),
        "Health endpoint should indicate healthy status"
    );
}

/// The health endpoint reflects stored alert and incident counts.
#[tokio::test]
async fn test_health_reports_counts() {
    let (app, store) = create_test_router();
    super::common::seed_alert(
        &store,
        0,
        "ssh_bruteforce",
        wd_core::Severity::High,
        Some("alice"),
        None,
    )
    .await;

    let (status, body): (StatusCode, Value) = send_request(app, get_request("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["alerts"], 1);
    assert_eq!(body["incidents"], 0);
    assert!(body.get("version").is_some());
}
