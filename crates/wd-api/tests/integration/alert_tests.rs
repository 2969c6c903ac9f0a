//! Alert ingestion and listing endpoint tests.

use axum::http::StatusCode;
use serde_json::{json, Value};

use super::common::{
    create_test_router, get_request, post_json_request, seed_alert, send_request,
};
use wd_core::Severity;

/// A well-formed alert is accepted and echoed back with an assigned id.
#[tokio::test]
async fn test_ingest_alert_returns_created() {
    let (app, _store) = create_test_router();

    let payload = json!({
        "ts": "2024-03-01T12:00:00Z",
        "source": "auth-service",
        "alert_type": "ssh_bruteforce",
        "severity": "high",
        "message": "20 failed SSH logins followed by success",
        "user": "alice",
        "ip": "203.0.113.7"
    });

    let (status, body): (StatusCode, Value) =
        send_request(app, post_json_request("/api/alerts", &payload.to_string())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(body["alert_type"], "ssh_bruteforce");
    assert_eq!(body["severity"], "high");
    assert_eq!(body["user"], "alice");
    assert!(body["incident_id"].is_null());
}

/// An unknown severity string is rejected with 400.
#[tokio::test]
async fn test_ingest_alert_rejects_bad_severity() {
    let (app, _store) = create_test_router();

    let payload = json!({
        "ts": "2024-03-01T12:00:00Z",
        "source": "auth-service",
        "alert_type": "ssh_bruteforce",
        "severity": "catastrophic",
        "message": "bad severity"
    });

    let (status, body): (StatusCode, Value) =
        send_request(app, post_json_request("/api/alerts", &payload.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

/// An empty source fails field validation.
#[tokio::test]
async fn test_ingest_alert_rejects_empty_source() {
    let (app, _store) = create_test_router();

    let payload = json!({
        "ts": "2024-03-01T12:00:00Z",
        "source": "",
        "alert_type": "ssh_bruteforce",
        "severity": "low",
        "message": "empty source"
    });

    let (status, _body): (StatusCode, Value) =
        send_request(app, post_json_request("/api/alerts", &payload.to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Alerts list newest first and carry their incident id after a rebuild.
#[tokio::test]
async fn test_list_alerts_includes_incident_link() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    seed_alert(&store, 5, "impossible_travel", Severity::Medium, Some("alice"), None).await;
    store.rebuild().await.unwrap();

    let (status, body): (StatusCode, Value) = send_request(app, get_request("/api/alerts")).await;

    assert_eq!(status, StatusCode::OK);
    let alerts = body.as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    // Newest first.
    assert_eq!(alerts[0]["id"], 2);
    assert_eq!(alerts[1]["id"], 1);
    // Both linked by shared user into the same incident.
    let first = alerts[0]["incident_id"].as_str().unwrap();
    let second = alerts[1]["incident_id"].as_str().unwrap();
    assert_eq!(first, second);
}
