//! Incident endpoint tests: rebuild, detail, analyst updates, playbooks,
//! remediation, and export.

use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use super::common::{
    create_test_router, get_request, patch_json_request, post_json_request, seed_alert,
    send_request,
};
use wd_core::Severity;

/// Rebuild groups correlated alerts and reports the incident count.
#[tokio::test]
async fn test_rebuild_creates_incidents() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    seed_alert(&store, 10, "impossible_travel", Severity::Medium, Some("alice"), None).await;
    seed_alert(&store, 0, "port_scan", Severity::Low, None, Some("db-01")).await;

    let (status, body): (StatusCode, Value) =
        send_request(app, post_json_request("/api/incidents/rebuild", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["incidents"], 2);
    assert_eq!(body["alerts"], 3);
    assert_eq!(body["preserved"], 0);
}

/// Listing after a rebuild returns scored incidents with MITRE mappings.
#[tokio::test]
async fn test_list_incidents_after_rebuild() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    seed_alert(&store, 3, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();

    let (status, body): (StatusCode, Value) =
        send_request(app, get_request("/api/incidents")).await;

    assert_eq!(status, StatusCode::OK);
    let incidents = body.as_array().unwrap();
    assert_eq!(incidents.len(), 1);
    let incident = &incidents[0];
    assert!(incident["risk_score"].as_f64().unwrap() > 0.0);
    assert_eq!(incident["status"], "open");
    let mitre = incident["mitre"].as_array().unwrap();
    assert!(mitre.iter().any(|m| m["technique_id"] == "T1110"));
}

/// Incident detail embeds the member alerts.
#[tokio::test]
async fn test_get_incident_detail() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let id = store.list_incidents().await[0].id;

    let (status, body): (StatusCode, Value) =
        send_request(app, get_request(&format!("/api/incidents/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    let alerts = body["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0]["alert_type"], "ssh_bruteforce");
    assert!(body["summary"].as_str().unwrap().contains("severity"));
}

/// Unknown incident ids map to 404 with the standard error shape.
#[tokio::test]
async fn test_get_incident_not_found() {
    let (app, _store) = create_test_router();

    let (status, body): (StatusCode, Value) = send_request(
        app,
        get_request(&format!("/api/incidents/{}", Uuid::new_v4())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

/// PATCH updates analyst fields and leaves engine fields untouched.
#[tokio::test]
async fn test_update_incident_analyst_fields() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let incident = store.list_incidents().await.remove(0);

    let payload = json!({
        "status": "triaged",
        "analyst_verdict": "true_positive",
        "analyst_notes": "Confirmed with auth logs"
    });
    let (status, body): (StatusCode, Value) = send_request(
        app,
        patch_json_request(
            &format!("/api/incidents/{}", incident.id),
            &payload.to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "triaged");
    assert_eq!(body["analyst_verdict"], "true_positive");
    assert_eq!(body["analyst_notes"], "Confirmed with auth logs");
    assert_eq!(body["risk_score"], incident.risk_score);
}

/// An invalid status string on PATCH is rejected with 400.
#[tokio::test]
async fn test_update_incident_rejects_bad_status() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let id = store.list_incidents().await[0].id;

    let payload = json!({ "status": "escalated" });
    let (status, _body): (StatusCode, Value) = send_request(
        app,
        patch_json_request(&format!("/api/incidents/{}", id), &payload.to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// Analyst fields survive a subsequent rebuild over the same alert pool.
#[tokio::test]
async fn test_analyst_fields_survive_rebuild() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let id = store.list_incidents().await[0].id;

    let payload = json!({ "status": "closed", "analyst_notes": "duplicate" });
    let (status, _body): (StatusCode, Value) = send_request(
        app.clone(),
        patch_json_request(&format!("/api/incidents/{}", id), &payload.to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body): (StatusCode, Value) =
        send_request(app, post_json_request("/api/incidents/rebuild", "{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["preserved"], 1);

    let incident = store.get_incident(id).await.unwrap();
    assert_eq!(incident.status, wd_core::IncidentStatus::Closed);
    assert_eq!(incident.analyst_notes, "duplicate");
}

/// The playbook endpoint returns deduplicated steps for observed types.
#[tokio::test]
async fn test_get_playbook() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    seed_alert(&store, 2, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let id = store.list_incidents().await[0].id;

    let (status, body): (StatusCode, Value) = send_request(
        app,
        get_request(&format!("/api/incidents/{}/playbook", id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let steps = body["steps"].as_array().unwrap();
    assert!(!steps.is_empty());
    // Two alerts of the same type must not duplicate steps.
    let mut actions: Vec<&str> = steps.iter().map(|s| s["action"].as_str().unwrap()).collect();
    let before = actions.len();
    actions.dedup();
    assert_eq!(actions.len(), before);
}

/// Simulated remediation appends to the log and advances open to triaged.
#[tokio::test]
async fn test_simulate_remediation() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let id = store.list_incidents().await[0].id;

    let payload = json!({ "action": "disable_account", "actor": "jordan" });
    let (status, body): (StatusCode, Value) = send_request(
        app,
        post_json_request(
            &format!("/api/incidents/{}/remediate", id),
            &payload.to_string(),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "triaged");

    let incident = store.get_incident(id).await.unwrap();
    assert_eq!(incident.remediation_log.len(), 1);
    assert_eq!(incident.remediation_log[0].action, "disable_account");
    assert_eq!(incident.remediation_log[0].actor, "jordan");
}

/// Export wraps the full incident detail with an export timestamp.
#[tokio::test]
async fn test_export_incident() {
    let (app, store) = create_test_router();
    seed_alert(&store, 0, "ssh_bruteforce", Severity::High, Some("alice"), None).await;
    store.rebuild().await.unwrap();
    let id = store.list_incidents().await[0].id;

    let (status, body): (StatusCode, Value) = send_request(
        app,
        get_request(&format!("/api/incidents/{}/export", id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("exported_at").is_some());
    // The incident detail is flattened into the export document.
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["alerts"].as_array().unwrap().len(), 1);
}
