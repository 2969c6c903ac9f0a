//! Alert ingestion and listing endpoints.
//!
//! Malformed payloads are rejected here at the boundary; the correlation
//! engine itself only ever sees well-formed alerts and degrades missing
//! optional fields to sentinels.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::dto::{alert_to_response, AlertResponse, IngestAlertRequest};
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;
use wd_core::{AssetTier, NewAlert, Severity};

/// Creates alert routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(ingest_alert))
        .route("/", get(list_alerts))
}

/// Ingest one alert.
#[utoipa::path(
    post,
    path = "/api/alerts",
    request_body = IngestAlertRequest,
    responses(
        (status = 201, description = "Alert stored", body = AlertResponse),
        (status = 400, description = "Invalid payload", body = ErrorResponse)
    ),
    tag = "Alerts"
)]
pub(crate) async fn ingest_alert(
    State(state): State<AppState>,
    Json(payload): Json<IngestAlertRequest>,
) -> Result<(StatusCode, Json<AlertResponse>), ApiError> {
    payload.validate()?;

    let severity: Severity = payload
        .severity
        .parse()
        .map_err(ApiError::BadRequest)?;
    let asset_tier: AssetTier = match payload.asset_tier.as_deref() {
        Some(tier) => tier.parse().map_err(ApiError::BadRequest)?,
        None => AssetTier::default(),
    };

    let alert = state
        .store
        .ingest_alert(NewAlert {
            ts: payload.ts,
            source: payload.source,
            alert_type: payload.alert_type,
            severity,
            message: payload.message,
            user: payload.user,
            host: payload.host,
            ip: payload.ip,
            asset_tier,
            raw: payload.raw.unwrap_or(serde_json::Value::Null),
        })
        .await;

    Ok((StatusCode::CREATED, Json(alert_to_response(alert, None))))
}

/// List all alerts, newest first.
#[utoipa::path(
    get,
    path = "/api/alerts",
    responses(
        (status = 200, description = "All alerts", body = [AlertResponse])
    ),
    tag = "Alerts"
)]
pub(crate) async fn list_alerts(State(state): State<AppState>) -> Json<Vec<AlertResponse>> {
    let index = state.store.alert_incident_index().await;
    let alerts = state.store.list_alerts().await;
    Json(
        alerts
            .into_iter()
            .map(|a| {
                let incident_id = index.get(&a.id).copied();
                alert_to_response(a, incident_id)
            })
            .collect(),
    )
}
