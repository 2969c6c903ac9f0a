//! Incident endpoints: listing, detail, analyst updates, the rebuild
//! trigger, playbook lookup, simulated remediation, and export.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::{
    incident_to_detail_response, incident_to_response, ExportResponse, IncidentDetailResponse,
    IncidentResponse, PlaybookResponse, PlaybookStepResponse, RebuildResponse, RemediateRequest,
    UpdateIncidentRequest,
};
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;
use wd_core::playbook;
use wd_core::store::AnalystUpdate;
use wd_core::{AnalystVerdict, Incident, IncidentStatus};

/// Creates incident routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_incidents))
        .route("/rebuild", post(rebuild_incidents))
        .route("/:id", get(get_incident))
        .route("/:id", patch(update_incident))
        .route("/:id/playbook", get(get_playbook))
        .route("/:id/remediate", post(simulate_remediation))
        .route("/:id/export", get(export_incident))
}

pub(crate) async fn fetch_incident(state: &AppState, id: Uuid) -> Result<Incident, ApiError> {
    state
        .store
        .get_incident(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Incident {} not found", id)))
}

/// List incidents, newest first.
#[utoipa::path(
    get,
    path = "/api/incidents",
    responses(
        (status = 200, description = "All incidents", body = [IncidentResponse])
    ),
    tag = "Incidents"
)]
pub(crate) async fn list_incidents(State(state): State<AppState>) -> Json<Vec<IncidentResponse>> {
    let incidents = state.store.list_incidents().await;
    Json(incidents.into_iter().map(incident_to_response).collect())
}

/// Rebuild incidents from the full alert pool.
///
/// Analyst-triggered only; reprocesses every alert in one all-or-nothing
/// pass. At most one rebuild runs at a time.
#[utoipa::path(
    post,
    path = "/api/incidents/rebuild",
    responses(
        (status = 200, description = "Rebuild complete", body = RebuildResponse),
        (status = 409, description = "Rebuild already in progress", body = ErrorResponse)
    ),
    tag = "Incidents"
)]
pub(crate) async fn rebuild_incidents(
    State(state): State<AppState>,
) -> Result<Json<RebuildResponse>, ApiError> {
    let alerts = state.store.alert_count().await;
    let stats = state.store.rebuild().await?;
    Ok(Json(RebuildResponse {
        incidents: stats.incidents,
        preserved: stats.preserved,
        alerts,
    }))
}

/// Get one incident with its alerts.
#[utoipa::path(
    get,
    path = "/api/incidents/{id}",
    params(("id" = Uuid, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Incident details", body = IncidentDetailResponse),
        (status = 404, description = "Incident not found", body = ErrorResponse)
    ),
    tag = "Incidents"
)]
pub(crate) async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IncidentDetailResponse>, ApiError> {
    let incident = fetch_incident(&state, id).await?;
    let alerts = state.store.incident_alerts(&incident).await;
    Ok(Json(incident_to_detail_response(incident, alerts)))
}

/// Update analyst-owned fields on an incident.
#[utoipa::path(
    patch,
    path = "/api/incidents/{id}",
    params(("id" = Uuid, Path, description = "Incident ID")),
    request_body = UpdateIncidentRequest,
    responses(
        (status = 200, description = "Updated incident", body = IncidentResponse),
        (status = 400, description = "Invalid field value", body = ErrorResponse),
        (status = 404, description = "Incident not found", body = ErrorResponse)
    ),
    tag = "Incidents"
)]
pub(crate) async fn update_incident(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateIncidentRequest>,
) -> Result<Json<IncidentResponse>, ApiError> {
    payload.validate()?;

    let status: Option<IncidentStatus> = payload
        .status
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let analyst_verdict: Option<AnalystVerdict> = payload
        .analyst_verdict
        .as_deref()
        .map(str::parse)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let incident = state
        .store
        .update_incident(
            id,
            AnalystUpdate {
                status,
                analyst_verdict,
                analyst_notes: payload.analyst_notes,
            },
        )
        .await?;
    Ok(Json(incident_to_response(incident)))
}

/// Get the response playbook for an incident.
///
/// Steps are looked up per observed alert type and deduplicated by action.
#[utoipa::path(
    get,
    path = "/api/incidents/{id}/playbook",
    params(("id" = Uuid, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Recommended steps", body = PlaybookResponse),
        (status = 404, description = "Incident not found", body = ErrorResponse)
    ),
    tag = "Incidents"
)]
pub(crate) async fn get_playbook(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PlaybookResponse>, ApiError> {
    let incident = fetch_incident(&state, id).await?;
    let alerts = state.store.incident_alerts(&incident).await;

    // First-seen alert-type order, matching the engine's feature ordering.
    let mut alert_types: Vec<&str> = Vec::new();
    for alert in &alerts {
        if !alert_types.contains(&alert.alert_type.as_str()) {
            alert_types.push(&alert.alert_type);
        }
    }

    let steps: Vec<PlaybookStepResponse> = playbook::incident_steps(alert_types)
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(PlaybookResponse {
        incident_id: id,
        steps,
    }))
}

/// Record a simulated remediation against an incident.
///
/// Nothing is executed anywhere; the action is appended to the incident's
/// remediation log and an open incident advances to triaged.
#[utoipa::path(
    post,
    path = "/api/incidents/{id}/remediate",
    params(("id" = Uuid, Path, description = "Incident ID")),
    request_body = RemediateRequest,
    responses(
        (status = 200, description = "Remediation recorded", body = IncidentResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Incident not found", body = ErrorResponse)
    ),
    tag = "Incidents"
)]
pub(crate) async fn simulate_remediation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RemediateRequest>,
) -> Result<Json<IncidentResponse>, ApiError> {
    payload.validate()?;
    let actor = payload.actor.as_deref().unwrap_or("analyst");
    let incident = state
        .store
        .record_remediation(id, &payload.action, actor)
        .await?;
    Ok(Json(incident_to_response(incident)))
}

/// Export one incident as a self-contained document.
#[utoipa::path(
    get,
    path = "/api/incidents/{id}/export",
    params(("id" = Uuid, Path, description = "Incident ID")),
    responses(
        (status = 200, description = "Exported incident", body = ExportResponse),
        (status = 404, description = "Incident not found", body = ErrorResponse)
    ),
    tag = "Incidents"
)]
pub(crate) async fn export_incident(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ExportResponse>), ApiError> {
    let incident = fetch_incident(&state, id).await?;
    let alerts = state.store.incident_alerts(&incident).await;
    Ok((
        StatusCode::OK,
        Json(ExportResponse {
            exported_at: Utc::now(),
            incident: incident_to_detail_response(incident, alerts),
        }),
    ))
}
