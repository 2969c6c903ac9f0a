//! Data Transfer Objects (DTOs) for API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use wd_core::{Alert, Incident, MitreMapping, PlaybookStep, RemediationEntry};

// ============================================================================
// Alert DTOs
// ============================================================================

/// Payload for ingesting one alert.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IngestAlertRequest {
    /// Event timestamp (RFC 3339).
    pub ts: DateTime<Utc>,
    /// Detection source, e.g. "ids", "auth", "cloud", "endpoint".
    #[validate(length(min = 1, max = 64))]
    pub source: String,
    /// Alert type key, e.g. "ssh_bruteforce".
    #[validate(length(min = 1, max = 128))]
    pub alert_type: String,
    /// One of: low, medium, high, critical.
    #[validate(length(min = 1, max = 32))]
    pub severity: String,
    /// Human-readable event description.
    #[validate(length(min = 1, max = 4096))]
    pub message: String,
    /// Implicated user, if known.
    #[serde(default)]
    pub user: Option<String>,
    /// Implicated host, if known.
    #[serde(default)]
    pub host: Option<String>,
    /// Implicated ip, if known.
    #[serde(default)]
    pub ip: Option<String>,
    /// One of: normal, important, crown_jewel. Defaults to normal.
    #[serde(default)]
    pub asset_tier: Option<String>,
    /// Raw payload from the detection source, kept verbatim.
    #[serde(default)]
    pub raw: Option<serde_json::Value>,
}

/// One alert in a response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AlertResponse {
    pub id: u64,
    pub ts: DateTime<Utc>,
    pub source: String,
    pub alert_type: String,
    pub severity: String,
    pub message: String,
    pub user: Option<String>,
    pub host: Option<String>,
    pub ip: Option<String>,
    pub asset_tier: String,
    /// Incident currently linking this alert, if any.
    pub incident_id: Option<Uuid>,
}

/// Converts a core alert to its response form.
pub fn alert_to_response(alert: Alert, incident_id: Option<Uuid>) -> AlertResponse {
    AlertResponse {
        id: alert.id,
        ts: alert.ts,
        source: alert.source,
        alert_type: alert.alert_type,
        severity: alert.severity.to_string(),
        message: alert.message,
        user: alert.user,
        host: alert.host,
        ip: alert.ip,
        asset_tier: alert.asset_tier.to_string(),
        incident_id,
    }
}

// ============================================================================
// Incident DTOs
// ============================================================================

/// One MITRE mapping in a response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MitreMappingResponse {
    pub tactic: String,
    pub technique_id: String,
    pub technique: String,
}

impl From<MitreMapping> for MitreMappingResponse {
    fn from(mapping: MitreMapping) -> Self {
        Self {
            tactic: mapping.tactic,
            technique_id: mapping.technique_id,
            technique: mapping.technique,
        }
    }
}

/// One remediation-log entry in a response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemediationEntryResponse {
    pub action: String,
    pub actor: String,
    pub ts: DateTime<Utc>,
}

impl From<RemediationEntry> for RemediationEntryResponse {
    fn from(entry: RemediationEntry) -> Self {
        Self {
            action: entry.action,
            actor: entry.actor,
            ts: entry.ts,
        }
    }
}

/// Response for a single incident.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncidentResponse {
    pub id: Uuid,
    pub title: String,
    pub severity: String,
    pub risk_score: f64,
    pub confidence: f64,
    pub summary: String,
    pub status: String,
    pub analyst_verdict: String,
    pub analyst_notes: String,
    pub mitre: Vec<MitreMappingResponse>,
    pub alert_ids: Vec<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detailed incident response with embedded alerts and remediation log.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IncidentDetailResponse {
    #[serde(flatten)]
    pub incident: IncidentResponse,
    pub alerts: Vec<AlertResponse>,
    pub remediation_log: Vec<RemediationEntryResponse>,
}

/// Converts a core incident to its response form.
pub fn incident_to_response(incident: Incident) -> IncidentResponse {
    IncidentResponse {
        id: incident.id,
        title: incident.title,
        severity: incident.severity.to_string(),
        risk_score: incident.risk_score,
        confidence: incident.confidence,
        summary: incident.summary,
        status: incident.status.to_string(),
        analyst_verdict: incident.analyst_verdict.to_string(),
        analyst_notes: incident.analyst_notes,
        mitre: incident.mitre.into_iter().map(Into::into).collect(),
        alert_ids: incident.alert_ids,
        created_at: incident.created_at,
        updated_at: incident.updated_at,
    }
}

/// Converts a core incident plus its alerts to the detail form.
pub fn incident_to_detail_response(incident: Incident, alerts: Vec<Alert>) -> IncidentDetailResponse {
    let incident_id = incident.id;
    let remediation_log = incident
        .remediation_log
        .iter()
        .cloned()
        .map(Into::into)
        .collect();
    IncidentDetailResponse {
        alerts: alerts
            .into_iter()
            .map(|a| alert_to_response(a, Some(incident_id)))
            .collect(),
        remediation_log,
        incident: incident_to_response(incident),
    }
}

/// Analyst-owned field updates. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateIncidentRequest {
    /// One of: open, triaged, closed.
    #[serde(default)]
    pub status: Option<String>,
    /// One of: unknown, true_positive, false_positive.
    #[serde(default)]
    pub analyst_verdict: Option<String>,
    /// Free-text analyst notes; replaces the previous value.
    #[serde(default)]
    #[validate(length(max = 65536))]
    pub analyst_notes: Option<String>,
}

/// Result of a rebuild pass.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RebuildResponse {
    /// Incidents in the rebuilt set.
    pub incidents: usize,
    /// Incidents that kept their identity and analyst fields.
    pub preserved: usize,
    /// Alerts examined.
    pub alerts: usize,
}

// ============================================================================
// Playbook and remediation DTOs
// ============================================================================

/// One recommended response step.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaybookStepResponse {
    pub action: String,
    pub description: String,
}

impl From<PlaybookStep> for PlaybookStepResponse {
    fn from(step: PlaybookStep) -> Self {
        Self {
            action: step.action.to_string(),
            description: step.description.to_string(),
        }
    }
}

/// Playbook for one incident.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaybookResponse {
    pub incident_id: Uuid,
    pub steps: Vec<PlaybookStepResponse>,
}

/// Request to record a simulated remediation.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RemediateRequest {
    /// Playbook action key, e.g. "block_destination".
    #[validate(length(min = 1, max = 128))]
    pub action: String,
    /// Who is simulating; defaults to "analyst".
    #[serde(default)]
    pub actor: Option<String>,
}

/// Exported incident document.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExportResponse {
    pub exported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub incident: IncidentDetailResponse,
}

// ============================================================================
// Health DTOs
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub alerts: usize,
    pub incidents: usize,
}
