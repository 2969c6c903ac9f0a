//! Incident data model.
//!
//! An incident is the persisted output of a rebuild pass: a scored,
//! explained grouping of one or more alerts. Automation-owned fields
//! (title, severity, risk_score, confidence, summary, mitre) are recomputed
//! on every rebuild; analyst-owned fields (status, verdict, notes,
//! remediation log) belong to the analyst and survive rebuilds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::alert::Severity;

/// Namespace for deriving stable incident ids from the backing alert set.
pub const INCIDENT_NAMESPACE: Uuid = Uuid::from_u128(0x8f1d_2c47_66a0_4b1e_9d3a_51c8_e07f_4ba2);

/// Analyst-facing lifecycle of an incident.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    /// Not yet worked.
    Open,
    /// An analyst has looked at it and taken or planned action.
    Triaged,
    /// Investigation finished.
    Closed,
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IncidentStatus::Open => write!(f, "open"),
            IncidentStatus::Triaged => write!(f, "triaged"),
            IncidentStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for IncidentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(IncidentStatus::Open),
            "triaged" => Ok(IncidentStatus::Triaged),
            "closed" => Ok(IncidentStatus::Closed),
            other => Err(format!("invalid status: {}", other)),
        }
    }
}

/// Analyst judgement about whether the incident is real.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalystVerdict {
    /// No judgement recorded yet.
    #[default]
    Unknown,
    /// Confirmed genuine malicious or problematic activity.
    TruePositive,
    /// Confirmed benign.
    FalsePositive,
}

impl std::fmt::Display for AnalystVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalystVerdict::Unknown => write!(f, "unknown"),
            AnalystVerdict::TruePositive => write!(f, "true_positive"),
            AnalystVerdict::FalsePositive => write!(f, "false_positive"),
        }
    }
}

impl std::str::FromStr for AnalystVerdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unknown" => Ok(AnalystVerdict::Unknown),
            "true_positive" => Ok(AnalystVerdict::TruePositive),
            "false_positive" => Ok(AnalystVerdict::FalsePositive),
            other => Err(format!("invalid verdict: {}", other)),
        }
    }
}

/// One (tactic, technique) pair mapped from an observed alert type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MitreMapping {
    /// ATT&CK tactic name, e.g. "Credential Access".
    pub tactic: String,
    /// Technique id, e.g. "T1110".
    pub technique_id: String,
    /// Technique name, e.g. "Brute Force".
    pub technique: String,
}

/// A simulated remediation recorded against an incident.
///
/// Watchdesk never executes real remediation; entries here document what an
/// analyst chose to simulate, for audit purposes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemediationEntry {
    /// Playbook action key, e.g. "block_ip".
    pub action: String,
    /// Who triggered the simulation.
    pub actor: String,
    /// When it was recorded.
    pub ts: DateTime<Utc>,
}

/// An analyst-facing, scored, explained grouping of one or more alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    /// Stable id, re-derived from the backing alert set on every rebuild.
    pub id: Uuid,
    /// Automation-generated headline.
    pub title: String,
    /// Severity label, a pure function of `risk_score`.
    pub severity: Severity,
    /// Automation-derived danger estimate in [0, 100].
    pub risk_score: f64,
    /// Automation-derived certainty in [0, 1] that the grouping is a
    /// genuine correlated event, independent of severity.
    pub confidence: f64,
    /// Deterministic natural-language explanation.
    pub summary: String,
    /// Deduplicated ATT&CK mappings in first-seen alert-type order.
    pub mitre: Vec<MitreMapping>,
    /// Analyst-owned lifecycle state.
    pub status: IncidentStatus,
    /// Analyst-owned verdict.
    pub analyst_verdict: AnalystVerdict,
    /// Analyst-owned free text.
    pub analyst_notes: String,
    /// Analyst-owned log of simulated remediations.
    pub remediation_log: Vec<RemediationEntry>,
    /// Linked alert ids in (timestamp, id) order. Never empty.
    pub alert_ids: Vec<u64>,
    /// When the incident was first derived.
    pub created_at: DateTime<Utc>,
    /// When the incident was last recomputed or edited.
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    /// Derives the stable incident id for a candidate.
    ///
    /// Keyed on the minimum alert id in the group so that an incident keeps
    /// its identity, and with it the analyst-owned fields, when later alerts
    /// join the same cluster.
    pub fn stable_id(min_alert_id: u64) -> Uuid {
        Uuid::new_v5(&INCIDENT_NAMESPACE, &min_alert_id.to_be_bytes())
    }

    /// Carries the analyst-owned fields over from a previous derivation of
    /// the same incident. Automation-owned fields are left as recomputed.
    pub fn adopt_analyst_fields(&mut self, previous: &Incident) {
        self.status = previous.status;
        self.analyst_verdict = previous.analyst_verdict;
        self.analyst_notes = previous.analyst_notes.clone();
        self.remediation_log = previous.remediation_log.clone();
        self.created_at = previous.created_at;
    }
}
