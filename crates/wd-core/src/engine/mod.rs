//! The correlation and risk-scoring pipeline.
//!
//! One `correlate` call is one rebuild pass: cluster the full alert pool
//! into candidates, aggregate each candidate's features, score risk and
//! confidence, map ATT&CK techniques, render the title and summary, and
//! merge analyst-owned fields from the previous incident set. The pass is a
//! pure function of its inputs; all I/O and locking live in the store.

pub mod cluster;
pub mod explain;
pub mod features;
pub mod mitre;
pub mod scorer;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::alert::Alert;
use crate::config::CorrelationConfig;
use crate::incident::{AnalystVerdict, Incident, IncidentStatus};
use features::GroupFeatures;

/// Counters reported after a rebuild pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildStats {
    /// Incidents in the new set.
    pub incidents: usize,
    /// Incidents that kept their identity from the previous set and
    /// carried their analyst-owned fields over.
    pub preserved: usize,
}

/// Runs one full correlation pass over the alert pool.
///
/// `previous` supplies analyst-owned fields keyed by incident id; any
/// incident re-derived under the same id keeps them. Incidents absent from
/// the new partition simply disappear, which also clears incidents whose
/// backing alert set became empty.
pub fn correlate(
    alerts: &[Alert],
    previous: &BTreeMap<Uuid, Incident>,
    config: &CorrelationConfig,
    now: DateTime<Utc>,
) -> Vec<Incident> {
    let candidates = cluster::cluster(alerts, config.clustering.window());
    let by_id: BTreeMap<u64, &Alert> = alerts.iter().map(|a| (a.id, a)).collect();

    let mut incidents = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let members: Vec<&Alert> = candidate
            .alert_ids
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect();
        let group = GroupFeatures::aggregate(&members);

        let risk = scorer::risk_score(&group, &config.scoring);
        let severity = scorer::severity_for_score(risk, &config.scoring);
        let confidence = scorer::confidence(&group, &config.confidence);
        let mappings = mitre::incident_mappings(group.alert_types.iter().map(String::as_str));
        let type_counts = count_types(&group, &members);
        let title = explain::build_title(&group, &type_counts);
        let summary = explain::summarize(&group, severity, risk, confidence);

        // The smallest alert id in the group anchors incident identity
        // across rebuilds.
        let min_alert_id = candidate.alert_ids.iter().copied().min().unwrap_or(0);
        let id = Incident::stable_id(min_alert_id);

        let mut incident = Incident {
            id,
            title,
            severity,
            risk_score: risk,
            confidence,
            summary,
            mitre: mappings,
            status: IncidentStatus::Open,
            analyst_verdict: AnalystVerdict::Unknown,
            analyst_notes: String::new(),
            remediation_log: Vec::new(),
            alert_ids: candidate.alert_ids,
            created_at: now,
            updated_at: now,
        };
        if let Some(prev) = previous.get(&id) {
            incident.adopt_analyst_fields(prev);
        }
        incidents.push(incident);
    }
    incidents
}

/// Per-type occurrence counts in first-seen order, for title templating.
fn count_types(group: &GroupFeatures, members: &[&Alert]) -> Vec<(String, usize)> {
    group
        .alert_types
        .iter()
        .map(|alert_type| {
            let count = members.iter().filter(|a| &a.alert_type == alert_type).count();
            (alert_type.clone(), count)
        })
        .collect()
}
