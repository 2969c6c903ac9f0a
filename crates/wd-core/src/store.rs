//! In-memory alert and incident store.
//!
//! The store is the explicit owner of all shared state: handlers receive an
//! `Arc<Store>` instead of reaching for globals. Rebuild follows a
//! single-writer contract: at most one pass runs at a time, the pass reads
//! a consistent snapshot, computes the new incident set outside any lock,
//! and swaps it in with one write. Readers never observe a half-updated
//! incident list, and a rebuild that fails to start leaves the previous set
//! untouched.

use chrono::Utc;
use std::collections::BTreeMap;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::alert::{Alert, NewAlert};
use crate::config::CorrelationConfig;
use crate::engine::{correlate, RebuildStats};
use crate::incident::{AnalystVerdict, Incident, IncidentStatus, RemediationEntry};

/// Store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A rebuild pass is already running. Retryable.
    #[error("rebuild already in progress")]
    RebuildInProgress,
    /// No incident under the given id.
    #[error("incident {0} not found")]
    IncidentNotFound(Uuid),
}

/// Analyst-owned field updates. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct AnalystUpdate {
    pub status: Option<IncidentStatus>,
    pub analyst_verdict: Option<AnalystVerdict>,
    pub analyst_notes: Option<String>,
}

#[derive(Default)]
struct StoreInner {
    alerts: BTreeMap<u64, Alert>,
    incidents: BTreeMap<Uuid, Incident>,
    next_alert_id: u64,
}

/// Shared alert and incident store.
pub struct Store {
    inner: RwLock<StoreInner>,
    /// Held for the duration of one rebuild pass. `try_lock` failure is the
    /// "rebuild already in progress" condition.
    rebuild_gate: Mutex<()>,
    config: CorrelationConfig,
}

impl Store {
    /// Creates an empty store with the given engine configuration.
    pub fn new(config: CorrelationConfig) -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                next_alert_id: 1,
                ..StoreInner::default()
            }),
            rebuild_gate: Mutex::new(()),
            config,
        }
    }

    /// The engine configuration this store rebuilds with.
    pub fn config(&self) -> &CorrelationConfig {
        &self.config
    }

    /// Ingests one alert, assigning the next id. Alerts are immutable from
    /// here on; they join incidents only through a rebuild.
    pub async fn ingest_alert(&self, new: NewAlert) -> Alert {
        let mut inner = self.inner.write().await;
        let id = inner.next_alert_id;
        inner.next_alert_id += 1;
        let alert = Alert::from_new(id, new);
        debug!(alert_id = id, alert_type = %alert.alert_type, "alert ingested");
        inner.alerts.insert(id, alert.clone());
        alert
    }

    /// All alerts, newest first.
    pub async fn list_alerts(&self) -> Vec<Alert> {
        let inner = self.inner.read().await;
        let mut alerts: Vec<Alert> = inner.alerts.values().cloned().collect();
        alerts.sort_by(|a, b| b.ts.cmp(&a.ts).then(b.id.cmp(&a.id)));
        alerts
    }

    /// Number of ingested alerts.
    pub async fn alert_count(&self) -> usize {
        self.inner.read().await.alerts.len()
    }

    /// All incidents, newest first.
    pub async fn list_incidents(&self) -> Vec<Incident> {
        let inner = self.inner.read().await;
        let mut incidents: Vec<Incident> = inner.incidents.values().cloned().collect();
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        incidents
    }

    /// One incident by id.
    pub async fn get_incident(&self, id: Uuid) -> Option<Incident> {
        self.inner.read().await.incidents.get(&id).cloned()
    }

    /// The alerts linked to an incident, in the incident's (timestamp, id)
    /// order.
    pub async fn incident_alerts(&self, incident: &Incident) -> Vec<Alert> {
        let inner = self.inner.read().await;
        incident
            .alert_ids
            .iter()
            .filter_map(|id| inner.alerts.get(id).cloned())
            .collect()
    }

    /// Reverse index from alert id to the incident currently linking it.
    /// Alerts not yet swept into an incident by a rebuild are absent.
    pub async fn alert_incident_index(&self) -> BTreeMap<u64, Uuid> {
        let inner = self.inner.read().await;
        let mut index = BTreeMap::new();
        for incident in inner.incidents.values() {
            for alert_id in &incident.alert_ids {
                index.insert(*alert_id, incident.id);
            }
        }
        index
    }

    /// Applies analyst-owned field updates to an incident.
    pub async fn update_incident(
        &self,
        id: Uuid,
        update: AnalystUpdate,
    ) -> Result<Incident, StoreError> {
        let mut inner = self.inner.write().await;
        let incident = inner
            .incidents
            .get_mut(&id)
            .ok_or(StoreError::IncidentNotFound(id))?;
        if let Some(status) = update.status {
            incident.status = status;
        }
        if let Some(verdict) = update.analyst_verdict {
            incident.analyst_verdict = verdict;
        }
        if let Some(notes) = update.analyst_notes {
            incident.analyst_notes = notes;
        }
        incident.updated_at = Utc::now();
        Ok(incident.clone())
    }

    /// Records a simulated remediation against an incident and advances an
    /// open incident to triaged. Nothing is executed anywhere.
    pub async fn record_remediation(
        &self,
        id: Uuid,
        action: &str,
        actor: &str,
    ) -> Result<Incident, StoreError> {
        let mut inner = self.inner.write().await;
        let incident = inner
            .incidents
            .get_mut(&id)
            .ok_or(StoreError::IncidentNotFound(id))?;
        incident.remediation_log.push(RemediationEntry {
            action: action.to_string(),
            actor: actor.to_string(),
            ts: Utc::now(),
        });
        if incident.status == IncidentStatus::Open {
            incident.status = IncidentStatus::Triaged;
        }
        incident.updated_at = Utc::now();
        info!(incident_id = %id, action, "simulated remediation recorded");
        Ok(incident.clone())
    }

    /// Runs one rebuild pass over the full alert pool.
    ///
    /// All-or-nothing: the new incident set replaces the old one in a
    /// single write, with analyst-owned fields carried over for incidents
    /// that kept their identity. Returns `RebuildInProgress` if another
    /// pass holds the gate.
    pub async fn rebuild(&self) -> Result<RebuildStats, StoreError> {
        let _gate = self
            .rebuild_gate
            .try_lock()
            .map_err(|_| StoreError::RebuildInProgress)?;

        // Consistent snapshot; correlation runs without holding any lock.
        let (alerts, previous) = {
            let inner = self.inner.read().await;
            (
                inner.alerts.values().cloned().collect::<Vec<_>>(),
                inner.incidents.clone(),
            )
        };

        let incidents = correlate(&alerts, &previous, &self.config, Utc::now());
        let stats = RebuildStats {
            incidents: incidents.len(),
            preserved: incidents
                .iter()
                .filter(|i| previous.contains_key(&i.id))
                .count(),
        };

        let mut inner = self.inner.write().await;
        inner.incidents = incidents.into_iter().map(|i| (i.id, i)).collect();

        info!(
            incidents = stats.incidents,
            preserved = stats.preserved,
            alerts = alerts.len(),
            "rebuild complete"
        );
        Ok(stats)
    }
}
