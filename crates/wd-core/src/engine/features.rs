//! Entity extraction and group-level feature aggregation.
//!
//! `extract` pulls the normalized identity tuple out of one alert;
//! `GroupFeatures::aggregate` re-aggregates those tuples over a candidate
//! group. Both are total: missing fields degrade to the unset sentinel
//! (`None`), never to an error and never to an empty string masquerading as
//! a real value.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::alert::{Alert, AssetTier, Severity};

/// Normalized identity tuple for a single alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertFeatures<'a> {
    pub user: Option<&'a str>,
    pub host: Option<&'a str>,
    pub ip: Option<&'a str>,
    pub alert_type: &'a str,
    pub severity: Severity,
    pub ts: DateTime<Utc>,
}

/// Extracts the normalized feature tuple from one alert.
///
/// Empty and whitespace-only strings normalize to `None`: two alerts that
/// both lack an ip must not be treated as sharing one.
pub fn extract(alert: &Alert) -> AlertFeatures<'_> {
    AlertFeatures {
        user: normalize(alert.user.as_deref()),
        host: normalize(alert.host.as_deref()),
        ip: normalize(alert.ip.as_deref()),
        alert_type: alert.alert_type.as_str(),
        severity: alert.severity,
        ts: alert.ts,
    }
}

fn normalize(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Aggregated features of one incident candidate.
///
/// This is the sole input to the risk scorer, the confidence estimator and
/// the explainer, which keeps all three pure and independently testable.
#[derive(Debug, Clone)]
pub struct GroupFeatures {
    /// Number of alerts in the group.
    pub alert_count: usize,
    /// Worst severity present.
    pub max_severity: Severity,
    /// Worst affected asset tier.
    pub max_tier: AssetTier,
    /// Distinct non-sentinel users, sorted.
    pub users: BTreeSet<String>,
    /// Distinct non-sentinel hosts, sorted.
    pub hosts: BTreeSet<String>,
    /// Distinct non-sentinel ips, sorted.
    pub ips: BTreeSet<String>,
    /// Distinct alert types in first-seen order.
    pub alert_types: Vec<String>,
    /// Distinct alert sources in first-seen order.
    pub sources: Vec<String>,
    /// Earliest alert timestamp.
    pub first_ts: DateTime<Utc>,
    /// Latest alert timestamp.
    pub last_ts: DateTime<Utc>,
}

impl GroupFeatures {
    /// Aggregates features over a non-empty group of alerts.
    ///
    /// Callers pass alerts in (timestamp, id) order; first-seen orderings
    /// below inherit that determinism.
    pub fn aggregate(alerts: &[&Alert]) -> Self {
        debug_assert!(!alerts.is_empty(), "candidate groups are never empty");

        let mut users = BTreeSet::new();
        let mut hosts = BTreeSet::new();
        let mut ips = BTreeSet::new();
        let mut alert_types: Vec<String> = Vec::new();
        let mut sources: Vec<String> = Vec::new();
        let mut max_severity = Severity::Low;
        let mut max_tier = AssetTier::Normal;
        let mut first_ts = alerts[0].ts;
        let mut last_ts = alerts[0].ts;

        for alert in alerts {
            let features = extract(alert);
            if let Some(user) = features.user {
                users.insert(user.to_string());
            }
            if let Some(host) = features.host {
                hosts.insert(host.to_string());
            }
            if let Some(ip) = features.ip {
                ips.insert(ip.to_string());
            }
            if !alert_types.iter().any(|t| t == &alert.alert_type) {
                alert_types.push(alert.alert_type.clone());
            }
            if !sources.iter().any(|s| s == &alert.source) {
                sources.push(alert.source.clone());
            }
            max_severity = max_severity.max(features.severity);
            max_tier = max_tier.max(alert.asset_tier);
            first_ts = first_ts.min(alert.ts);
            last_ts = last_ts.max(alert.ts);
        }

        Self {
            alert_count: alerts.len(),
            max_severity,
            max_tier,
            users,
            hosts,
            ips,
            alert_types,
            sources,
            first_ts,
            last_ts,
        }
    }

    /// Count of distinct affected entities across users, hosts and ips.
    pub fn distinct_entities(&self) -> usize {
        self.users.len() + self.hosts.len() + self.ips.len()
    }

    /// Time covered by the group.
    pub fn span(&self) -> chrono::Duration {
        self.last_ts - self.first_ts
    }
}
