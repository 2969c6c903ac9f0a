//! Alert data model.
//!
//! Alerts are the raw input to the correlation engine. They are assigned an
//! id at ingestion and are immutable afterwards; every rebuild pass reads
//! the same alert records and only incident linkage changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity levels for alerts and incidents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Low severity
    Low,
    /// Medium severity
    Medium,
    /// High severity - requires attention
    High,
    /// Critical - immediate response required
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            other => Err(format!("invalid severity: {}", other)),
        }
    }
}

/// Value tier of the asset an alert fired on.
///
/// Higher tiers amplify the risk score of any incident touching the asset.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AssetTier {
    /// Ordinary workstation or service.
    #[default]
    Normal,
    /// Business-relevant system (shared infrastructure, admin jump hosts).
    Important,
    /// The assets the organization cannot afford to lose.
    CrownJewel,
}

impl std::fmt::Display for AssetTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetTier::Normal => write!(f, "normal"),
            AssetTier::Important => write!(f, "important"),
            AssetTier::CrownJewel => write!(f, "crown_jewel"),
        }
    }
}

impl std::str::FromStr for AssetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(AssetTier::Normal),
            "important" => Ok(AssetTier::Important),
            "crown_jewel" => Ok(AssetTier::CrownJewel),
            other => Err(format!("invalid asset tier: {}", other)),
        }
    }
}

/// A single ingested security event.
///
/// `user`, `host` and `ip` are identity fields used for correlation; absent
/// values stay `None` and are never treated as a shared entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    /// Unique id assigned at ingestion, monotonically increasing.
    pub id: u64,
    /// When the event occurred.
    pub ts: DateTime<Utc>,
    /// Detection system that produced the alert (ids, auth, cloud, endpoint).
    pub source: String,
    /// Alert type key, e.g. `ssh_bruteforce`.
    pub alert_type: String,
    /// Severity assigned by the detection source.
    pub severity: Severity,
    /// Human-readable event description.
    pub message: String,
    /// Implicated user account, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Implicated host, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Implicated ip address, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Tier of the affected asset.
    #[serde(default)]
    pub asset_tier: AssetTier,
    /// Raw payload from the detection source, kept verbatim for export.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub raw: serde_json::Value,
}

/// Alert fields supplied at ingestion, before an id has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlert {
    pub ts: DateTime<Utc>,
    pub source: String,
    pub alert_type: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub asset_tier: AssetTier,
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl Alert {
    /// Materializes an ingested alert under the given store-assigned id.
    pub fn from_new(id: u64, new: NewAlert) -> Self {
        Self {
            id,
            ts: new.ts,
            source: new.source,
            alert_type: new.alert_type,
            severity: new.severity,
            message: new.message,
            user: new.user,
            host: new.host,
            ip: new.ip,
            asset_tier: new.asset_tier,
            raw: new.raw,
        }
    }
}
