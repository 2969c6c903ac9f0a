//! Engine policy constants.
//!
//! Every correlation and scoring knob is an explicit named value. Nothing in
//! the engine is learned or tuned at runtime, so an analyst can always
//! reconstruct why a score came out the way it did from this file and the
//! incident's feature set alone.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::alert::{AssetTier, Severity};

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Clustering window and identity settings.
    #[serde(default)]
    pub clustering: ClusteringConfig,
    /// Risk score weights and severity thresholds.
    #[serde(default)]
    pub scoring: ScoringConfig,
    /// Confidence estimation weights.
    #[serde(default)]
    pub confidence: ConfidenceConfig,
}

/// Clustering policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Maximum time span of one incident candidate, in minutes. Measured
    /// from the earliest alert in the forming group, not between
    /// consecutive alerts, so a slow drip of alerts cannot chain into an
    /// unbounded incident.
    pub window_minutes: i64,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self { window_minutes: 30 }
    }
}

impl ClusteringConfig {
    /// The correlation window as a duration.
    pub fn window(&self) -> Duration {
        Duration::minutes(self.window_minutes)
    }
}

/// Risk score weights.
///
/// The score is a weighted sum of interpretable factors: a base from the
/// single highest-severity alert, an escalation bonus for distinct alert
/// types, a blast-radius bonus for distinct affected entities, and an
/// asset-tier multiplier. Clamped to [0, 100].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Base score for a group whose worst alert is low severity.
    pub base_low: f64,
    /// Base score for medium.
    pub base_medium: f64,
    /// Base score for high.
    pub base_high: f64,
    /// Base score for critical.
    pub base_critical: f64,
    /// Bonus per distinct alert type beyond the first.
    pub type_diversity_bonus: f64,
    /// Cap on counted extra alert types.
    pub type_diversity_cap: usize,
    /// Bonus per distinct affected entity beyond the first.
    pub blast_radius_bonus: f64,
    /// Cap on counted extra entities.
    pub blast_radius_cap: usize,
    /// Multiplier when the worst affected asset is `Important`.
    pub tier_multiplier_important: f64,
    /// Multiplier when the worst affected asset is `CrownJewel`.
    pub tier_multiplier_crown_jewel: f64,
    /// risk_score at or above this is labeled critical.
    pub critical_threshold: f64,
    /// ... high.
    pub high_threshold: f64,
    /// ... medium; anything below is low.
    pub medium_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_low: 20.0,
            base_medium: 40.0,
            base_high: 65.0,
            base_critical: 90.0,
            type_diversity_bonus: 6.0,
            type_diversity_cap: 4,
            blast_radius_bonus: 4.0,
            blast_radius_cap: 5,
            tier_multiplier_important: 1.15,
            tier_multiplier_crown_jewel: 1.3,
            critical_threshold: 85.0,
            high_threshold: 60.0,
            medium_threshold: 30.0,
        }
    }
}

impl ScoringConfig {
    /// Base score contributed by the group's worst alert.
    pub fn severity_base(&self, severity: Severity) -> f64 {
        match severity {
            Severity::Low => self.base_low,
            Severity::Medium => self.base_medium,
            Severity::High => self.base_high,
            Severity::Critical => self.base_critical,
        }
    }

    /// Amplification for the worst affected asset tier.
    pub fn tier_multiplier(&self, tier: AssetTier) -> f64 {
        match tier {
            AssetTier::Normal => 1.0,
            AssetTier::Important => self.tier_multiplier_important,
            AssetTier::CrownJewel => self.tier_multiplier_crown_jewel,
        }
    }
}

/// Confidence estimation weights.
///
/// Confidence is deliberately independent of severity: it only grows with
/// corroborating signal, so a lone critical alert reads as "dangerous if
/// real, but unconfirmed".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Confidence of an uncorroborated singleton.
    pub base: f64,
    /// Bonus per corroborating alert beyond the first.
    pub corroboration_bonus: f64,
    /// Cap on counted corroborating alerts.
    pub corroboration_cap: usize,
    /// Bonus per distinct alert source beyond the first.
    pub source_agreement_bonus: f64,
    /// Cap on counted extra sources.
    pub source_agreement_cap: usize,
    /// Bonus per distinct alert type beyond the first.
    pub type_agreement_bonus: f64,
    /// Cap on counted extra types.
    pub type_agreement_cap: usize,
    /// Lower clamp.
    pub floor: f64,
    /// Upper clamp; never report certainty.
    pub ceiling: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            base: 0.30,
            corroboration_bonus: 0.12,
            corroboration_cap: 3,
            source_agreement_bonus: 0.08,
            source_agreement_cap: 3,
            type_agreement_bonus: 0.06,
            type_agreement_cap: 3,
            floor: 0.05,
            ceiling: 0.98,
        }
    }
}
