//! Risk scoring and grouping-confidence estimation.
//!
//! Both functions are pure and total over the aggregated feature set. Risk
//! answers "how dangerous is this if real"; confidence answers "how sure are
//! we the grouping is a real correlated event". The two are deliberately
//! decoupled so analysts can distinguish "likely dangerous, but uncertain"
//! from "confirmed, dangerous".

use crate::alert::Severity;
use crate::config::{ConfidenceConfig, ScoringConfig};
use crate::engine::features::GroupFeatures;

/// Computes the 0-100 risk score for a candidate group.
///
/// Weighted sum of interpretable factors: base from the single worst alert,
/// escalation bonus per extra distinct alert type (varied attack signals),
/// blast-radius bonus per extra distinct entity, amplified by the worst
/// affected asset tier. Clamped to [0, 100].
pub fn risk_score(features: &GroupFeatures, config: &ScoringConfig) -> f64 {
    let base = config.severity_base(features.max_severity);

    let extra_types = features
        .alert_types
        .len()
        .saturating_sub(1)
        .min(config.type_diversity_cap);
    let escalation = config.type_diversity_bonus * extra_types as f64;

    let extra_entities = features
        .distinct_entities()
        .saturating_sub(1)
        .min(config.blast_radius_cap);
    let blast_radius = config.blast_radius_bonus * extra_entities as f64;

    let amplified = (base + escalation + blast_radius) * config.tier_multiplier(features.max_tier);
    amplified.clamp(0.0, 100.0)
}

/// Derives the severity label from a risk score.
///
/// Severity is never computed independently of the score, so the two can
/// never disagree.
pub fn severity_for_score(score: f64, config: &ScoringConfig) -> Severity {
    if score >= config.critical_threshold {
        Severity::Critical
    } else if score >= config.high_threshold {
        Severity::High
    } else if score >= config.medium_threshold {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Estimates the 0-1 confidence that the grouping is a genuine correlated
/// event rather than coincidental co-occurrence.
///
/// Grows only with corroboration: more alerts, more agreeing sources, more
/// distinct alert types. Severity does not appear anywhere in this
/// computation.
pub fn confidence(features: &GroupFeatures, config: &ConfidenceConfig) -> f64 {
    let corroborating = features
        .alert_count
        .saturating_sub(1)
        .min(config.corroboration_cap);
    let extra_sources = features
        .sources
        .len()
        .saturating_sub(1)
        .min(config.source_agreement_cap);
    let extra_types = features
        .alert_types
        .len()
        .saturating_sub(1)
        .min(config.type_agreement_cap);

    let estimate = config.base
        + config.corroboration_bonus * corroborating as f64
        + config.source_agreement_bonus * extra_sources as f64
        + config.type_agreement_bonus * extra_types as f64;

    estimate.clamp(config.floor, config.ceiling)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AssetTier;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn features(
        alert_count: usize,
        max_severity: Severity,
        max_tier: AssetTier,
        types: &[&str],
        sources: &[&str],
        entities: usize,
    ) -> GroupFeatures {
        let ts = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        GroupFeatures {
            alert_count,
            max_severity,
            max_tier,
            users: (0..entities).map(|i| format!("user-{i}")).collect(),
            hosts: BTreeSet::new(),
            ips: BTreeSet::new(),
            alert_types: types.iter().map(|t| t.to_string()).collect(),
            sources: sources.iter().map(|s| s.to_string()).collect(),
            first_ts: ts,
            last_ts: ts,
        }
    }

    #[test]
    fn score_stays_in_range() {
        let config = ScoringConfig::default();
        let maxed = features(
            10,
            Severity::Critical,
            AssetTier::CrownJewel,
            &["a", "b", "c", "d", "e", "f"],
            &["ids", "auth", "cloud"],
            12,
        );
        let score = risk_score(&maxed, &config);
        assert!((0.0..=100.0).contains(&score));
        assert_eq!(score, 100.0);

        let minimal = features(1, Severity::Low, AssetTier::Normal, &["a"], &["ids"], 0);
        let score = risk_score(&minimal, &config);
        assert!((0.0..=100.0).contains(&score));
        assert!(score < 30.0);
    }

    #[test]
    fn severity_label_matches_threshold_buckets() {
        let config = ScoringConfig::default();
        assert_eq!(severity_for_score(85.0, &config), Severity::Critical);
        assert_eq!(severity_for_score(84.9, &config), Severity::High);
        assert_eq!(severity_for_score(60.0, &config), Severity::High);
        assert_eq!(severity_for_score(59.9, &config), Severity::Medium);
        assert_eq!(severity_for_score(30.0, &config), Severity::Medium);
        assert_eq!(severity_for_score(29.9, &config), Severity::Low);
        assert_eq!(severity_for_score(0.0, &config), Severity::Low);
    }

    #[test]
    fn type_diversity_raises_risk() {
        let config = ScoringConfig::default();
        let narrow = features(3, Severity::High, AssetTier::Normal, &["a"], &["ids"], 2);
        let varied = features(3, Severity::High, AssetTier::Normal, &["a", "b", "c"], &["ids"], 2);
        assert!(risk_score(&varied, &config) > risk_score(&narrow, &config));
    }

    #[test]
    fn crown_jewel_amplifies_risk() {
        let config = ScoringConfig::default();
        let normal = features(2, Severity::High, AssetTier::Normal, &["a"], &["ids"], 2);
        let jewel = features(2, Severity::High, AssetTier::CrownJewel, &["a"], &["ids"], 2);
        assert!(risk_score(&jewel, &config) > risk_score(&normal, &config));
    }

    #[test]
    fn confidence_ignores_severity() {
        let config = ConfidenceConfig::default();
        let low = features(2, Severity::Low, AssetTier::Normal, &["a"], &["ids"], 1);
        let critical = features(2, Severity::Critical, AssetTier::Normal, &["a"], &["ids"], 1);
        assert_eq!(confidence(&low, &config), confidence(&critical, &config));
    }

    #[test]
    fn singleton_critical_scores_below_corroborated_group() {
        // High risk with low confidence must be representable: a lone
        // critical alert is dangerous if real, but unconfirmed.
        let scoring = ScoringConfig::default();
        let conf_config = ConfidenceConfig::default();
        let singleton = features(1, Severity::Critical, AssetTier::Normal, &["a"], &["ids"], 1);
        let corroborated = features(
            3,
            Severity::Critical,
            AssetTier::Normal,
            &["a", "b"],
            &["ids", "auth"],
            1,
        );
        assert!(risk_score(&singleton, &scoring) >= scoring.base_critical);
        assert!(confidence(&singleton, &conf_config) < confidence(&corroborated, &conf_config));
    }

    #[test]
    fn confidence_stays_clamped() {
        let config = ConfidenceConfig::default();
        let maxed = features(
            50,
            Severity::Low,
            AssetTier::Normal,
            &["a", "b", "c", "d", "e"],
            &["ids", "auth", "cloud", "endpoint", "dns"],
            5,
        );
        let c = confidence(&maxed, &config);
        assert!(c <= config.ceiling);
        assert!(c >= config.floor);
    }
}
