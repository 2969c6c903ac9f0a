//! Deterministic title and summary templating.
//!
//! Everything here is a pure function of the incident's final feature set.
//! No randomness and no generative calls: rebuilding the same alert set
//! must yield a byte-identical title and summary, which analysts rely on
//! when diffing incidents across rebuilds.

use chrono::Duration;

use crate::alert::Severity;
use crate::engine::cluster::EntityKind;
use crate::engine::features::GroupFeatures;
use crate::playbook;

/// Maximum number of next actions quoted in a summary.
const MAX_SUMMARY_ACTIONS: usize = 6;

/// One-line analyst hint for a known alert type.
fn attack_hint(alert_type: &str) -> &'static str {
    match alert_type {
        "ssh_bruteforce" => {
            "Repeated SSH authentication failures may indicate brute force against the account"
        }
        "multiple_failed_logins" => {
            "Repeated login failures may indicate brute force or password spraying"
        }
        "impossible_travel" => {
            "A login from an unusual region may indicate stolen credentials or VPN misuse"
        }
        "iam_key_created" => {
            "A new cloud access key can indicate credential abuse or persistence"
        }
        "suspicious_powershell" => {
            "Suspicious PowerShell execution may indicate living-off-the-land techniques"
        }
        "c2_outbound" => {
            "Outbound traffic to suspicious infrastructure may indicate command-and-control activity"
        }
        "s3_public" => "Public storage exposure is a common data leak misconfiguration",
        "port_scan" => "Broad port scanning often precedes targeted exploitation",
        "dns_exfil" => "High-volume or unusual DNS queries may indicate exfiltration over DNS",
        _ => "Suspicious activity that may require investigation",
    }
}

/// Turns an alert type key into a headline fragment: `ssh_bruteforce`
/// becomes `Ssh Bruteforce`.
fn humanize(alert_type: &str) -> String {
    alert_type
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders a time span for humans. Sub-minute spans collapse to a fixed
/// phrase so title/summary output stays stable under second-level jitter
/// in test fixtures.
fn format_span(span: Duration) -> String {
    let minutes = span.num_minutes();
    if minutes < 1 {
        "under a minute".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}

/// Dominant alert type: the most frequent one, first-seen on ties.
fn dominant_type<'a>(features: &'a GroupFeatures, type_counts: &[(String, usize)]) -> &'a str {
    let mut best: Option<(&str, usize)> = None;
    for alert_type in &features.alert_types {
        let count = type_counts
            .iter()
            .find(|(t, _)| t == alert_type)
            .map(|(_, c)| *c)
            .unwrap_or(0);
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((alert_type, count)),
        }
    }
    best.map(|(t, _)| t).unwrap_or("")
}

/// Builds the incident headline, e.g.
/// `Ssh Bruteforce | user=admin | host=web-01`.
pub fn build_title(features: &GroupFeatures, type_counts: &[(String, usize)]) -> String {
    let mut parts = vec![humanize(dominant_type(features, type_counts))];
    if let Some(user) = features.users.iter().next() {
        parts.push(format!("user={}", user));
    }
    if let Some(host) = features.hosts.iter().next() {
        parts.push(format!("host={}", host));
    }
    parts.join(" | ")
}

/// Renders the analyst-readable summary for an incident.
pub fn summarize(
    features: &GroupFeatures,
    severity: Severity,
    risk_score: f64,
    confidence: f64,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(format!(
        "Incident severity: {} | risk score: {:.1}/100 | confidence: {:.2}",
        severity.to_string().to_uppercase(),
        risk_score,
        confidence
    ));

    let alert_noun = if features.alert_count == 1 { "alert" } else { "alerts" };
    lines.push(format!(
        "{} {} over {} from sources: {}",
        features.alert_count,
        alert_noun,
        format_span(features.span()),
        features.sources.join(", ")
    ));

    let entities = describe_entities(features);
    if entities.is_empty() {
        lines.push("Affected entities: none recorded".to_string());
    } else {
        lines.push(format!("Affected entities: {}", entities.join(", ")));
    }

    lines.push("Key signals:".to_string());
    for alert_type in &features.alert_types {
        lines.push(format!("- {}: {}", alert_type, attack_hint(alert_type)));
    }

    let actions = playbook::incident_steps(features.alert_types.iter().map(String::as_str));
    if !actions.is_empty() {
        lines.push("Recommended next actions:".to_string());
        for step in actions.iter().take(MAX_SUMMARY_ACTIONS) {
            lines.push(format!("- {}", step.description));
        }
    }

    lines.join("\n")
}

/// Entity list in fixed kind order (users, hosts, ips), each sorted.
fn describe_entities(features: &GroupFeatures) -> Vec<String> {
    let mut out = Vec::new();
    for user in &features.users {
        out.push(format!("{}={}", EntityKind::User, user));
    }
    for host in &features.hosts {
        out.push(format!("{}={}", EntityKind::Host, host));
    }
    for ip in &features.ips {
        out.push(format!("{}={}", EntityKind::Ip, ip));
    }
    out
}
