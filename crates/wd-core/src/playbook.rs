//! Static response playbook catalog.
//!
//! Each alert type carries a short, ordered list of response steps. The
//! catalog feeds both the per-incident playbook endpoint and the
//! "recommended next actions" section of generated summaries. Steps are
//! advisory; Watchdesk only ever simulates remediation.

use serde::Serialize;

/// A single response step.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PlaybookStep {
    /// Machine-friendly action key, e.g. "block_ip".
    pub action: &'static str,
    /// What the analyst should do.
    pub description: &'static str,
}

const fn step(action: &'static str, description: &'static str) -> PlaybookStep {
    PlaybookStep { action, description }
}

/// Response steps for a single alert type. Unknown types have none.
pub fn steps_for(alert_type: &str) -> &'static [PlaybookStep] {
    match alert_type {
        "ssh_bruteforce" | "multiple_failed_logins" => const { &[
            step("rate_limit_auth", "Enable temporary lockout or rate limiting on the target"),
            step("check_sprayed_accounts", "Check for other accounts targeted from the same origin"),
            step("review_ip_reputation", "Review source IP reputation and block if confirmed hostile"),
        ] },
        "impossible_travel" => const { &[
            step("force_password_reset", "Force password reset and MFA step-up for the user"),
            step("review_sessions", "Review recent sessions and token issuance"),
            step("check_device_fingerprint", "Check for device fingerprint changes"),
        ] },
        "iam_key_created" => const { &[
            step("disable_new_key", "Disable the newly created access key"),
            step("rotate_credentials", "Rotate credentials for the affected identity"),
            step("review_cloudtrail", "Review cloud audit logs for follow-on actions"),
        ] },
        "suspicious_powershell" => const { &[
            step("isolate_endpoint", "Isolate the endpoint from the network"),
            step("collect_process_tree", "Collect the process tree and PowerShell transcript"),
            step("hunt_fleet", "Hunt for similar commands across the fleet"),
        ] },
        "c2_outbound" => const { &[
            step("block_destination", "Block the destination IP or domain at the perimeter"),
            step("inspect_dns", "Inspect DNS logs for related domains"),
            step("capture_pcap", "Capture a packet trace from the host if still active"),
        ] },
        "s3_public" => const { &[
            step("revert_bucket_policy", "Revert the bucket policy or ACL to private"),
            step("scan_access_logs", "Scan access logs for downloads during the exposure"),
            step("check_sensitive_objects", "Check whether sensitive objects were exposed"),
        ] },
        "port_scan" => const { &[
            step("review_ip_reputation", "Review source IP reputation and block if confirmed hostile"),
            step("check_exposed_services", "Verify no unintended services answer on scanned ports"),
        ] },
        "dns_exfil" => const { &[
            step("block_destination", "Block the destination IP or domain at the perimeter"),
            step("inspect_dns", "Inspect DNS logs for related domains"),
            step("isolate_endpoint", "Isolate the endpoint from the network"),
        ] },
        _ => &[],
    }
}

/// Deduplicated response steps for a whole incident.
///
/// `alert_types` must be in first-seen order; steps are deduplicated by
/// action key so overlapping catalogs do not repeat themselves.
pub fn incident_steps<'a, I>(alert_types: I) -> Vec<PlaybookStep>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut steps: Vec<PlaybookStep> = Vec::new();
    for alert_type in alert_types {
        for candidate in steps_for(alert_type) {
            if steps.iter().any(|s| s.action == candidate.action) {
                continue;
            }
            steps.push(*candidate);
        }
    }
    steps
}
