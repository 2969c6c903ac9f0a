//! Static alert-type to MITRE ATT&CK mapping.
//!
//! The table is declared statically rather than dispatched on strings at
//! runtime so it can be reviewed and tested exhaustively. Alert types with
//! no entry simply contribute nothing to an incident's mapping.

use crate::incident::MitreMapping;

/// (tactic, technique id, technique name)
type Entry = (&'static str, &'static str, &'static str);

/// ATT&CK entries for a single alert type.
pub fn mappings_for(alert_type: &str) -> &'static [Entry] {
    match alert_type {
        "ssh_bruteforce" => &[("Credential Access", "T1110", "Brute Force")],
        "multiple_failed_logins" => &[
            ("Credential Access", "T1110.003", "Password Spraying"),
        ],
        "impossible_travel" => &[("Initial Access", "T1078", "Valid Accounts")],
        "iam_key_created" => &[
            ("Persistence", "T1098.001", "Additional Cloud Credentials"),
        ],
        "suspicious_powershell" => &[
            ("Execution", "T1059.001", "PowerShell"),
            ("Defense Evasion", "T1027", "Obfuscated Files or Information"),
        ],
        "c2_outbound" => &[
            ("Command and Control", "T1071", "Application Layer Protocol"),
        ],
        "s3_public" => &[("Collection", "T1530", "Data from Cloud Storage")],
        "port_scan" => &[("Discovery", "T1046", "Network Service Discovery")],
        "dns_exfil" => &[
            ("Exfiltration", "T1048", "Exfiltration Over Alternative Protocol"),
        ],
        _ => &[],
    }
}

/// Builds the deduplicated, order-stable mapping list for an incident.
///
/// `alert_types` must be in first-seen order; the output inherits that
/// order and deduplicates by technique id, so repeated rebuilds of the same
/// alert set produce byte-identical lists.
pub fn incident_mappings<'a, I>(alert_types: I) -> Vec<MitreMapping>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut mappings: Vec<MitreMapping> = Vec::new();
    for alert_type in alert_types {
        for (tactic, technique_id, technique) in mappings_for(alert_type) {
            if mappings.iter().any(|m| m.technique_id == *technique_id) {
                continue;
            }
            mappings.push(MitreMapping {
                tactic: (*tactic).to_string(),
                technique_id: (*technique_id).to_string(),
                technique: (*technique).to_string(),
            });
        }
    }
    mappings
}
