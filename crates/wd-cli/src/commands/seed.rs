//! Seed command - loads alerts from a JSONL file into a running server.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Seed configuration from CLI arguments.
#[derive(Debug, Clone)]
pub struct SeedConfig {
    /// JSONL file, one alert payload per line.
    pub file: PathBuf,
    /// Base URL of the running server.
    pub api_url: String,
    /// Trigger a rebuild after ingestion.
    pub rebuild: bool,
}

/// Posts every alert in the file, then optionally rebuilds incidents.
///
/// Lines that fail to parse or are rejected by the server are reported
/// and skipped; seeding continues with the remaining lines.
pub async fn run_seed(config: SeedConfig) -> Result<()> {
    let contents = std::fs::read_to_string(&config.file)
        .with_context(|| format!("Failed to read seed file: {}", config.file.display()))?;

    let client = reqwest::Client::new();
    let alerts_url = format!("{}/api/alerts", config.api_url.trim_end_matches('/'));

    let mut sent = 0usize;
    let mut failed = 0usize;

    for (line_no, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let payload: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                eprintln!(
                    "  {} line {}: invalid JSON: {}",
                    "✗".red(),
                    line_no + 1,
                    e
                );
                failed += 1;
                continue;
            }
        };

        let response = client
            .post(&alerts_url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", alerts_url))?;

        if response.status().is_success() {
            sent += 1;
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            eprintln!(
                "  {} line {}: rejected ({}): {}",
                "✗".red(),
                line_no + 1,
                status,
                body
            );
            failed += 1;
        }
    }

    println!(
        "{} Seeded {} alerts ({} failed)",
        "[seed]".cyan(),
        sent.to_string().green(),
        failed
    );

    if config.rebuild {
        let rebuild_url = format!(
            "{}/api/incidents/rebuild",
            config.api_url.trim_end_matches('/')
        );
        let response = client
            .post(&rebuild_url)
            .send()
            .await
            .with_context(|| format!("Failed to reach server at {}", rebuild_url))?;

        if response.status().is_success() {
            let body: serde_json::Value = response.json().await?;
            println!(
                "{} Rebuild complete: {} incidents from {} alerts",
                "[seed]".cyan(),
                body["incidents"],
                body["alerts"]
            );
        } else {
            anyhow::bail!("Rebuild failed with status {}", response.status());
        }
    }

    Ok(())
}
