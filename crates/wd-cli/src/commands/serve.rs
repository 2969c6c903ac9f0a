//! Serve command - starts the API server.

use anyhow::{Context, Result};
use colored::Colorize;
use std::net::SocketAddr;
use std::time::Duration;

use wd_api::{ApiServer, ApiServerConfig, AppState};

use crate::config::AppConfig;

/// Server configuration from CLI arguments.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
    /// Hostname to bind to.
    pub host: String,
    /// Enable Swagger UI.
    pub enable_swagger: bool,
}

/// Runs the API server.
pub async fn run_server(config: ServeConfig, app_config: AppConfig) -> Result<()> {
    println!("{} Starting Watchdesk API Server...", "[server]".cyan());

    // All state is in memory; alerts live only for the process lifetime.
    let state = AppState::new(app_config.correlation.clone());

    let bind_address: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid bind address")?;

    let server_config = ApiServerConfig {
        bind_address,
        request_timeout: Duration::from_secs(30),
        enable_swagger: config.enable_swagger,
    };

    println!();
    println!("{}", "Watchdesk API Server".bold());
    println!("{}", "═".repeat(40));
    println!("  {} http://{}", "Address:".cyan(), bind_address);
    println!(
        "  {} {} minutes",
        "Cluster window:".cyan(),
        app_config.correlation.clustering.window_minutes
    );

    if config.enable_swagger {
        println!("  {} http://{}/docs", "Swagger UI:".cyan(), bind_address);
    }

    println!();
    println!("{}", "Endpoints:".bold());
    println!("  GET   /health                       - Health check");
    println!("  POST  /api/alerts                   - Ingest alert");
    println!("  GET   /api/alerts                   - List alerts");
    println!("  GET   /api/incidents                - List incidents");
    println!("  POST  /api/incidents/rebuild        - Rebuild incidents");
    println!("  GET   /api/incidents/:id            - Get incident");
    println!("  PATCH /api/incidents/:id            - Update analyst fields");
    println!("  GET   /api/incidents/:id/playbook   - Response playbook");
    println!("  POST  /api/incidents/:id/remediate  - Simulated remediation");
    println!("  GET   /api/incidents/:id/export     - Export incident");
    println!();
    println!("Press {} to stop", "Ctrl+C".yellow());
    println!();

    let server = ApiServer::new(server_config, state);
    server.run().await.context("Server error")?;

    println!();
    println!("{} Server stopped", "[server]".cyan());

    Ok(())
}
