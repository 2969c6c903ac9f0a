//! Watchdesk CLI
//!
//! Command-line interface for the Watchdesk incident correlation service.

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod config;
mod logging;

use commands::{run_seed, run_server, SeedConfig, ServeConfig};
use config::AppConfig;
use logging::LoggingConfig;

#[derive(Parser)]
#[command(name = "watchdesk")]
#[command(author = "Watchdesk Team")]
#[command(version)]
#[command(about = "Incident correlation and risk scoring for SOC alert streams", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Disable Swagger UI
        #[arg(long)]
        no_swagger: bool,
    },

    /// Load alerts from a JSONL file into a running server
    Seed {
        /// Seed file, one alert JSON object per line
        file: PathBuf,

        /// API server URL
        #[arg(long, default_value = "http://localhost:8080")]
        api_url: String,

        /// Trigger an incident rebuild after seeding
        #[arg(long)]
        rebuild: bool,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config/watchdesk.yaml"));
    let app_config = AppConfig::load(&config_path).unwrap_or_else(|_| {
        if cli.verbose {
            eprintln!("Using default configuration (no config file found)");
        }
        AppConfig::default()
    });

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        app_config
            .logging
            .level
            .parse()
            .unwrap_or(tracing::Level::INFO)
    };
    logging::init_logging(LoggingConfig {
        level,
        json_format: app_config.logging.json,
        ..Default::default()
    });

    match cli.command {
        Commands::Serve {
            port,
            host,
            no_swagger,
        } => {
            let serve_config = ServeConfig {
                port: port.unwrap_or(app_config.server.port),
                host: host.unwrap_or_else(|| app_config.server.host.clone()),
                enable_swagger: !no_swagger && app_config.server.swagger,
            };
            run_server(serve_config, app_config).await
        }
        Commands::Seed {
            file,
            api_url,
            rebuild,
        } => {
            run_seed(SeedConfig {
                file,
                api_url,
                rebuild,
            })
            .await
        }
        Commands::Config => {
            println!("{}", "Effective configuration:".bold());
            println!("{}", serde_yaml::to_string(&app_config)?);
            Ok(())
        }
    }
}
