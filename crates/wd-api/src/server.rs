//! API server implementation.

use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[allow(unused_imports)]
use crate::dto::*;
use crate::error::ErrorResponse;
use crate::routes;
use crate::state::AppState;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Address to bind to.
    pub bind_address: SocketAddr,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Enable Swagger UI.
    pub enable_swagger: bool,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8080)),
            request_timeout: Duration::from_secs(30),
            enable_swagger: true,
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health_check,
        crate::routes::alerts::ingest_alert,
        crate::routes::alerts::list_alerts,
        crate::routes::incidents::list_incidents,
        crate::routes::incidents::rebuild_incidents,
        crate::routes::incidents::get_incident,
        crate::routes::incidents::update_incident,
        crate::routes::incidents::get_playbook,
        crate::routes::incidents::simulate_remediation,
        crate::routes::incidents::export_incident,
    ),
    components(
        schemas(
            HealthResponse,
            IngestAlertRequest,
            AlertResponse,
            IncidentResponse,
            IncidentDetailResponse,
            MitreMappingResponse,
            RemediationEntryResponse,
            UpdateIncidentRequest,
            RebuildResponse,
            PlaybookResponse,
            PlaybookStepResponse,
            RemediateRequest,
            ExportResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Alerts", description = "Alert ingestion and listing"),
        (name = "Incidents", description = "Incident correlation and analyst workflow"),
    ),
    info(
        title = "Watchdesk API",
        description = "Incident correlation and risk-scoring service",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// The API server.
pub struct ApiServer {
    config: ApiServerConfig,
    state: AppState,
}

impl ApiServer {
    /// Creates a new server.
    pub fn new(config: ApiServerConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Builds the router, including Swagger UI when enabled.
    pub fn router(&self) -> Router {
        routes::health::init_start_time();
        let mut router = routes::create_router(self.state.clone());
        if self.config.enable_swagger {
            router = router
                .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }
        router.layer(CatchPanicLayer::new())
    }

    /// Runs the server until ctrl-c.
    pub async fn run(self) -> std::io::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind(self.config.bind_address).await?;
        info!(address = %self.config.bind_address, "API server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    // Best effort; if signal registration fails we simply run until killed.
    if signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
