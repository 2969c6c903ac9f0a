//! API routes.

pub mod alerts;
pub mod health;
pub mod incidents;

use axum::{middleware as axum_middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, request_logging};
use crate::state::AppState;

/// Creates the main API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/alerts", alerts::routes())
        .nest("/api/incidents", incidents::routes())
        .merge(health::routes())
        .layer(axum_middleware::from_fn(request_logging))
        .layer(axum_middleware::from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
