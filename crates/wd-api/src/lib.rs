//! # wd-api
//!
//! REST API server for Watchdesk: alert ingestion, incident listing and
//! analyst actions, and the rebuild trigger that runs the correlation
//! engine.

pub mod dto;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{ApiServer, ApiServerConfig};
pub use state::AppState;
