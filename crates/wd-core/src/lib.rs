//! # wd-core
//!
//! Core library for Watchdesk: alert and incident data models, the
//! correlation and risk-scoring engine, and the in-memory store that
//! mediates analyst-triggered rebuild passes.

pub mod alert;
pub mod config;
pub mod engine;
pub mod incident;
pub mod playbook;
pub mod store;

pub use alert::{Alert, AssetTier, NewAlert, Severity};
pub use config::{ConfidenceConfig, CorrelationConfig, ScoringConfig};
pub use engine::cluster::IncidentCandidate;
pub use engine::{correlate, RebuildStats};
pub use incident::{AnalystVerdict, Incident, IncidentStatus, MitreMapping, RemediationEntry};
pub use playbook::PlaybookStep;
pub use store::{AnalystUpdate, Store, StoreError};
