pub mod common;

mod alert_tests;
mod health_tests;
mod incident_tests;
