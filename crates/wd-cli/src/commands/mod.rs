//! CLI subcommand implementations.

mod seed;
mod serve;

pub use seed::{run_seed, SeedConfig};
pub use serve::{run_server, ServeConfig};
