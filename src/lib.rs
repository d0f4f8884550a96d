pub mod data;
pub mod engine;
pub mod errors;
pub mod import;
pub mod models;
pub mod parser;
pub mod utils;

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the standard env-filter setup.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
