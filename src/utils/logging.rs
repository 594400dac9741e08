//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::Env;

/// Default filter when RUST_LOG is unset; the menu owns the terminal.
const DEFAULT_FILTER: &str = "warn";

/// Setup logging for the menu binary
pub fn setup_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)).init();
}
