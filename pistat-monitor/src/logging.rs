//! Log output setup
//!
//! Builds a `tracing` dispatcher writing plain text lines to stderr:
//! timestamp, level, target and message. The dispatcher is handed back to
//! the caller rather than installed globally.

use pistat_core::config::{parse_log_level, LoggingConfig};
use tracing::level_filters::LevelFilter;
use tracing::{Dispatch, Level};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter
pub const LOG_ENV: &str = "PISTAT_LOG";

/// Build the dispatcher for `config`
pub fn build_dispatch(config: &LoggingConfig) -> Dispatch {
    // Config is validated on load; a bad level can only come from a hand-built value
    let level = parse_log_level(&config.level).unwrap_or(Level::INFO);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    Dispatch::new(subscriber)
}
