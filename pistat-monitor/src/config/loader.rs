//! Configuration file loading
//!
//! Reads the TOML file named by `PISTAT_CONFIG`, or the system-wide default
//! path. A missing or broken file never stops the monitor: it runs on
//! built-in defaults and the outcome is logged once logging is up.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pistat_core::config::{parse_config, ConfigError, MonitorConfig};
use tracing::{debug, info, warn};

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "PISTAT_CONFIG";

/// Config path used when `PISTAT_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pistat/pistat.toml";

/// Where the active configuration came from
#[derive(Debug)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No file at this path, defaults in use
    Defaults(PathBuf),
    /// File present but unusable, defaults in use
    Fallback { path: PathBuf, error: ConfigError },
}

impl ConfigSource {
    /// Report the outcome of loading
    pub fn log(&self, config: &MonitorConfig) {
        match self {
            ConfigSource::File(path) => {
                info!("Configuration loaded from {}", path.display());
            }
            ConfigSource::Defaults(path) => {
                info!("No configuration at {}, using defaults", path.display());
            }
            ConfigSource::Fallback { path, error } => {
                warn!(
                    "Ignoring configuration at {}: {}, using defaults",
                    path.display(),
                    error
                );
            }
        }
        debug!(
            refresh_ms = config.refresh_interval_ms,
            level = %config.logging.level,
            "Active configuration"
        );
    }
}

/// Path of the configuration file
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from the default location
pub fn load() -> (MonitorConfig, ConfigSource) {
    load_from(&config_path())
}

/// Load configuration from `path`
pub fn load_from(path: &Path) -> (MonitorConfig, ConfigSource) {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return (
                MonitorConfig::default(),
                ConfigSource::Defaults(path.to_path_buf()),
            );
        }
        Err(source) => {
            let error = ConfigError::Read {
                path: path.to_path_buf(),
                source,
            };
            return (
                MonitorConfig::default(),
                ConfigSource::Fallback {
                    path: path.to_path_buf(),
                    error,
                },
            );
        }
    };

    match parse_config(&text) {
        Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
        Err(error) => (
            MonitorConfig::default(),
            ConfigSource::Fallback {
                path: path.to_path_buf(),
                error,
            },
        ),
    }
}
