//! Configuration types
//!
//! Monitor configuration is read from a small TOML file. It covers the
//! refresh interval and log level only; every key is optional and anything
//! left out takes its default. Panel wiring lives in [`hardware`].

pub mod hardware;
pub mod types;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use hardware::*;
pub use types::*;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// TOML syntax or schema error
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    /// Refresh interval of zero
    #[error("refresh_interval_ms must be greater than zero")]
    InvalidRefreshInterval,
    /// Unknown log level name
    #[error("invalid log level {0:?}, use trace, debug, info, warn or error")]
    InvalidLogLevel(String),
}

/// Parse and validate a TOML configuration document
pub fn parse_config(input: &str) -> Result<MonitorConfig, ConfigError> {
    let config: MonitorConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_empty_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, MonitorConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let config = parse_config(
            r#"
            # Refresh twice as often
            refresh_interval_ms = 1000

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.refresh_interval(), Duration::from_secs(1));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_parse_partial_section() {
        let config = parse_config("[logging]\n").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.refresh_interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_parse_rejects_display_wiring() {
        let err = parse_config("[display]\naddress = 0x3D\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_zero_interval() {
        let err = parse_config("refresh_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRefreshInterval));
    }

    #[test]
    fn test_parse_rejects_bad_level() {
        let err = parse_config("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(ref l) if l == "loud"));
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        let err = parse_config("refresh = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_rejects_bad_type() {
        let err = parse_config("refresh_interval_ms = -5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
