//! Structured logging infrastructure built on `tracing-subscriber`.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "`nmtray_i18n=trace`")
    pub level: String,
    /// Emit one JSON object per event instead of human readable lines
    pub json_format: bool,
    /// Colorize human readable output
    pub ansi: bool,
    /// Optional file to append log output to, stderr otherwise
    pub file_path: Option<PathBuf>,
    /// Include the target module of each event
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            ansi: true,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Errors raised while installing the global subscriber
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The configured level is not a valid filter directive
    #[error("Invalid log filter '{level}': {source}")]
    Filter {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    /// The log file could not be opened for appending
    #[error("Failed to open log file {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A global subscriber was already installed
    #[error("Failed to install subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Initialize the tracing subscriber with the given configuration.
///
/// Output goes to stderr unless a file is configured, so that commands can
/// keep stdout for their own results.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_new(&config.level).map_err(|source| LoggingError::Filter {
            level: config.level.clone(),
            source,
        })?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let log_file = config.file_path.as_deref().map(open_log_file).transpose()?;

    match (config.json_format, log_file) {
        (true, Some(file)) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()?,
        (true, None) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(io::stderr),
            )
            .try_init()?,
        (false, Some(file)) => registry
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_writer(Mutex::new(file)),
            )
            .try_init()?,
        (false, None) => registry
            .with(
                fmt::layer()
                    .with_ansi(config.ansi)
                    .with_target(config.include_targets)
                    .with_writer(io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}

fn open_log_file(path: &Path) -> Result<std::fs::File, LoggingError> {
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::File {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json_format);
        assert!(config.ansi);
        assert!(config.file_path.is_none());
        assert!(config.include_targets);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: LoggingConfig = serde_json::from_str(r#"{"level": "debug"}"#).unwrap();
        assert_eq!(config.level, "debug");
        assert!(config.include_targets);
    }

    #[test]
    fn test_unwritable_log_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file_path: Some(dir.path().join("missing").join("nm-tray.log")),
            ..LoggingConfig::default()
        };

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, LoggingError::File { .. }));
    }

    #[test]
    fn test_invalid_level_is_rejected() {
        let config = LoggingConfig {
            level: "nmtray_i18n=loud".to_string(),
            ..LoggingConfig::default()
        };

        let err = init_logging(&config).unwrap_err();
        assert!(matches!(err, LoggingError::Filter { ref level, .. } if level == "nmtray_i18n=loud"));
    }
}
