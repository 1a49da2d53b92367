//! Application-wide error types using thiserror.

use nmtray_common::LoggingError;
use nmtray_config::ConfigError;
use nmtray_i18n::I18nError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum L10nError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog error.
    #[error("Catalog error: {0}")]
    Catalog(#[from] I18nError),

    /// Logging setup error.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the tool.
pub type L10nResult<T> = Result<T, L10nError>;
