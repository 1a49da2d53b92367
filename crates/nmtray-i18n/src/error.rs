//! Error types for catalog loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or loading translation catalogs.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse a language identifier.
    #[error("Invalid language identifier: {0}")]
    InvalidLanguageId(String),

    /// Failed to read a catalog file.
    #[error("Failed to load catalog file {path:?}: {source}")]
    ResourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No candidate file exists for the requested locale.
    #[error("No catalog for locale {locale} in {dir:?} (tried {tried:?})")]
    CatalogNotFound {
        locale: String,
        dir: PathBuf,
        tried: Vec<String>,
    },

    /// The document is not well-formed XML.
    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document is well-formed XML but not a valid TS document.
    #[error("Invalid translation file at byte {position}: {message}")]
    Parse { position: u64, message: String },

    /// A process-wide translator is already installed.
    #[error("A translator is already installed")]
    AlreadyInstalled,
}

impl I18nError {
    /// Whether the error means the document itself is broken, as opposed
    /// to missing or unreadable.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Xml { .. } | Self::Parse { .. })
    }
}

/// Result type for catalog operations.
pub type I18nResult<T> = Result<T, I18nError>;
