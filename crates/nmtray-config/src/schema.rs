//! Settings schema definitions using serde.

use nmtray_common::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main settings structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Translation catalog settings.
    pub i18n: I18nSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Where translation catalogs live and how they are loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nSettings {
    /// Directory searched for catalog files.
    pub translations_dir: PathBuf,
    /// File name prefix, joined to the language with `_`.
    pub file_prefix: String,
    /// File name suffix including the dot.
    pub file_suffix: String,
    /// Explicit UI language (`da`, `da_DK`, `pt-BR`); the environment
    /// locale is used when unset.
    pub language: Option<String>,
    /// Load translations still marked `unfinished`.
    pub include_unfinished: bool,
    /// Skip translations identical to their source text.
    pub remove_identical: bool,
}
