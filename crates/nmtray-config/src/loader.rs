//! Settings loading utilities

use crate::schema::Settings;
use crate::validator::{ConfigValidator, ValidationIssue};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "NMTRAY_CONFIG_PATH";

/// Settings loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading the settings file
    #[error("Failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format: {0:?}")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Settings validation error
    #[error("Configuration validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a YAML or TOML file with environment variable overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
        Self::load_from_file_with(path, |var| env::var(var).ok())
    }

    /// Load settings from `NMTRAY_CONFIG_PATH` if set, defaults otherwise
    pub fn load() -> Result<Settings, ConfigError> {
        Self::load_with(|var| env::var(var).ok())
    }

    /// Same as [`ConfigLoader::load`] with an explicit environment lookup
    pub fn load_with<F>(lookup: F) -> Result<Settings, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(CONFIG_PATH_VAR).filter(|path| !path.is_empty()) {
            Some(path) => Self::load_from_file_with(path, lookup),
            None => {
                debug!("No configuration file given, using defaults");
                let mut settings = Settings::default();
                Self::apply_env_overrides_with(&mut settings, &lookup)?;
                ConfigValidator::validate(&settings)?;
                Ok(settings)
            }
        }
    }

    /// Same as [`ConfigLoader::load_from_file`] with an explicit environment lookup
    pub fn load_from_file_with<P, F>(path: P, lookup: F) -> Result<Settings, ConfigError>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let mut settings = Self::parse_file(path)?;

        Self::apply_env_overrides_with(&mut settings, &lookup)?;
        ConfigValidator::validate(&settings)?;

        info!("Loaded configuration from {:?}", path);
        Ok(settings)
    }

    /// Parse a settings file without overrides or validation
    pub fn parse_file(path: &Path) -> Result<Settings, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Apply `NMTRAY_*` environment variable overrides
    pub fn apply_env_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
        Self::apply_env_overrides_with(settings, |var| env::var(var).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_env_overrides_with<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(language) = lookup("NMTRAY_LANGUAGE") {
            settings.i18n.language = Some(language).filter(|l| !l.is_empty());
        }

        if let Some(dir) = lookup("NMTRAY_TRANSLATIONS_DIR") {
            settings.i18n.translations_dir = PathBuf::from(dir);
        }

        if let Some(prefix) = lookup("NMTRAY_FILE_PREFIX") {
            settings.i18n.file_prefix = prefix;
        }

        if let Some(value) = lookup("NMTRAY_INCLUDE_UNFINISHED") {
            settings.i18n.include_unfinished = parse_bool("NMTRAY_INCLUDE_UNFINISHED", &value)?;
        }

        if let Some(value) = lookup("NMTRAY_REMOVE_IDENTICAL") {
            settings.i18n.remove_identical = parse_bool("NMTRAY_REMOVE_IDENTICAL", &value)?;
        }

        // Logging configuration overrides
        if let Some(level) = lookup("NMTRAY_LOG_LEVEL") {
            settings.logging.level = level;
        }

        if let Some(value) = lookup("NMTRAY_LOG_JSON") {
            settings.logging.json_format = parse_bool("NMTRAY_LOG_JSON", &value)?;
        }

        if let Some(path) = lookup("NMTRAY_LOG_FILE") {
            settings.logging.file_path = Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty());
        }

        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "on" => Ok(true),
        "0" | "no" | "off" => Ok(false),
        other => other.parse().map_err(|e| ConfigError::EnvParse {
            var: var.to_string(),
            source: Box::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("X", "true").unwrap());
        assert!(parse_bool("X", "Yes").unwrap());
        assert!(parse_bool("X", "1").unwrap());
        assert!(!parse_bool("X", "off").unwrap());
        assert!(!parse_bool("X", "FALSE").unwrap());
        assert!(matches!(
            parse_bool("X", "maybe"),
            Err(ConfigError::EnvParse { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        let lookup = env_of(&[
            ("NMTRAY_LANGUAGE", "da_DK"),
            ("NMTRAY_TRANSLATIONS_DIR", "/opt/nm-tray/translations"),
            ("NMTRAY_INCLUDE_UNFINISHED", "no"),
            ("NMTRAY_LOG_LEVEL", "debug"),
        ]);

        ConfigLoader::apply_env_overrides_with(&mut settings, lookup).unwrap();

        assert_eq!(settings.i18n.language.as_deref(), Some("da_DK"));
        assert_eq!(
            settings.i18n.translations_dir,
            PathBuf::from("/opt/nm-tray/translations")
        );
        assert!(!settings.i18n.include_unfinished);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_empty_language_override_clears_language() {
        let mut settings = Settings::default();
        settings.i18n.language = Some("da".to_string());

        ConfigLoader::apply_env_overrides_with(&mut settings, env_of(&[("NMTRAY_LANGUAGE", "")]))
            .unwrap();

        assert!(settings.i18n.language.is_none());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let settings = ConfigLoader::load_with(env_of(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }
}
