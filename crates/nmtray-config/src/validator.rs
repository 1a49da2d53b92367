//! Runtime validation of loaded settings.

use crate::loader::ConfigError;
use crate::schema::Settings;
use std::fmt;
use tracing_subscriber::EnvFilter;

/// A single rejected setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path of the offending field, e.g. `i18n.file_prefix`.
    pub field: &'static str,
    /// Human readable reason.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Settings validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates settings, reporting every problem at once.
    pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
        let issues = Self::issues(settings);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(issues))
        }
    }

    /// Collects all validation issues.
    pub fn issues(settings: &Settings) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let i18n = &settings.i18n;

        if i18n.translations_dir.as_os_str().is_empty() {
            issues.push(ValidationIssue {
                field: "i18n.translations_dir",
                message: "must not be empty".to_string(),
            });
        }

        if i18n.file_prefix.is_empty() {
            issues.push(ValidationIssue {
                field: "i18n.file_prefix",
                message: "must not be empty".to_string(),
            });
        } else if i18n.file_prefix.contains(['/', '\\']) {
            issues.push(ValidationIssue {
                field: "i18n.file_prefix",
                message: format!("'{}' must not contain path separators", i18n.file_prefix),
            });
        }

        if !i18n.file_suffix.starts_with('.') || i18n.file_suffix.len() < 2 {
            issues.push(ValidationIssue {
                field: "i18n.file_suffix",
                message: format!("'{}' must start with a dot", i18n.file_suffix),
            });
        }

        if let Some(language) = &i18n.language {
            if let Err(message) = validate_language_tag(language) {
                issues.push(ValidationIssue {
                    field: "i18n.language",
                    message,
                });
            }
        }

        if let Err(e) = EnvFilter::try_new(&settings.logging.level) {
            issues.push(ValidationIssue {
                field: "logging.level",
                message: format!("'{}' is not a valid filter: {e}", settings.logging.level),
            });
        }

        issues
    }
}

/// Basic syntactic check of a POSIX or BCP 47 language tag.
pub fn validate_language_tag(tag: &str) -> Result<(), String> {
    let valid_chars = tag
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'));
    let starts_with_letter = tag.chars().next().is_some_and(|c| c.is_ascii_alphabetic());

    if valid_chars && starts_with_letter {
        Ok(())
    } else {
        Err(format!("'{tag}' is not a language tag"))
    }
}
