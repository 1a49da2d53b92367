//! Default values.

use crate::schema::{I18nSettings, Settings};
use nmtray_common::LoggingConfig;
use std::path::PathBuf;

/// Install location of the catalogs on a typical Linux system.
pub const DEFAULT_TRANSLATIONS_DIR: &str = "/usr/share/nm-tray/translations";

/// Catalog file prefix used by nm-tray.
pub const DEFAULT_FILE_PREFIX: &str = "nm-tray";

/// Catalog file suffix.
pub const DEFAULT_FILE_SUFFIX: &str = ".ts";

impl Default for Settings {
    fn default() -> Self {
        Self {
            i18n: I18nSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            translations_dir: PathBuf::from(DEFAULT_TRANSLATIONS_DIR),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            file_suffix: DEFAULT_FILE_SUFFIX.to_string(),
            language: None,
            include_unfinished: true,
            remove_identical: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_location() {
        let settings = I18nSettings::default();
        assert_eq!(
            settings.translations_dir,
            PathBuf::from("/usr/share/nm-tray/translations")
        );
        assert_eq!(settings.file_prefix, "nm-tray");
        assert_eq!(settings.file_suffix, ".ts");
    }

    #[test]
    fn test_defaults_match_release_tool() {
        let settings = Settings::default();
        assert!(settings.i18n.include_unfinished);
        assert!(!settings.i18n.remove_identical);
        assert!(settings.i18n.language.is_none());
    }
}
