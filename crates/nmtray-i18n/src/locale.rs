//! Locale resolution and catalog file naming.

use crate::error::{I18nError, I18nResult};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Environment variables consulted for the UI language, highest priority first.
pub const LOCALE_ENV_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// A UI locale such as `da` or `da_DK`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    id: LanguageIdentifier,
}

impl Locale {
    /// Parse a POSIX (`da_DK.UTF-8@euro`), Qt (`da_DK`) or BCP 47 (`da-DK`)
    /// locale name.
    ///
    /// `C` and `POSIX` are rejected: they mean "no translation".
    pub fn parse(name: &str) -> I18nResult<Self> {
        let stripped = name
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();

        if stripped.is_empty() || stripped == "C" || stripped == "POSIX" {
            return Err(I18nError::InvalidLanguageId(name.to_string()));
        }

        let id: LanguageIdentifier = stripped
            .replace('_', "-")
            .parse()
            .map_err(|_| I18nError::InvalidLanguageId(name.to_string()))?;

        if id.language.is_empty() {
            return Err(I18nError::InvalidLanguageId(name.to_string()));
        }
        Ok(Self { id })
    }

    /// Resolve the locale from the process environment.
    pub fn from_env() -> Option<Self> {
        Self::from_env_with(|var| std::env::var(var).ok())
    }

    /// Resolve the locale from an arbitrary variable lookup.
    ///
    /// The first non-empty variable of [`LOCALE_ENV_VARS`] decides; for
    /// `LANGUAGE` only the first colon-separated entry counts. A `C` or
    /// `POSIX` value yields `None` rather than falling through.
    pub fn from_env_with<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in LOCALE_ENV_VARS {
            let Some(value) = lookup(var) else { continue };
            let value = if var == "LANGUAGE" {
                value.split(':').find(|v| !v.is_empty()).unwrap_or_default().to_string()
            } else {
                value
            };
            if value.is_empty() {
                continue;
            }
            return Self::parse(&value).ok();
        }
        None
    }

    /// Language subtag, e.g. `da`.
    pub fn language(&self) -> &str {
        self.id.language.as_str()
    }

    /// Region subtag, e.g. `DK`.
    pub fn region(&self) -> Option<&str> {
        self.id.region.as_ref().map(|r| r.as_str())
    }

    /// Name in Qt's `language_REGION` form, used in catalog file names.
    pub fn qt_name(&self) -> String {
        match self.region() {
            Some(region) => format!("{}_{}", self.language(), region),
            None => self.language().to_string(),
        }
    }

    /// The underlying language identifier.
    pub const fn identifier(&self) -> &LanguageIdentifier {
        &self.id
    }

    /// Catalog file names to try, most specific first:
    /// `prefix_da_DK.ts`, `prefix_da.ts`, `prefix.ts`.
    pub fn file_candidates(&self, prefix: &str, suffix: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(3);
        if self.region().is_some() {
            candidates.push(format!("{prefix}_{}{suffix}", self.qt_name()));
        }
        candidates.push(format!("{prefix}_{}{suffix}", self.language()));
        candidates.push(format!("{prefix}{suffix}"));
        candidates
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qt_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_parse_forms() {
        for name in ["da_DK", "da-DK", "da_DK.UTF-8", "da_DK.UTF-8@euro", "da_DK@euro"] {
            let locale = Locale::parse(name).unwrap();
            assert_eq!(locale.language(), "da", "{name}");
            assert_eq!(locale.region(), Some("DK"), "{name}");
            assert_eq!(locale.qt_name(), "da_DK");
        }
        let plain = Locale::parse("da").unwrap();
        assert_eq!(plain.region(), None);
        assert_eq!(plain.to_string(), "da");
    }

    #[test]
    fn test_parse_rejects() {
        for name in ["", "C", "POSIX", "C.UTF-8", "not a locale"] {
            assert!(Locale::parse(name).is_err(), "{name}");
        }
    }

    #[test]
    fn test_env_priority() {
        let locale = Locale::from_env_with(env(&[
            ("LANGUAGE", "pl:da"),
            ("LC_ALL", "de_DE.UTF-8"),
            ("LANG", "en_US.UTF-8"),
        ]))
        .unwrap();
        assert_eq!(locale.qt_name(), "pl");

        let locale = Locale::from_env_with(env(&[
            ("LANGUAGE", ""),
            ("LC_MESSAGES", "da_DK.UTF-8"),
            ("LANG", "en_US.UTF-8"),
        ]))
        .unwrap();
        assert_eq!(locale.qt_name(), "da_DK");
    }

    #[test]
    fn test_env_c_locale_means_untranslated() {
        assert_eq!(Locale::from_env_with(env(&[("LC_ALL", "C"), ("LANG", "da_DK")])), None);
        assert_eq!(Locale::from_env_with(env(&[])), None);
    }

    #[test]
    fn test_file_candidates() {
        let locale = Locale::parse("da_DK.UTF-8").unwrap();
        assert_eq!(
            locale.file_candidates("nm-tray", ".ts"),
            vec!["nm-tray_da_DK.ts", "nm-tray_da.ts", "nm-tray.ts"]
        );
        assert_eq!(
            Locale::parse("da").unwrap().file_candidates("nm-tray", ".ts"),
            vec!["nm-tray_da.ts", "nm-tray.ts"]
        );
    }
}
