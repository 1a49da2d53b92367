//! Catalog loading for the running application and the process-wide
//! translator behind [`tr!`](crate::tr).

use crate::catalog::{Catalog, LoadOptions};
use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;
use nmtray_config::I18nSettings;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

static INSTALLED: OnceCell<Translator> = OnceCell::new();

/// A loaded catalog plus where it came from.
///
/// Cloning is cheap: the catalog is shared.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<Catalog>,
    locale: Option<Locale>,
    source: Option<PathBuf>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::untranslated()
    }
}

impl Translator {
    /// A translator that returns every source string unchanged.
    pub fn untranslated() -> Self {
        Self {
            catalog: Arc::new(Catalog::empty()),
            locale: None,
            source: None,
        }
    }

    /// Wrap an already built catalog.
    pub fn from_catalog(catalog: Catalog) -> Self {
        Self {
            locale: catalog.language().cloned(),
            catalog: Arc::new(catalog),
            source: None,
        }
    }

    /// Load the catalog for the configured or environment locale.
    ///
    /// Never fails: a missing, unreadable or malformed catalog is logged
    /// and the translator falls back to untranslated mode.
    pub fn load(settings: &I18nSettings) -> Self {
        Self::try_load(settings).unwrap_or_else(|e| {
            warn!("Failed to load translations, using untranslated strings: {}", e);
            Self::untranslated()
        })
    }

    /// Like [`Translator::load`], but reports the failure.
    ///
    /// With no language configured and a `C`/`POSIX` (or unset) environment
    /// locale this succeeds with an untranslated translator.
    pub fn try_load(settings: &I18nSettings) -> I18nResult<Self> {
        Self::try_load_with(settings, |var| std::env::var(var).ok())
    }

    /// [`Translator::try_load`] with an explicit environment lookup.
    pub fn try_load_with<F>(settings: &I18nSettings, env: F) -> I18nResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale = match settings.language.as_deref() {
            Some(language) => Some(Locale::parse(language)?),
            None => Locale::from_env_with(env),
        };

        match locale {
            Some(locale) => Self::try_load_for(settings, &locale),
            None => {
                info!("No UI locale set, translations disabled");
                Ok(Self::untranslated())
            }
        }
    }

    /// Load the most specific catalog file available for `locale`.
    pub fn try_load_for(settings: &I18nSettings, locale: &Locale) -> I18nResult<Self> {
        let dir = &settings.translations_dir;
        let candidates = locale.file_candidates(&settings.file_prefix, &settings.file_suffix);

        let found = candidates.iter().map(|name| dir.join(name)).find(|path| {
            debug!("Looking for catalog: {:?}", path);
            path.is_file()
        });
        let Some(path) = found else {
            return Err(I18nError::CatalogNotFound {
                locale: locale.qt_name(),
                dir: dir.clone(),
                tried: candidates,
            });
        };

        let catalog = Catalog::from_path(&path, &LoadOptions::from(settings))?;
        Ok(Self {
            locale: Some(locale.clone()),
            catalog: Arc::new(catalog),
            source: Some(path),
        })
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for other threads.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// The locale the catalog was loaded for.
    pub const fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    /// File the catalog was read from.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Whether every lookup returns its source.
    pub fn is_untranslated(&self) -> bool {
        self.catalog.is_empty()
    }

    /// See [`Catalog::translate`].
    pub fn translate<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
        self.catalog.translate(context, source, comment)
    }

    /// See [`Catalog::translate_plural`].
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: i64,
    ) -> String {
        self.catalog.translate_plural(context, source, comment, n)
    }

    /// See [`Catalog::translate_id`].
    pub fn translate_id(&self, id: &str) -> Option<&str> {
        self.catalog.translate_id(id)
    }
}

/// Install the process-wide translator. Only the first call succeeds.
pub fn install(translator: Translator) -> I18nResult<()> {
    let entries = translator.catalog.len();
    INSTALLED
        .set(translator)
        .map_err(|_| I18nError::AlreadyInstalled)?;
    info!("Installed translator with {} entries", entries);
    Ok(())
}

/// The installed translator, if any.
pub fn installed() -> Option<&'static Translator> {
    INSTALLED.get()
}

/// Translate with the installed translator, or return `source` when none is installed.
pub fn translate<'a>(context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
    match installed() {
        Some(translator) => translator.translate(context, source, comment),
        None => source,
    }
}

/// Numerus translation with the installed translator.
pub fn translate_plural(context: &str, source: &str, comment: Option<&str>, n: i64) -> String {
    match installed() {
        Some(translator) => translator.translate_plural(context, source, comment, n),
        None => crate::placeholder::replace_count(source, n),
    }
}
