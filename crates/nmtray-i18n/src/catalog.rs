//! In-memory translation catalog built from a TS document.
//!
//! Lookups are keyed by (context, source, comment). A message the catalog
//! does not know, or knows only with an empty translation, resolves to its
//! source text, so callers never have to handle a missing translation.

use crate::error::I18nResult;
use crate::locale::Locale;
use crate::message::{MessageKey, TranslationKind, TsDocument};
use crate::placeholder;
use crate::plural::PluralRule;
use nmtray_config::I18nSettings;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Which messages of a document become catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Load translations still marked `unfinished`.
    pub include_unfinished: bool,
    /// Skip translations identical to their source.
    pub remove_identical: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            include_unfinished: true,
            remove_identical: false,
        }
    }
}

impl From<&I18nSettings> for LoadOptions {
    fn from(settings: &I18nSettings) -> Self {
        Self {
            include_unfinished: settings.include_unfinished,
            remove_identical: settings.remove_identical,
        }
    }
}

/// What happened to each message while building a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    /// Loaded entries without a `type` attribute.
    pub finished: usize,
    /// Loaded entries marked `unfinished`.
    pub unfinished: usize,
    /// Messages with an empty translation.
    pub untranslated: usize,
    /// Vanished and obsolete messages.
    pub obsolete: usize,
    /// Unfinished messages left out by [`LoadOptions::include_unfinished`].
    pub excluded_unfinished: usize,
    /// Messages left out by [`LoadOptions::remove_identical`].
    pub identical: usize,
    /// Repeated keys; only the first occurrence is loaded.
    pub duplicates: usize,
}

impl CatalogStats {
    /// Number of loaded entries.
    pub const fn generated(&self) -> usize {
        self.finished + self.unfinished
    }
}

impl fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated {} translation(s) ({} finished and {} unfinished)",
            self.generated(),
            self.finished,
            self.unfinished
        )?;
        if self.untranslated > 0 {
            write!(f, "\nIgnored {} untranslated source text(s)", self.untranslated)?;
        }
        if self.excluded_unfinished > 0 {
            write!(f, "\nExcluded {} unfinished translation(s)", self.excluded_unfinished)?;
        }
        if self.identical > 0 {
            write!(f, "\nRemoved {} identical translation(s)", self.identical)?;
        }
        if self.obsolete > 0 {
            write!(f, "\nDropped {} obsolete entries", self.obsolete)?;
        }
        if self.duplicates > 0 {
            write!(f, "\nSkipped {} duplicate message(s)", self.duplicates)?;
        }
        Ok(())
    }
}

/// comment -> translation forms
type CommentTable = HashMap<String, Vec<String>>;

/// A loaded, read-only translation catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    language: Option<Locale>,
    plural_rule: PluralRule,
    /// context -> source -> comment -> forms
    entries: HashMap<String, HashMap<String, CommentTable>>,
    ids: HashMap<String, Vec<String>>,
    len: usize,
    stats: CatalogStats,
}

impl Catalog {
    /// A catalog without entries: every lookup falls back to the source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the lookup tables from a parsed document.
    pub fn from_document(document: &TsDocument, options: &LoadOptions) -> Self {
        let language = document.language.as_deref().and_then(|name| {
            Locale::parse(name)
                .map_err(|e| warn!(language = name, error = %e, "Ignoring catalog language"))
                .ok()
        });
        let plural_rule = language
            .as_ref()
            .map_or_else(PluralRule::default, PluralRule::for_locale);

        let mut catalog = Self {
            language,
            plural_rule,
            ..Self::default()
        };

        let mut seen: HashSet<MessageKey> = HashSet::new();
        for message in document.messages() {
            let translation = &message.translation;
            let stats = &mut catalog.stats;

            if !translation.kind.is_active() {
                stats.obsolete += 1;
                continue;
            }
            // The first occurrence owns the key even when it is not loaded.
            if !seen.insert(message.key()) {
                stats.duplicates += 1;
                warn!(key = %message.key(), "Duplicate message, keeping the first translation");
                continue;
            }
            if translation.is_empty() {
                stats.untranslated += 1;
                continue;
            }
            let unfinished = translation.kind == TranslationKind::Unfinished;
            if unfinished && !options.include_unfinished {
                stats.excluded_unfinished += 1;
                continue;
            }
            if options.remove_identical && translation.forms.iter().all(|f| *f == message.source) {
                stats.identical += 1;
                continue;
            }

            catalog
                .entries
                .entry(message.context.clone())
                .or_default()
                .entry(message.source.clone())
                .or_default()
                .insert(message.comment_str().to_string(), translation.forms.clone());

            if let Some(id) = &message.id {
                catalog
                    .ids
                    .entry(id.clone())
                    .or_insert_with(|| translation.forms.clone());
            }

            catalog.len += 1;
            if unfinished {
                stats.unfinished += 1;
            } else {
                stats.finished += 1;
            }
        }

        debug!(
            entries = catalog.len,
            language = ?catalog.language.as_ref().map(Locale::qt_name),
            plural_rule = ?catalog.plural_rule,
            "Built catalog"
        );
        catalog
    }

    /// Parse TS text and build a catalog from it.
    pub fn parse(input: &str, options: &LoadOptions) -> I18nResult<Self> {
        Ok(Self::from_document(&TsDocument::parse(input)?, options))
    }

    /// Read a TS file and build a catalog from it.
    pub fn from_path(path: impl AsRef<Path>, options: &LoadOptions) -> I18nResult<Self> {
        let path = path.as_ref();
        let catalog = Self::from_document(&TsDocument::from_path(path)?, options);
        info!(
            path = %path.display(),
            entries = catalog.len,
            untranslated = catalog.stats.untranslated,
            "Loaded translation catalog"
        );
        Ok(catalog)
    }

    fn forms(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&[String]> {
        let by_comment = self.entries.get(context)?.get(source)?;
        let comment = comment.unwrap_or_default();
        by_comment
            .get(comment)
            .or_else(|| {
                if comment.is_empty() {
                    None
                } else {
                    by_comment.get("")
                }
            })
            .map(Vec::as_slice)
    }

    /// The recorded translation, if there is a non-empty one.
    ///
    /// A non-empty `comment` that matches nothing is retried as empty.
    pub fn lookup(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        self.forms(context, source, comment)?
            .first()
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// The translation, or `source` itself when there is none.
    pub fn translate<'a>(&'a self, context: &str, source: &'a str, comment: Option<&str>) -> &'a str {
        self.lookup(context, source, comment).unwrap_or(source)
    }

    /// The numerus form for `n`, or `source`, with `%n` replaced by `n`.
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: i64,
    ) -> String {
        let template = self
            .forms(context, source, comment)
            .and_then(|forms| self.plural_rule.select(forms, n))
            .filter(|text| !text.is_empty())
            .unwrap_or(source);
        placeholder::replace_count(template, n)
    }

    /// Lookup by the message `id` attribute.
    pub fn translate_id(&self, id: &str) -> Option<&str> {
        self.ids
            .get(id)?
            .first()
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Whether a translation is recorded for the key.
    pub fn contains(&self, context: &str, source: &str, comment: Option<&str>) -> bool {
        self.lookup(context, source, comment).is_some()
    }

    /// Number of loaded entries.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no entry was loaded.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Catalog language, when the document declared a valid one.
    pub const fn language(&self) -> Option<&Locale> {
        self.language.as_ref()
    }

    /// Plural rule used by [`Catalog::translate_plural`].
    pub const fn plural_rule(&self) -> PluralRule {
        self.plural_rule
    }

    /// Load statistics.
    pub const fn stats(&self) -> &CatalogStats {
        &self.stats
    }

    /// Names of contexts with at least one entry, sorted.
    pub fn contexts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
