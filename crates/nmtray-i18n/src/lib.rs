//! # nm-tray i18n
//!
//! Qt Linguist translation catalogs for nm-tray.
//!
//! This crate reads `.ts` documents and answers lookups keyed by
//! (context, source, comment). It includes:
//!
//! - A streaming TS reader and a writer producing the extraction tool's layout
//! - Lookup with fallback to the source string
//! - Numerus form selection per language
//! - `QString::arg` style placeholder substitution
//! - Locale resolution and catalog file search
//! - Consistency checks for translators
//!
//! # Example
//!
//! ```rust
//! use nmtray_i18n::{placeholder, Catalog, LoadOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::parse(
//!     r#"<TS version="2.1" language="da"><context><name>Tray</name>
//!     <message><source>%1 about</source><translation>%1 om</translation></message>
//!     </context></TS>"#,
//!     &LoadOptions::default(),
//! )?;
//!
//! let title = placeholder::arg(catalog.translate("Tray", "%1 about", None), "nm-tray");
//! assert_eq!(title, "nm-tray om");
//! assert_eq!(catalog.translate("Tray", "Quit", None), "Quit");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod check;
pub mod error;
pub mod locale;
pub mod message;
pub mod placeholder;
pub mod plural;
pub mod translator;
mod ts;

pub use catalog::{Catalog, CatalogStats, LoadOptions};
pub use check::{check, has_errors, Finding, FindingKind, Severity};
pub use error::{I18nError, I18nResult};
pub use locale::Locale;
pub use message::{Context, Location, Message, MessageKey, Translation, TranslationKind, TsDocument};
pub use plural::PluralRule;
pub use translator::{install, installed, translate, translate_plural, Translator};

/// Translate through the installed translator.
///
/// ```rust
/// use nmtray_i18n::tr;
///
/// let quit = tr!("Tray", "Quit");
/// let speed = tr!("NmModel", "unknown", comment = "Speed");
/// let count = tr!("NmModel", "%n device(s)", count = 3);
/// assert_eq!(quit, "Quit");
/// assert_eq!(speed, "unknown");
/// assert_eq!(count, "3 device(s)");
/// ```
#[macro_export]
macro_rules! tr {
    ($context:expr, $source:expr) => {
        $crate::translate($context, $source, None)
    };
    ($context:expr, $source:expr, comment = $comment:expr) => {
        $crate::translate($context, $source, Some($comment))
    };
    ($context:expr, $source:expr, count = $count:expr) => {
        $crate::translate_plural($context, $source, None, $count)
    };
    ($context:expr, $source:expr, comment = $comment:expr, count = $count:expr) => {
        $crate::translate_plural($context, $source, Some($comment), $count)
    };
}
