//! Numerus form selection per language.
//!
//! Rules follow the ones Qt's translation tools assign to each language, so
//! the number of `<numerusform>` entries a translator writes matches what
//! [`PluralRule::form_count`] expects.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};

/// Plural rule families.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    /// A single form for every count (Japanese, Chinese, Korean, ...).
    None,
    /// `1` is singular, everything else plural (Danish, English, German, ...).
    #[default]
    OneOther,
    /// `0` and `1` are singular (French, Brazilian Portuguese).
    French,
    /// Russian, Ukrainian, Belarusian: one / few / many.
    EastSlavic,
    /// Polish: one / few / many.
    Polish,
    /// Czech and Slovak: one / 2-4 / other.
    Czech,
}

impl PluralRule {
    /// Rule for a bare language code with an optional region.
    pub fn for_language(language: &str, region: Option<&str>) -> Self {
        match (language, region) {
            ("pt", Some("BR")) => Self::French,
            ("ja" | "zh" | "ko" | "vi" | "th" | "id" | "tr", _) => Self::None,
            ("fr", _) => Self::French,
            ("ru" | "uk" | "be", _) => Self::EastSlavic,
            ("pl", _) => Self::Polish,
            ("cs" | "sk", _) => Self::Czech,
            _ => Self::OneOther,
        }
    }

    /// Rule for a resolved locale.
    pub fn for_locale(locale: &Locale) -> Self {
        Self::for_language(locale.language(), locale.region())
    }

    /// Number of numerus forms a translation under this rule carries.
    pub const fn form_count(self) -> usize {
        match self {
            Self::None => 1,
            Self::OneOther | Self::French => 2,
            Self::EastSlavic | Self::Polish | Self::Czech => 3,
        }
    }

    /// Index of the form to use for `n`, in `0..form_count()`.
    pub const fn form_index(self, n: i64) -> usize {
        let n = n.unsigned_abs();
        let (n10, n100) = (n % 10, n % 100);
        let few = n10 >= 2 && n10 <= 4 && (n100 < 10 || n100 >= 20);

        match self {
            Self::None => 0,
            Self::OneOther => (n != 1) as usize,
            Self::French => (n > 1) as usize,
            Self::EastSlavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            Self::Polish => {
                if n == 1 {
                    0
                } else if few {
                    1
                } else {
                    2
                }
            }
            Self::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
        }
    }

    /// Pick the form for `n` from the forms actually present.
    ///
    /// The index is clamped to the last form, so a translation with too few
    /// forms still yields text. Returns `None` when `forms` is empty.
    pub fn select<S: AsRef<str>>(self, forms: &[S], n: i64) -> Option<&str> {
        let last = forms.len().checked_sub(1)?;
        forms.get(self.form_index(n).min(last)).map(|s| s.as_ref())
    }
}
