//! Data model of a Qt Linguist document.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a translation as recorded by the `type` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationKind {
    /// No `type` attribute: approved by a translator.
    #[default]
    Finished,
    /// Present in the sources but not yet approved.
    Unfinished,
    /// No longer present in the sources (current extraction tool).
    Vanished,
    /// No longer present in the sources (older extraction tool).
    Obsolete,
}

impl TranslationKind {
    /// Parse the value of the `type` attribute.
    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        match value {
            None | Some("") => Some(Self::Finished),
            Some("unfinished") => Some(Self::Unfinished),
            Some("vanished") => Some(Self::Vanished),
            Some("obsolete") => Some(Self::Obsolete),
            Some(_) => None,
        }
    }

    /// Value written to the `type` attribute, if any.
    pub const fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Vanished => Some("vanished"),
            Self::Obsolete => Some("obsolete"),
        }
    }

    /// Whether the message still exists in the application sources.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Finished | Self::Unfinished)
    }
}

/// Where a message was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Source file, relative to the TS file.
    pub file: String,
    /// One-based line number, when recorded.
    pub line: Option<u32>,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => f.write_str(&self.file),
        }
    }
}

/// The translated side of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Approval state.
    pub kind: TranslationKind,
    /// One entry for plain messages, one per plural form for numerus messages.
    /// An empty first form means the message is untranslated.
    pub forms: Vec<String>,
    /// Length variants, longest first, when the translator supplied them.
    /// `forms[0]` is always the first variant.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,
}

impl Translation {
    /// A finished single-form translation.
    pub fn finished(text: impl Into<String>) -> Self {
        Self {
            kind: TranslationKind::Finished,
            forms: vec![text.into()],
            variants: Vec::new(),
        }
    }

    /// The text used for plain lookups.
    pub fn text(&self) -> &str {
        self.forms.first().map_or("", String::as_str)
    }

    /// Whether no form carries any text.
    pub fn is_empty(&self) -> bool {
        self.forms.iter().all(String::is_empty)
    }
}

/// Identity of a message inside a catalog.
///
/// An absent comment and an empty comment are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageKey {
    /// Context name.
    pub context: String,
    /// Untranslated text.
    pub source: String,
    /// Disambiguation comment, empty when none.
    pub comment: String,
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.comment.is_empty() {
            write!(f, "{}::{:?}", self.context, self.source)
        } else {
            write!(f, "{}::{:?} ({})", self.context, self.source, self.comment)
        }
    }
}

/// A single translatable string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Name of the enclosing context.
    pub context: String,
    /// Explicit message id (`qsTrId` style), if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Untranslated text, entities decoded.
    pub source: String,
    /// Disambiguation comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the message has plural forms.
    #[serde(default)]
    pub numerus: bool,
    /// Translated side.
    pub translation: Translation,
    /// Extraction locations.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Source text before the last change in the application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_source: Option<String>,
    /// Comment before the last change in the application.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_comment: Option<String>,
    /// Developer note for translators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    /// Translator's own note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
}

impl Message {
    /// Comment as used for lookups: empty when absent.
    pub fn comment_str(&self) -> &str {
        self.comment.as_deref().unwrap_or("")
    }

    /// The catalog key of this message.
    pub fn key(&self) -> MessageKey {
        MessageKey {
            context: self.context.clone(),
            source: self.source.clone(),
            comment: self.comment_str().to_string(),
        }
    }

    /// First recorded location.
    pub fn location(&self) -> Option<&Location> {
        self.locations.first()
    }
}

/// A block of messages from one UI component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Context name, e.g. `Tray`.
    pub name: String,
    /// Optional context-level comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Messages in document order. Each carries `name` as its context.
    pub messages: Vec<Message>,
}

/// A whole TS document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TsDocument {
    /// Format version, `2.1` for current tools.
    pub version: String,
    /// Target language as written, e.g. `da` or `pt_BR`.
    pub language: Option<String>,
    /// Language of the source strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    /// Contexts in document order.
    pub contexts: Vec<Context>,
}

impl Default for TsDocument {
    fn default() -> Self {
        Self {
            version: "2.1".to_string(),
            language: None,
            source_language: None,
            contexts: Vec::new(),
        }
    }
}

impl TsDocument {
    /// All messages in document order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.contexts.iter().flat_map(|c| c.messages.iter())
    }

    /// Number of messages across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Find a context by name.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }
}
