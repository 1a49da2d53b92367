//! Consistency checks over a TS document.

use crate::locale::Locale;
use crate::message::{Location, Message, MessageKey, TsDocument};
use crate::placeholder;
use crate::plural::PluralRule;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, nothing is wrong.
    Info,
    /// The catalog loads but shows wrong text at runtime.
    Warning,
    /// The catalog is inconsistent.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// What was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FindingKind {
    /// The (context, source, comment) key occurs more than once.
    DuplicateKey,
    /// `%N` markers of the translation differ from those of the source.
    PlaceholderMismatch {
        /// Markers in the source.
        expected: Vec<u8>,
        /// Markers in the offending translation form.
        found: Vec<u8>,
    },
    /// A numerus translation has the wrong number of forms.
    NumerusFormCount {
        /// Forms required by the language's plural rule.
        expected: usize,
        /// Forms present.
        found: usize,
    },
    /// The translation is empty.
    Untranslated,
}

impl FindingKind {
    /// Severity of this kind of finding.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::DuplicateKey => Severity::Error,
            Self::PlaceholderMismatch { .. } | Self::NumerusFormCount { .. } => Severity::Warning,
            Self::Untranslated => Severity::Info,
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey => f.write_str("duplicate message"),
            Self::PlaceholderMismatch { expected, found } => write!(
                f,
                "placeholder mismatch, expected {expected:?}, found {found:?}"
            ),
            Self::NumerusFormCount { expected, found } => {
                write!(f, "expected {expected} numerus forms, found {found}")
            }
            Self::Untranslated => f.write_str("untranslated"),
        }
    }
}

/// A single check result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Severity, derived from the kind.
    pub severity: Severity,
    /// What was found.
    #[serde(flatten)]
    pub kind: FindingKind,
    /// Message the finding is about.
    pub key: MessageKey,
    /// First extraction location of that message.
    pub location: Option<Location>,
}

impl Finding {
    fn new(kind: FindingKind, message: &Message) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            key: message.key(),
            location: message.location().cloned(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.key, self.kind)?;
        if let Some(location) = &self.location {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

/// Check every active message of `document`.
///
/// Vanished and obsolete messages are not checked. Findings come in
/// document order.
pub fn check(document: &TsDocument) -> Vec<Finding> {
    let rule = document
        .language
        .as_deref()
        .and_then(|language| Locale::parse(language).ok())
        .map_or_else(PluralRule::default, |locale| PluralRule::for_locale(&locale));

    let mut seen = HashSet::new();
    let mut findings = Vec::new();

    for message in document.messages().filter(|m| m.translation.kind.is_active()) {
        if !seen.insert(message.key()) {
            findings.push(Finding::new(FindingKind::DuplicateKey, message));
        }

        let translation = &message.translation;
        if translation.is_empty() {
            findings.push(Finding::new(FindingKind::Untranslated, message));
            continue;
        }

        if message.numerus && translation.forms.len() != rule.form_count() {
            findings.push(Finding::new(
                FindingKind::NumerusFormCount {
                    expected: rule.form_count(),
                    found: translation.forms.len(),
                },
                message,
            ));
        }

        let expected = placeholder::markers(&message.source);
        let mismatch = translation
            .forms
            .iter()
            .filter(|form| !form.is_empty())
            .map(|form| placeholder::markers(form))
            .find(|found| *found != expected);
        if let Some(found) = mismatch {
            findings.push(Finding::new(
                FindingKind::PlaceholderMismatch {
                    expected: expected.into_iter().collect(),
                    found: found.into_iter().collect(),
                },
                message,
            ));
        }
    }

    findings
}

/// Whether any finding is an error.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmtray_common::test_utils::ts_fixtures;

    fn kinds(findings: &[Finding]) -> Vec<&FindingKind> {
        findings.iter().map(|f| &f.kind).collect()
    }

    #[test]
    fn test_duplicate_is_an_error() {
        let doc = TsDocument::parse(&ts_fixtures::single_context(
            "da",
            "Tray",
            &[("Quit", "Afslut"), ("Quit", "Luk")],
        ))
        .unwrap();
        let findings = check(&doc);

        assert_eq!(kinds(&findings), vec![&FindingKind::DuplicateKey]);
        assert!(has_errors(&findings));
        assert_eq!(findings[0].to_string(), "error: Tray::\"Quit\": duplicate message");
    }

    #[test]
    fn test_placeholder_mismatch() {
        let doc = TsDocument::parse(&ts_fixtures::single_context(
            "da",
            "Tray",
            &[("Now connected to %1 '%2'.", "Nu forbundet til %1."), ("%1 about", "%1 om")],
        ))
        .unwrap();
        let findings = check(&doc);

        assert_eq!(
            kinds(&findings),
            vec![&FindingKind::PlaceholderMismatch {
                expected: vec![1, 2],
                found: vec![1],
            }]
        );
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(!has_errors(&findings));
    }

    #[test]
    fn test_kinds_fixture() {
        let doc = TsDocument::parse(ts_fixtures::translation_kinds()).unwrap();
        let findings = check(&doc);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::Untranslated);
        assert_eq!(findings[0].key.source, "Enable Wi-Fi");
        assert_eq!(
            findings[0].to_string(),
            "info: Tray::\"Enable Wi-Fi\": untranslated (../src/tray.cpp:254)"
        );
    }

    #[test]
    fn test_numerus_form_count() {
        let doc = TsDocument::parse(
            r#"<TS version="2.1" language="da"><context><name>NmModel</name>
<message numerus="yes"><source>%n device(s)</source><translation>
<numerusform>%n enhed</numerusform><numerusform>%n enheder</numerusform><numerusform>%n enheder</numerusform>
</translation></message></context></TS>"#,
        )
        .unwrap();

        assert_eq!(
            kinds(&check(&doc)),
            vec![&FindingKind::NumerusFormCount {
                expected: 2,
                found: 3
            }]
        );
    }
}
