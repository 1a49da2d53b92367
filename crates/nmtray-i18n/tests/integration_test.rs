//! Integration tests against the shipped Danish catalog.

use nmtray_common::test_utils::{init_test_logging, ts_fixtures};
use nmtray_i18n::{check, placeholder, Catalog, FindingKind, LoadOptions, TsDocument};
use std::sync::Arc;
use std::thread;

fn danish() -> (TsDocument, Catalog) {
    init_test_logging();
    let doc = TsDocument::parse(ts_fixtures::danish_catalog()).unwrap();
    let catalog = Catalog::from_document(&doc, &LoadOptions::default());
    (doc, catalog)
}

#[test]
fn test_document_shape() {
    let (doc, _) = danish();

    assert_eq!(doc.version, "2.1");
    assert_eq!(doc.language.as_deref(), Some("da"));
    assert_eq!(doc.message_count(), ts_fixtures::DANISH_MESSAGE_COUNT);
    let names: Vec<_> = doc.contexts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ConnectionInfo", "NmList", "NmModel", "Tray", "WindowMenu"]);
    assert!(doc.messages().all(|m| m.location().is_some()));
}

#[test]
fn test_every_key_resolves_to_its_translation_or_source() {
    let (doc, catalog) = danish();

    for message in doc.messages() {
        let expected = if message.translation.is_empty() {
            message.source.as_str()
        } else {
            message.translation.text()
        };
        assert_eq!(
            catalog.translate(&message.context, &message.source, message.comment.as_deref()),
            expected,
            "{}",
            message.key()
        );
    }
}

#[test]
fn test_stats_match_release_tool() {
    let (_, catalog) = danish();
    let stats = catalog.stats();

    assert_eq!(stats.untranslated, ts_fixtures::DANISH_UNTRANSLATED_COUNT);
    assert_eq!(
        stats.finished,
        ts_fixtures::DANISH_MESSAGE_COUNT - ts_fixtures::DANISH_UNTRANSLATED_COUNT
    );
    assert_eq!(stats.unfinished, 0);
    assert_eq!(stats.duplicates, 0);
    assert_eq!(catalog.len(), stats.finished);
    assert_eq!(
        stats.to_string(),
        "Generated 40 translation(s) (40 finished and 0 unfinished)\n\
         Ignored 8 untranslated source text(s)"
    );
}

#[test]
fn test_known_translations() {
    let (_, catalog) = danish();

    assert_eq!(
        catalog.translate("ConnectionInfo", "Connection information", None),
        "Forbindelsesinformation"
    );
    assert_eq!(catalog.translate("NmList", "Active connections", None), "Aktive forbindelser");
    assert_eq!(
        catalog.translate("NmModel", "General", Some("Active connection information")),
        "Generelt"
    );
}

#[test]
fn test_unknown_keys_fall_back_to_source() {
    let (_, catalog) = danish();

    // The tray menu asks for "Wi-fi" while the catalog records "Wi-Fi".
    assert_eq!(catalog.translate("Tray", "Enable Wi-fi", None), "Enable Wi-fi");
    assert_eq!(catalog.translate("NoSuchContext", "Quit", None), "Quit");
    assert_eq!(catalog.translate("NmModel", " Kb/s", None), " Kb/s");
    assert_eq!(catalog.translate("NmModel", "DNS(%1)", Some("Active connection information")), "DNS(%1)");
}

#[test]
fn test_comment_disambiguates() {
    let (_, catalog) = danish();

    assert_eq!(
        catalog.lookup("NmModel", "unknown", Some("hardware address")),
        Some("ukendt")
    );
    assert_eq!(catalog.lookup("NmModel", "unknown", Some("Speed")), Some("ukendt"));
    assert_eq!(catalog.lookup("NmModel", "unknown", None), None);
}

#[test]
fn test_markup_and_placeholders_are_verbatim() {
    let (_, catalog) = danish();

    let text = catalog.translate("Tray", "Now connected to %1 '%2'.", None);
    assert_eq!(text, "Nu forbundet til %1 '%2'.");
    assert_eq!(
        placeholder::args(text, &["Wi-Fi", "home"]),
        "Nu forbundet til Wi-Fi 'home'."
    );

    let active = catalog.translate(
        "Tray",
        "<pre>Connection <strong>%1</strong>(%2) active</pre>",
        None,
    );
    assert_eq!(active, "<pre>Forbindelse <strong>%1</strong>(%2) aktiv</pre>");
    assert_eq!(placeholder::arg(catalog.translate("Tray", "%1 about", None), "nm-tray"), "nm-tray om");
}

#[test]
fn test_checks_report_only_untranslated() {
    let (doc, _) = danish();
    let findings = check(&doc);

    assert_eq!(findings.len(), ts_fixtures::DANISH_UNTRANSLATED_COUNT);
    assert!(findings.iter().all(|f| f.kind == FindingKind::Untranslated));
}

#[test]
fn test_writer_reproduces_shipped_file() {
    let (doc, _) = danish();
    let written = doc.to_xml();

    assert_eq!(written, ts_fixtures::danish_catalog());
    assert_eq!(TsDocument::parse(&written).unwrap(), doc);
}

#[test]
fn test_concurrent_lookups() {
    let (doc, catalog) = danish();
    let catalog = Arc::new(catalog);
    let doc = Arc::new(doc);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            let doc = Arc::clone(&doc);
            thread::spawn(move || {
                for message in doc.messages() {
                    let text =
                        catalog.translate(&message.context, &message.source, message.comment.as_deref());
                    assert!(!text.is_empty());
                }
                catalog.translate("Tray", "Quit", None).to_string()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "Afslut");
    }
}

#[test]
fn test_malformed_document() {
    init_test_logging();
    let err = Catalog::parse(ts_fixtures::malformed(), &LoadOptions::default()).unwrap_err();
    assert!(err.is_malformed());
}
