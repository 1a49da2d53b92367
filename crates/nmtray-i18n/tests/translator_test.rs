//! Catalog file search, load failure policy and the installed translator.

use nmtray_common::test_utils::{create_translations_dir, init_test_logging, ts_fixtures};
use nmtray_config::I18nSettings;
use nmtray_i18n::{install, installed, tr, I18nError, Locale, Translator};
use std::path::Path;

fn settings(dir: &Path, language: &str) -> I18nSettings {
    I18nSettings {
        translations_dir: dir.to_path_buf(),
        language: Some(language.to_string()),
        ..I18nSettings::default()
    }
}

#[test]
fn test_region_falls_back_to_language_file() {
    init_test_logging();
    let dir = create_translations_dir(&[("nm-tray_da.ts", ts_fixtures::danish_catalog())]);

    let translator = Translator::try_load(&settings(dir.path(), "da_DK.UTF-8")).unwrap();

    assert_eq!(translator.source_path(), Some(dir.path().join("nm-tray_da.ts").as_path()));
    assert_eq!(translator.locale().map(Locale::qt_name).as_deref(), Some("da_DK"));
    assert_eq!(translator.translate("Tray", "Quit", None), "Afslut");
}

#[test]
fn test_most_specific_file_wins() {
    let regional = ts_fixtures::single_context("da_DK", "Tray", &[("Quit", "Luk")]);
    let dir = create_translations_dir(&[
        ("nm-tray_da.ts", ts_fixtures::danish_catalog()),
        ("nm-tray_da_DK.ts", regional.as_str()),
    ]);

    let translator = Translator::try_load(&settings(dir.path(), "da_DK")).unwrap();
    assert_eq!(translator.translate("Tray", "Quit", None), "Luk");
}

#[test]
fn test_language_from_environment() {
    let dir = create_translations_dir(&[("nm-tray_da.ts", ts_fixtures::danish_catalog())]);
    let settings = I18nSettings {
        translations_dir: dir.path().to_path_buf(),
        ..I18nSettings::default()
    };

    let translator = Translator::try_load_with(&settings, |var| match var {
        "LANGUAGE" => Some(String::new()),
        "LANG" => Some("da_DK.UTF-8".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(translator.translate("WindowMenu", "Known connection(s)", None), "Kendte forbindelser");
}

#[test]
fn test_missing_catalog() {
    init_test_logging();
    let dir = create_translations_dir(&[]);
    let settings = settings(dir.path(), "pl_PL");

    match Translator::try_load(&settings) {
        Err(I18nError::CatalogNotFound { locale, tried, .. }) => {
            assert_eq!(locale, "pl_PL");
            assert_eq!(tried, vec!["nm-tray_pl_PL.ts", "nm-tray_pl.ts", "nm-tray.ts"]);
        }
        other => panic!("expected CatalogNotFound, got {other:?}"),
    }

    let translator = Translator::load(&settings);
    assert!(translator.is_untranslated());
    assert_eq!(translator.translate("Tray", "Quit", None), "Quit");
}

#[test]
fn test_malformed_catalog_falls_back_to_untranslated() {
    init_test_logging();
    let dir = create_translations_dir(&[("nm-tray_da.ts", ts_fixtures::malformed())]);
    let settings = settings(dir.path(), "da");

    assert!(Translator::try_load(&settings).unwrap_err().is_malformed());

    let translator = Translator::load(&settings);
    assert!(translator.is_untranslated());
    assert_eq!(translator.translate("Tray", "Quit", None), "Quit");
}

#[test]
fn test_unfinished_excluded_by_settings() {
    let dir = create_translations_dir(&[("nm-tray_de.ts", ts_fixtures::translation_kinds())]);
    let settings = I18nSettings {
        include_unfinished: false,
        ..settings(dir.path(), "de")
    };

    let translator = Translator::try_load(&settings).unwrap();
    assert_eq!(translator.translate("Tray", "Quit", None), "Beenden");
    assert_eq!(translator.translate("Tray", "About", None), "About");
}

#[test]
fn test_install_once() {
    init_test_logging();
    assert_eq!(tr!("Tray", "Quit"), "Quit");

    let dir = create_translations_dir(&[("nm-tray_da.ts", ts_fixtures::danish_catalog())]);
    let translator = Translator::try_load(&settings(dir.path(), "da")).unwrap();
    install(translator.clone()).unwrap();

    assert!(matches!(install(translator), Err(I18nError::AlreadyInstalled)));
    assert!(installed().is_some_and(|t| !t.is_untranslated()));
    assert_eq!(tr!("Tray", "Quit"), "Afslut");
    assert_eq!(tr!("NmModel", "unknown", comment = "Speed"), "ukendt");
    assert_eq!(tr!("Tray", "Enable Wi-fi"), "Enable Wi-fi");
    assert_eq!(tr!("Tray", "%n connection(s)", count = 2), "2 connection(s)");
}
