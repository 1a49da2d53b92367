//! Test utilities and shared fixtures for the nm-tray localization workspace.
//!
//! The fixtures are Qt Linguist documents in the exact shape the extraction
//! tool writes them, including the shipped Danish catalog.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Create a temporary translations directory holding the given files.
#[cfg(feature = "tempfile")]
pub fn create_translations_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = create_temp_dir();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).expect("Failed to write fixture file");
    }
    dir
}

/// Qt Linguist document fixtures.
pub mod ts_fixtures {
    /// The Danish catalog shipped with nm-tray.
    pub fn danish_catalog() -> &'static str {
        include_str!("../../../translations/nm-tray_da.ts")
    }

    /// Number of messages in [`danish_catalog`].
    pub const DANISH_MESSAGE_COUNT: usize = 48;

    /// Number of messages in [`danish_catalog`] with an empty translation.
    pub const DANISH_UNTRANSLATED_COUNT: usize = 8;

    /// A small German document exercising every translation kind.
    pub fn translation_kinds() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="de_DE" sourcelanguage="en">
<context>
    <name>Tray</name>
    <message>
        <location filename="../src/tray.cpp" line="265"/>
        <source>Quit</source>
        <translation>Beenden</translation>
    </message>
    <message>
        <location line="-2"/>
        <source>About</source>
        <translation type="unfinished">Über</translation>
    </message>
    <message>
        <source>Edit connections...</source>
        <translation type="vanished">Verbindungen bearbeiten...</translation>
    </message>
    <message>
        <source>Enable Wi-fi</source>
        <translation type="obsolete">WLAN aktivieren</translation>
    </message>
    <message>
        <location filename="../src/tray.cpp" line="254"/>
        <source>Enable Wi-Fi</source>
        <translation type="unfinished"></translation>
    </message>
    <message>
        <source>Debug information</source>
        <translation>Debug information</translation>
    </message>
</context>
</TS>
"#
    }

    /// A Polish document with numerus messages and a message id.
    pub fn numerus_forms() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE TS>
<TS version="2.1" language="pl_PL">
<context>
    <name>NmModel</name>
    <message numerus="yes">
        <location filename="../src/nmmodel.cpp" line="730"/>
        <source>%n active connection(s)</source>
        <translation>
            <numerusform>%n aktywne połączenie</numerusform>
            <numerusform>%n aktywne połączenia</numerusform>
            <numerusform>%n aktywnych połączeń</numerusform>
        </translation>
    </message>
    <message numerus="yes">
        <source>%n device(s)</source>
        <translation type="unfinished">
            <numerusform>%n urządzenie</numerusform>
            <numerusform></numerusform>
            <numerusform></numerusform>
        </translation>
    </message>
    <message id="nm-tray-quit">
        <source>Quit</source>
        <translation>Zakończ</translation>
    </message>
</context>
</TS>
"#
    }

    /// A document that is not well-formed XML.
    pub fn malformed() -> &'static str {
        r#"<?xml version="1.0" encoding="utf-8"?>
<TS version="2.1" language="da">
<context>
    <name>Tray</name>
    <message>
        <source>Quit</source>
        <translation>Afslut</source>
    </message>
</context>
</TS>
"#
    }

    /// Build a single-context document with the given (source, translation) pairs.
    pub fn single_context(language: &str, context: &str, messages: &[(&str, &str)]) -> String {
        let mut doc = format!(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.1\" language=\"{language}\">\n<context>\n    <name>{context}</name>\n"
        );
        for (source, translation) in messages {
            doc.push_str(&format!(
                "    <message>\n        <source>{source}</source>\n        <translation>{translation}</translation>\n    </message>\n"
            ));
        }
        doc.push_str("</context>\n</TS>\n");
        doc
    }
}
