//! Reading and writing Qt Linguist `.ts` documents.
//!
//! The reader accepts everything Qt's own tools emit: entity and `<byte>`
//! escapes, relative locations, numerus forms and length variants. Unknown
//! elements are skipped. The writer emits the TS 2.1 layout with absolute
//! locations, so a file written by the extraction tool in absolute mode
//! reads back and writes out unchanged.

mod reader;
mod writer;

use crate::error::{I18nError, I18nResult};
use crate::message::TsDocument;
use std::path::Path;
use std::str::FromStr;

impl TsDocument {
    /// Parse a document from its XML text.
    pub fn parse(input: &str) -> I18nResult<Self> {
        reader::parse_document(input)
    }

    /// Read and parse a document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> I18nResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| I18nError::ResourceLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&input)
    }

    /// Serialize in the layout used by Qt's extraction tool.
    pub fn to_xml(&self) -> String {
        writer::write_document(self)
    }
}

impl FromStr for TsDocument {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nm-tray_xx.ts");

        let err = TsDocument::from_path(&path).unwrap_err();
        assert!(matches!(err, I18nError::ResourceLoad { path: ref p, .. } if *p == path));
        assert!(!err.is_malformed());
    }
}
