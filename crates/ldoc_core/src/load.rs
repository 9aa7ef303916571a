//! Reading documents from files.

use std::fs;
use std::path::Path;

use ldoc_ast::Document;
use ldoc_parser::{JsonReader, Reader};
use tracing::{debug, warn};

use crate::{LdocConfig, LdocError};

fn reader_for(path: &Path, config: &LdocConfig) -> JsonReader {
    let reader = JsonReader::with_limits(config.read_limits());
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    if !reader.can_read(extension) {
        warn!(path = %path.display(), "unexpected extension, reading as {}", reader.name());
    }
    reader
}

/// Reads the JSON object stored at `path`.
pub fn load_document(path: impl AsRef<Path>, config: &LdocConfig) -> Result<Document, LdocError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "loading document");
    Ok(reader_for(path, config).read(&bytes)?)
}

/// Reads every object of the line-delimited JSON file at `path`.
///
/// Fails on the first malformed object.
pub fn load_stream(path: impl AsRef<Path>, config: &LdocConfig) -> Result<Vec<Document>, LdocError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "loading stream");
    let documents = reader_for(path, config)
        .stream(&bytes)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldoc_parser::ParseError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, r#"{"a":{"b":1}}"#).unwrap();

        let doc = load_document(&path, &LdocConfig::new()).unwrap();
        assert_eq!(doc.root().descendant_count(), 1);

        let config = LdocConfig {
            max_depth: 1,
            ..LdocConfig::new()
        };
        let err = load_document(&path, &config).unwrap_err();
        assert!(matches!(err, LdocError::Parse(ParseError::TooDeep { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(dir.path().join("missing.json"), &LdocConfig::new()).unwrap_err();
        assert!(matches!(err, LdocError::Io(_)));
    }

    #[test]
    fn test_load_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.ldjson");
        fs::write(&path, "{\"a\":1}\n{\"b\":2}\n\n").unwrap();
        assert_eq!(load_stream(&path, &LdocConfig::new()).unwrap().len(), 2);

        fs::write(&path, "{\"a\":1}\n{\"b\":}\n").unwrap();
        let err = load_stream(&path, &LdocConfig::new()).unwrap_err();
        assert!(matches!(err, LdocError::Parse(ParseError::Invalid { offset: 13, .. })));
    }
}
