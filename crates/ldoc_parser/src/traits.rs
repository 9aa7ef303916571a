//! Reader trait definition.

use ldoc_ast::Document;

use crate::ParseError;

/// Trait for reading source bytes into a [`Document`].
///
/// # Example
///
/// ```rust
/// use ldoc_parser::{JsonReader, Reader};
///
/// let reader = JsonReader::new();
/// assert!(reader.can_read("JSON"));
/// assert!(!reader.can_read("md"));
///
/// let doc = reader.read(br#"{"title":"hello"}"#).unwrap();
/// assert_eq!(doc.root().entity_count(), 1);
/// ```
pub trait Reader {
    /// Returns the name of this reader.
    fn name(&self) -> &str;

    /// Returns the file extensions this reader handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["json"]`).
    fn extensions(&self) -> &[&str];

    /// Reads the source into a document.
    ///
    /// For line-delimited formats this returns the first document.
    fn read(&self, source: &[u8]) -> Result<Document, ParseError>;

    /// Returns true if this reader can handle the given file extension.
    fn can_read(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
