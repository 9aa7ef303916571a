//! JSON and LDJSON reader.
//!
//! A recursive-descent reader over a byte slice. Objects become
//! [`NodeKind::Unassigned`] nodes and arrays [`NodeKind::OrderedList`]
//! nodes; a nested container remembers its member key as markup.
//! Scalars become entities: reference kinds when they sit under a key,
//! plain kinds inside arrays.
//!
//! The reader never produces a partial document: the first malformed
//! construct aborts the read with the byte offset where it was detected.

use ldoc_ast::{Datum, Document, Entity, EntityKind, Markup, NodeId, NodeKind};
use tracing::debug;

use crate::{ParseError, ReadLimits, Reader};

/// Reads JSON documents and line-delimited JSON streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReader {
    limits: ReadLimits,
}

impl JsonReader {
    /// Creates a reader with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with the given limits.
    pub fn with_limits(limits: ReadLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ReadLimits {
        self.limits
    }

    /// Reads a single JSON object.
    ///
    /// The first non-whitespace byte must be `{`. Bytes after the closing
    /// brace are not inspected.
    pub fn read_json(&self, source: &[u8]) -> Result<Document, ParseError> {
        self.read_document(source, 0).map(|(doc, _)| doc)
    }

    /// Reads the next object of a line-delimited stream.
    ///
    /// Parsing starts at `*next`. On success `*next` is moved just past the
    /// object. Returns `Ok(None)` once `*next` reaches the end of the input
    /// or only whitespace remains. On failure `*next` is left untouched.
    pub fn read_ldjson(&self, source: &[u8], next: &mut usize) -> Result<Option<Document>, ParseError> {
        if *next >= source.len() {
            return Ok(None);
        }

        let mut cursor = Cursor::new(source, *next, self.limits);
        cursor.skip_whitespace();
        if cursor.at_end() {
            *next = source.len();
            return Ok(None);
        }

        let (doc, end) = self.read_document(source, *next)?;
        *next = end;
        Ok(Some(doc))
    }

    /// Iterates over every object of a line-delimited stream.
    pub fn stream<'s>(&self, source: &'s [u8]) -> LdjsonStream<'s> {
        LdjsonStream {
            reader: *self,
            source,
            next: 0,
            failed: false,
        }
    }

    fn read_document(&self, source: &[u8], start: usize) -> Result<(Document, usize), ParseError> {
        let mut cursor = Cursor::new(source, start, self.limits);
        cursor.skip_whitespace();
        if cursor.peek() != Some(b'{') {
            let err = ParseError::invalid_at("expected '{' at start of document", cursor.pos);
            debug!(%err, "JSON read failed");
            return Err(err);
        }

        let mut doc = Document::new();
        let root = doc.root_id();
        match cursor.parse_object(&mut doc, root) {
            Ok(()) => {
                debug!(start, end = cursor.pos, nodes = doc.len(), "read JSON document");
                Ok((doc, cursor.pos))
            }
            Err(err) => {
                debug!(%err, "JSON read failed");
                Err(err)
            }
        }
    }
}

impl Reader for JsonReader {
    fn name(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json", "jsonld", "ldjson", "jsonl"]
    }

    fn read(&self, source: &[u8]) -> Result<Document, ParseError> {
        self.read_json(source)
    }
}

/// Reads a single JSON object with default limits.
pub fn read_json(source: &[u8]) -> Result<Document, ParseError> {
    JsonReader::new().read_json(source)
}

/// Reads the next object of a line-delimited stream with default limits.
pub fn read_ldjson(source: &[u8], next: &mut usize) -> Result<Option<Document>, ParseError> {
    JsonReader::new().read_ldjson(source, next)
}

/// Iterator over the objects of a line-delimited stream.
///
/// Stops after the first error.
#[derive(Debug)]
pub struct LdjsonStream<'s> {
    reader: JsonReader,
    source: &'s [u8],
    next: usize,
    failed: bool,
}

impl LdjsonStream<'_> {
    /// Offset at which the next object will be read.
    pub fn offset(&self) -> usize {
        self.next
    }
}

impl Iterator for LdjsonStream<'_> {
    type Item = Result<Document, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read_ldjson(self.source, &mut self.next) {
            Ok(Some(doc)) => Some(Ok(doc)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Read position into the source plus the current nesting depth.
struct Cursor<'s> {
    src: &'s [u8],
    pos: usize,
    depth: usize,
    limits: ReadLimits,
}

impl<'s> Cursor<'s> {
    fn new(src: &'s [u8], pos: usize, limits: ReadLimits) -> Self {
        Self {
            src,
            pos,
            depth: 0,
            limits,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\r' | b'\n' | b'\t')) {
            self.pos += 1;
        }
    }

    /// Consumes a `,` separator and the whitespace around it.
    fn next_item(&mut self) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(b',') {
            self.pos += 1;
            self.skip_whitespace();
            return true;
        }
        false
    }

    fn expect(&mut self, byte: u8, message: &str) -> Result<(), ParseError> {
        if self.peek() != Some(byte) {
            return Err(ParseError::invalid_at(message, self.pos));
        }
        self.pos += 1;
        Ok(())
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        match self.limits.max_depth {
            Some(limit) if self.depth > limit => {
                Err(ParseError::too_deep(self.depth, limit, self.pos))
            }
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_object(&mut self, doc: &mut Document, node: NodeId) -> Result<(), ParseError> {
        self.enter()?;
        self.pos += 1;

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    self.leave();
                    return Ok(());
                }
                Some(b'"') => {}
                _ => return Err(ParseError::invalid_at("expected object key", self.pos)),
            }

            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(b':', "expected ':' after object key")?;
            self.skip_whitespace();
            self.parse_member(doc, node, Some(key))?;

            if !self.next_item() {
                break;
            }
        }

        self.expect(b'}', "expected ',' or '}' after object member")?;
        self.leave();
        Ok(())
    }

    fn parse_array(&mut self, doc: &mut Document, node: NodeId) -> Result<(), ParseError> {
        self.enter()?;
        self.pos += 1;
        self.skip_whitespace();

        if self.peek() == Some(b']') {
            self.pos += 1;
            self.leave();
            return Ok(());
        }

        loop {
            self.parse_member(doc, node, None)?;
            if !self.next_item() {
                break;
            }
        }

        self.expect(b']', "expected ',' or ']' after array element")?;
        self.leave();
        Ok(())
    }

    /// Parses one object member value or array element into `parent`.
    fn parse_member(
        &mut self,
        doc: &mut Document,
        parent: NodeId,
        key: Option<String>,
    ) -> Result<(), ParseError> {
        match self.peek() {
            Some(open @ (b'{' | b'[')) => {
                let kind = if open == b'{' {
                    NodeKind::Unassigned
                } else {
                    NodeKind::OrderedList
                };
                let child = doc.create_node_with_markup(kind, key.map(Markup::new))?;
                doc.append_child(parent, child)?;
                if open == b'{' {
                    self.parse_object(doc, child)
                } else {
                    self.parse_array(doc, child)
                }
            }
            Some(_) => {
                let entity = self.parse_value(key)?;
                doc.append_entity(parent, entity)?;
                Ok(())
            }
            None => Err(ParseError::invalid_at("unexpected end of input", self.pos)),
        }
    }

    fn parse_value(&mut self, key: Option<String>) -> Result<Entity, ParseError> {
        match self.peek() {
            Some(b'"') => {
                let text = self.parse_string()?;
                Ok(scalar(
                    EntityKind::Text,
                    EntityKind::OntologyReference,
                    key,
                    Some(Datum::Text(text)),
                ))
            }
            Some(b'-' | b'0'..=b'9') => {
                let literal = self.parse_number()?;
                Ok(scalar(
                    EntityKind::Number,
                    EntityKind::NumberReference,
                    key,
                    Some(Datum::Number(literal)),
                ))
            }
            _ => {
                let rest = &self.src[self.pos..];
                if rest.starts_with(b"null") {
                    self.pos += 4;
                    Ok(scalar(EntityKind::Text, EntityKind::OntologyReference, key, None))
                } else if rest.starts_with(b"true") {
                    self.pos += 4;
                    Ok(scalar(
                        EntityKind::Boolean,
                        EntityKind::BooleanReference,
                        key,
                        Some(Datum::Bool(true)),
                    ))
                } else if rest.starts_with(b"false") {
                    self.pos += 5;
                    Ok(scalar(
                        EntityKind::Boolean,
                        EntityKind::BooleanReference,
                        key,
                        Some(Datum::Bool(false)),
                    ))
                } else {
                    Err(ParseError::invalid_at("expected a value", self.pos))
                }
            }
        }
    }

    fn digits(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(ParseError::invalid_at("expected digit", self.pos));
        }
        Ok(())
    }

    /// Number literal: sign, digits, optional fraction, optional exponent.
    fn parse_number(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        self.digits()?;
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.digits()?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            self.digits()?;
        }
        Ok(String::from_utf8_lossy(&self.src[start..self.pos]).into_owned())
    }

    /// Quoted string with escapes decoded.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut bytes = Vec::new();

        loop {
            match self.peek() {
                None => return Err(ParseError::invalid_at("unterminated string", self.pos)),
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    self.pos += 1;
                    self.parse_escape(&mut bytes)?;
                }
                Some(byte) => {
                    bytes.push(byte);
                    self.pos += 1;
                }
            }
        }

        String::from_utf8(bytes).map_err(|_| ParseError::invalid_at("invalid UTF-8 in string", start))
    }

    fn parse_escape(&mut self, out: &mut Vec<u8>) -> Result<(), ParseError> {
        let Some(byte) = self.peek() else {
            return Err(ParseError::invalid_at("unterminated escape", self.pos));
        };
        let decoded = match byte {
            b'"' => b'"',
            b'\\' => b'\\',
            b'/' => b'/',
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'u' => {
                self.pos += 1;
                let ch = self.parse_unicode_escape()?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                return Ok(());
            }
            _ => return Err(ParseError::invalid_at("invalid escape", self.pos)),
        };
        out.push(decoded);
        self.pos += 1;
        Ok(())
    }

    /// Decodes the hex digits after `\u`, joining surrogate pairs. A lone
    /// surrogate decodes to U+FFFD.
    fn parse_unicode_escape(&mut self) -> Result<char, ParseError> {
        let high = self.hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return Ok(char::from_u32(high).unwrap_or(char::REPLACEMENT_CHARACTER));
        }

        if self.src[self.pos..].starts_with(b"\\u") {
            let resume = self.pos;
            self.pos += 2;
            let low = self.hex4()?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.pos = resume;
        }
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn hex4(&mut self) -> Result<u32, ParseError> {
        let start = self.pos;
        let Some(digits) = self.src.get(start..start + 4) else {
            return Err(ParseError::invalid_at("truncated unicode escape", start));
        };
        let mut code = 0;
        for &digit in digits {
            let value = char::from(digit)
                .to_digit(16)
                .ok_or_else(|| ParseError::invalid_at("invalid unicode escape", start))?;
            code = code * 16 + value;
        }
        self.pos += 4;
        Ok(code)
    }
}

/// Builds a scalar entity: a reference pair under a key, a plain datum otherwise.
fn scalar(plain: EntityKind, reference: EntityKind, key: Option<String>, datum: Option<Datum>) -> Entity {
    match (key, datum) {
        (Some(key), datum) => Entity::with_pair(reference, key, datum),
        (None, Some(datum)) => Entity::with_datum(plain, datum),
        (None, None) => Entity::new(plain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldoc_ast::{NodeRef, Payload};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn first_child(node: NodeRef<'_>) -> NodeRef<'_> {
        node.children().next().expect("node has a child")
    }

    #[test]
    fn test_read_empty_object() {
        let doc = read_json(b"{}").unwrap();
        assert_eq!(doc.root().kind(), NodeKind::Root);
        assert_eq!(doc.root().entity_count(), 0);
        assert_eq!(doc.root().descendant_count(), 0);
    }

    #[test]
    fn test_members_become_reference_entities() {
        let doc = read_json(br#"{ "s" : "x", "n" : -1.5e3, "t" : true, "z" : null }"#).unwrap();
        let entities = doc.root().entities();
        assert_eq!(
            entities,
            &[
                Entity::reference("s", "x"),
                Entity::with_pair(EntityKind::NumberReference, "n", Some(Datum::Number("-1.5e3".into()))),
                Entity::with_pair(EntityKind::BooleanReference, "t", Some(Datum::Bool(true))),
                Entity::with_pair(EntityKind::OntologyReference, "z", None),
            ]
        );
    }

    #[test]
    fn test_array_elements_are_plain() {
        let doc = read_json(br#"{"list":["a",2,false,null]}"#).unwrap();
        let list = first_child(doc.root());
        assert_eq!(list.kind(), NodeKind::OrderedList);
        assert_eq!(list.label(), Some("list"));
        assert_eq!(
            list.entities(),
            &[
                Entity::text("a"),
                Entity::with_datum(EntityKind::Number, Datum::Number("2".into())),
                Entity::with_datum(EntityKind::Boolean, Datum::Bool(false)),
                Entity::new(EntityKind::Text),
            ]
        );
    }

    #[test]
    fn test_nested_containers() {
        let doc = read_json(br#"{"outer":{"inner":[[{"deep":1}]]}}"#).unwrap();
        let outer = first_child(doc.root());
        assert_eq!(outer.kind(), NodeKind::Unassigned);
        assert_eq!(outer.label(), Some("outer"));

        let inner = first_child(outer);
        assert_eq!(inner.kind(), NodeKind::OrderedList);
        let nested = first_child(inner);
        assert_eq!(nested.kind(), NodeKind::OrderedList);
        assert_eq!(nested.label(), None);
        let object = first_child(nested);
        assert_eq!(object.kind(), NodeKind::Unassigned);
        assert_eq!(object.label(), None);
        assert_eq!(object.depth(), 4);
        assert_eq!(doc.root().height(), 4);
    }

    #[test]
    fn test_empty_array_is_kept() {
        let doc = read_json(br#"{"key1":[]}"#).unwrap();
        let list = first_child(doc.root());
        assert_eq!(list.kind(), NodeKind::OrderedList);
        assert_eq!(list.entity_count(), 0);
        assert_eq!(list.descendant_count(), 0);
    }

    #[rstest]
    #[case::newline(r#""Hello\n""#, "Hello\n")]
    #[case::quote(r#""say \"hi\"""#, "say \"hi\"")]
    #[case::solidus(r#""a\/b""#, "a/b")]
    #[case::control(r#""\b\f\r\t""#, "\u{8}\u{c}\r\t")]
    #[case::unicode(r#""caf\u00e9""#, "café")]
    #[case::surrogate_pair(r#""\ud83d\ude00""#, "😀")]
    #[case::lone_surrogate(r#""\ud83dx""#, "\u{fffd}x")]
    #[case::raw_utf8(r#""日本""#, "日本")]
    fn test_string_escapes(#[case] literal: &str, #[case] expected: &str) {
        let source = format!(r#"{{"k":{literal}}}"#);
        let doc = read_json(source.as_bytes()).unwrap();
        assert_eq!(doc.root().entities()[0].text_value(), Some(expected));
    }

    #[rstest]
    #[case::integer("0")]
    #[case::negative("-12")]
    #[case::fraction("3.141")]
    #[case::exponent("1E+10")]
    #[case::negative_exponent("2.5e-3")]
    fn test_number_literals_are_verbatim(#[case] literal: &str) {
        let source = format!("{{\"n\":{literal}}}");
        let doc = read_json(source.as_bytes()).unwrap();
        assert_eq!(doc.root().entities()[0].text_value(), Some(literal));
    }

    #[rstest]
    #[case::empty("", 0)]
    #[case::not_an_object("  [1]", 2)]
    #[case::missing_colon(r#"{"a" 1}"#, 5)]
    #[case::missing_value(r#"{"a":}"#, 5)]
    #[case::bad_keyword(r#"{"a":tru}"#, 5)]
    #[case::unterminated_string(r#"{"a":"x"#, 7)]
    #[case::bare_minus(r#"{"a":-}"#, 6)]
    #[case::empty_fraction(r#"{"a":1.}"#, 7)]
    #[case::empty_exponent(r#"{"a":1e}"#, 7)]
    #[case::trailing_comma_in_array(r#"{"a":[1,]}"#, 8)]
    #[case::missing_close(r#"{"a":1"#, 6)]
    #[case::missing_bracket(r#"{"a":[1"#, 7)]
    #[case::unquoted_key("{a:1}", 1)]
    #[case::truncated_unicode(r#"{"a":"\u12"#, 8)]
    #[case::invalid_unicode(r#"{"a":"\u12"}"#, 8)]
    #[case::invalid_escape(r#"{"a":"\q"}"#, 7)]
    #[case::unterminated_escape(r#"{"a":"x\"#, 8)]
    fn test_invalid_input_reports_offset(#[case] source: &str, #[case] offset: usize) {
        let err = read_json(source.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::Invalid { .. }), "{err:?}");
        assert_eq!(err.offset(), Some(offset));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = read_json(b"{\"a\":\"\xff\"}").unwrap_err();
        assert_eq!(err, ParseError::invalid_at("invalid UTF-8 in string", 5));
    }

    #[test]
    fn test_trailing_comma_in_object_is_accepted() {
        let doc = read_json(br#"{"a":1,}"#).unwrap();
        assert_eq!(doc.root().entity_count(), 1);
    }

    #[test]
    fn test_depth_limit() {
        let source = br#"{"a":{"b":{}}}"#;
        let reader = JsonReader::with_limits(ReadLimits::new(Some(2)));
        assert_eq!(reader.read_json(source), Err(ParseError::too_deep(3, 2, 10)));

        let reader = JsonReader::with_limits(ReadLimits::new(Some(3)));
        assert!(reader.read_json(source).is_ok());
        assert!(JsonReader::with_limits(ReadLimits::unlimited())
            .read_json(source)
            .is_ok());
    }

    #[test]
    fn test_default_limit_rejects_hostile_nesting() {
        let source = format!("{{\"a\":{}{}}}", "[".repeat(500), "]".repeat(500));
        let err = read_json(source.as_bytes()).unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { limit: 128, .. }));
    }

    #[test]
    fn test_ldjson_resumes_at_next_object() {
        let source = "{\"key1\":123}\n{\"key2\":true}\n{\"key3\":[1,2,3]}";
        let bytes = source.as_bytes();
        let mut next = 0;
        let mut pieces = Vec::new();

        while let Some(doc) = read_ldjson(bytes, &mut next).unwrap() {
            assert_eq!(doc.root().entity_count() + doc.root().descendant_count(), 1);
            pieces.push(next);
        }

        assert_eq!(pieces, vec![12, 26, source.len()]);
        let mut start = 0;
        let mut objects = Vec::new();
        for end in pieces {
            objects.push(source[start..end].trim());
            start = end;
        }
        assert_eq!(objects.join("\n"), source);
    }

    #[test]
    fn test_ldjson_past_end_returns_none() {
        let mut next = 5;
        assert_eq!(read_ldjson(b"{}", &mut next), Ok(None));
        let mut next = 2;
        assert_eq!(read_ldjson(b"{}\n\n", &mut next), Ok(None));
        assert_eq!(next, 4);
    }

    #[test]
    fn test_ldjson_error_keeps_offset() {
        let mut next = 3;
        let err = read_ldjson(b"{}\nnope", &mut next).unwrap_err();
        assert_eq!(err.offset(), Some(3));
        assert_eq!(next, 3);
    }

    #[test]
    fn test_stream_stops_after_error() {
        let reader = JsonReader::new();
        let results: Vec<_> = reader.stream(b"{\"a\":1}\n{\"b\":}\n{\"c\":3}").collect();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }

    #[test]
    fn test_stream_offset_advances() {
        let reader = JsonReader::new();
        let mut stream = reader.stream(b"{} {}");
        assert_eq!(stream.offset(), 0);
        assert!(stream.next().is_some());
        assert_eq!(stream.offset(), 2);
        assert!(stream.next().is_some());
        assert_eq!(stream.offset(), 5);
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_reference_payload_shape() {
        let doc = read_json(br#"{"NID":{"CID":"data"}}"#).unwrap();
        let node = first_child(doc.root());
        assert_eq!(node.label(), Some("NID"));
        match &node.entities()[0].payload {
            Some(Payload::Pair { annotation, datum }) => {
                assert_eq!(annotation, "CID");
                assert_eq!(datum, &Some(Datum::Text("data".into())));
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}
