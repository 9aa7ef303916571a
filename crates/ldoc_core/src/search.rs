//! Text offset and keyword search.
//!
//! The text of a document is the concatenation, in pre-order, of the text
//! and number entities of every node. Offsets are measured in characters.

use ldoc_ast::{Document, Found, NodeId, NodeRef};
use ldoc_text::{Annotation, Trie};
use tracing::debug;

use crate::emit::node_label;

/// A location in the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// The node holding the offset.
    pub node: NodeId,
    /// Offset of the node's first character in the document text.
    pub node_offset: usize,
    /// Offset relative to the start of the node's text.
    pub local_offset: usize,
}

/// A trie word found at a document offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieMatch {
    pub word: String,
    pub annotation: Annotation,
    /// Length of the word in characters.
    pub len: usize,
}

/// Nodes contributing text, paired with the offset their text starts at.
fn text_spans(document: &Document) -> impl Iterator<Item = (NodeRef<'_>, usize, usize)> {
    let mut cur = 0;
    document
        .descendants(document.root_id())
        .filter(|node| node.entity_count() > 0)
        .map(move |node| {
            let start = cur;
            let len = node.text_len();
            cur += len;
            (node, start, len)
        })
}

/// A JSONPath-like address for a node, such as `$.key3[5][0]`.
///
/// Addresses follow the JSON emitter's output. Inside an array a child's
/// index counts the parent's entities first, since they render before it,
/// and a labelled child is reached through its `{"label": …}` wrapper.
/// Elsewhere a node contributes `.label`, or its placeholder label.
pub fn node_path(document: &Document, id: NodeId) -> Option<String> {
    let mut segments = Vec::new();
    let mut node = document.get(id)?;
    while let Some(parent) = node.parent() {
        if parent.kind().is_list() {
            if let Some(label) = node.label() {
                segments.push(format!(".{label}"));
            }
            let position = parent.child_ids().iter().position(|&c| c == node.id())?;
            segments.push(format!("[{}]", parent.entity_count() + position));
        } else {
            segments.push(format!(".{}", node_label(node)));
        }
        node = parent;
    }
    segments.reverse();
    Some(format!("${}", segments.concat()))
}

/// The full document text.
pub fn document_text(document: &Document) -> String {
    document
        .descendants(document.root_id())
        .flat_map(|node| node.entities().iter().filter_map(|e| e.text_value()))
        .collect()
}

/// Finds the node whose text covers `offset`.
///
/// A node spans `[start, start + len]` inclusive, so an offset on the
/// boundary between two nodes resolves to the earlier one. Nodes without
/// entities are skipped.
pub fn find_by_cursor(document: &Document, offset: usize) -> Option<Position> {
    text_spans(document)
        .find(|&(_, start, len)| start <= offset && offset <= start + len)
        .map(|(node, start, _)| Position {
            node: node.id(),
            node_offset: start,
            local_offset: offset - start,
        })
}

/// Looks up a dotted annotation path from the root.
pub fn find_by_annotation<S: AsRef<str>>(document: &Document, path: &[S]) -> Option<Found> {
    document.find_by_annotation(path)
}

/// Up to `len` characters of document text starting at `offset`.
///
/// Returns `None` when `offset` lies past the end of the text.
pub fn lookahead(document: &Document, offset: usize, len: usize) -> Option<String> {
    let text = document_text(document);
    if offset > text.chars().count() {
        return None;
    }
    Some(text.chars().skip(offset).take(len).collect())
}

/// Finds the first occurrence of `keyword` at or after `offset`.
///
/// The position names the node where the keyword starts, so an occurrence
/// on a node boundary resolves to the following node.
pub fn find_kw(document: &Document, offset: usize, keyword: &str) -> Option<Position> {
    if keyword.is_empty() {
        return None;
    }

    let text = document_text(document);
    let (start_byte, _) = text.char_indices().nth(offset)?;
    let found_byte = start_byte + text[start_byte..].find(keyword)?;
    let at = offset + text[start_byte..found_byte].chars().count();
    debug!(keyword, offset, at, "keyword found");

    text_spans(document)
        .find(|&(_, start, len)| start <= at && at < start + len)
        .map(|(node, start, _)| Position {
            node: node.id(),
            node_offset: start,
            local_offset: at - start,
        })
}

/// Trie words that start at `offset`, shortest first.
///
/// The lookahead window is as long as the longest word in `trie`.
pub fn find_matches(document: &Document, offset: usize, trie: &Trie) -> Vec<TrieMatch> {
    let Some(window) = lookahead(document, offset, trie.max_len()) else {
        return Vec::new();
    };

    trie.prefixes_of(&window)
        .into_iter()
        .map(|(word, annotation)| TrieMatch {
            word: word.to_string(),
            annotation,
            len: word.chars().count(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldoc_ast::{Datum, Entity, EntityKind, Markup, NodeKind};
    use ldoc_text::TrieKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    /// root -> a("Hello", " ") -> a1("wor"); b("ld")
    fn sample() -> (Document, [NodeId; 3]) {
        let mut doc = Document::new();
        let root = doc.root_id();
        let a = doc.create_node(NodeKind::Paragraph).unwrap();
        let a1 = doc.create_node(NodeKind::Paragraph).unwrap();
        let b = doc.create_node(NodeKind::Paragraph).unwrap();
        let empty = doc.create_node(NodeKind::NamedNode).unwrap();
        doc.append_child(root, a).unwrap();
        doc.append_child(a, a1).unwrap();
        doc.append_child(root, empty).unwrap();
        doc.append_child(root, b).unwrap();
        doc.append_entity(a, Entity::text("Hello")).unwrap();
        doc.append_entity(a, Entity::text(" ")).unwrap();
        doc.append_entity(a1, Entity::text("wor")).unwrap();
        doc.append_entity(b, Entity::text("ld")).unwrap();
        (doc, [a, a1, b])
    }

    #[test]
    fn test_document_text() {
        let (doc, _) = sample();
        assert_eq!(document_text(&doc), "Hello world");
    }

    #[rstest]
    #[case::start(0, 0, 0)]
    #[case::inside(3, 0, 3)]
    #[case::boundary_prefers_earlier(6, 0, 6)]
    #[case::second_node(7, 1, 1)]
    #[case::boundary_before_last(9, 1, 3)]
    #[case::last_node(10, 2, 1)]
    #[case::end(11, 2, 2)]
    fn test_find_by_cursor(#[case] offset: usize, #[case] node: usize, #[case] local: usize) {
        let (doc, ids) = sample();
        let pos = find_by_cursor(&doc, offset).unwrap();
        assert_eq!(pos.node, ids[node]);
        assert_eq!(pos.local_offset, local);
        assert_eq!(pos.node_offset + pos.local_offset, offset);
    }

    #[test]
    fn test_find_by_cursor_past_end() {
        let (doc, _) = sample();
        assert_eq!(find_by_cursor(&doc, 12), None);
        assert_eq!(find_by_cursor(&Document::new(), 0), None);
    }

    #[test]
    fn test_find_by_cursor_counts_characters() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let first = doc.create_node(NodeKind::Paragraph).unwrap();
        let second = doc.create_node(NodeKind::Paragraph).unwrap();
        doc.append_child(root, first).unwrap();
        doc.append_child(root, second).unwrap();
        doc.append_entity(first, Entity::text("日本")).unwrap();
        doc.append_entity(first, Entity::with_datum(EntityKind::Boolean, Datum::Bool(true)))
            .unwrap();
        doc.append_entity(second, Entity::with_datum(EntityKind::Number, Datum::Number("42".into())))
            .unwrap();

        assert_eq!(find_by_cursor(&doc, 2).map(|p| p.node), Some(first));
        assert_eq!(find_by_cursor(&doc, 3).map(|p| p.node), Some(second));
        assert_eq!(find_by_cursor(&doc, 4).map(|p| p.local_offset), Some(2));
    }

    #[rstest]
    #[case::from_start(0, 5, Some("Hello"))]
    #[case::across_nodes(4, 4, Some("o wo"))]
    #[case::clipped(9, 10, Some("ld"))]
    #[case::at_end(11, 3, Some(""))]
    #[case::past_end(12, 3, None)]
    fn test_lookahead(#[case] offset: usize, #[case] len: usize, #[case] expected: Option<&str>) {
        let (doc, _) = sample();
        assert_eq!(lookahead(&doc, offset, len).as_deref(), expected);
    }

    #[test]
    fn test_find_kw() {
        let (doc, [a, a1, b]) = sample();

        let pos = find_kw(&doc, 0, "llo").unwrap();
        assert_eq!((pos.node, pos.local_offset), (a, 2));

        // "wor" starts exactly where a1 begins.
        let pos = find_kw(&doc, 0, "world").unwrap();
        assert_eq!((pos.node, pos.node_offset, pos.local_offset), (a1, 6, 0));

        let pos = find_kw(&doc, 0, "ld").unwrap();
        assert_eq!((pos.node, pos.local_offset), (b, 0));

        assert_eq!(find_kw(&doc, 3, "Hello"), None);
        assert_eq!(find_kw(&doc, 0, "xyz"), None);
        assert_eq!(find_kw(&doc, 0, ""), None);
        assert_eq!(find_kw(&doc, 40, "l"), None);
    }

    #[test]
    fn test_find_matches() {
        let mut doc = Document::new();
        let root = doc.root_id();
        doc.append_entity(root, Entity::text("the catnip tea")).unwrap();

        let mut trie = Trie::new(TrieKind::Alpha);
        trie.add("cat", Annotation::new(2, 123)).unwrap();
        trie.add("catnip", Annotation::new(1, 0)).unwrap();
        trie.add("tea", Annotation::new(3, 0)).unwrap();

        let matches = find_matches(&doc, 4, &trie);
        assert_eq!(
            matches,
            vec![
                TrieMatch {
                    word: "cat".into(),
                    annotation: Annotation::new(2, 123),
                    len: 3
                },
                TrieMatch {
                    word: "catnip".into(),
                    annotation: Annotation::new(1, 0),
                    len: 6
                },
            ]
        );
        assert_eq!(find_matches(&doc, 11, &trie)[0].word, "tea");
        assert!(find_matches(&doc, 0, &trie).is_empty());
        assert!(find_matches(&doc, 99, &trie).is_empty());
    }

    fn paths(doc: &Document) -> Vec<String> {
        doc.descendants(doc.root_id())
            .map(|node| node_path(doc, node.id()).unwrap())
            .collect()
    }

    #[test]
    fn test_node_path_counts_entities_before_children() {
        let doc = ldoc_parser::read_json(br#"{"a":{"b":[1,[2,{"c":[3]}]]}}"#).unwrap();
        assert_eq!(
            paths(&doc),
            vec!["$", "$.a", "$.a.b", "$.a.b[1]", "$.a.b[1][1]", "$.a.b[1][1].c"]
        );
    }

    #[test]
    fn test_node_path_matches_rendered_json() {
        let source = r#"{ "key1" : 123, "key2" : "Hello\n", "key3" : [ "val3.1", 3.141, null, true, false, [[ { "nested" : true } ]] ] }"#;
        let doc = ldoc_parser::read_json(source.as_bytes()).unwrap();
        assert_eq!(
            paths(&doc),
            vec!["$", "$.key3", "$.key3[5]", "$.key3[5][0]", "$.key3[5][0][0]"]
        );

        let value = crate::to_json_value(&doc).unwrap();
        assert_eq!(value["key3"][5][0][0]["nested"], serde_json::Value::Bool(true));
    }

    #[test]
    fn test_node_path_labelled_and_placeholder_nodes() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let list = doc
            .create_node_with_markup(NodeKind::OrderedList, Some(Markup::new("Lists")))
            .unwrap();
        let wrapped = doc
            .create_node_with_markup(NodeKind::Unassigned, Some(Markup::new("Node 1")))
            .unwrap();
        let bare = doc.create_node(NodeKind::NamedNode).unwrap();
        doc.append_child(root, list).unwrap();
        doc.append_child(root, bare).unwrap();
        doc.append_entity(list, Entity::text("Entity 1")).unwrap();
        doc.append_child(list, wrapped).unwrap();

        assert_eq!(node_path(&doc, wrapped).as_deref(), Some("$.Lists[1].Node 1"));
        assert_eq!(
            node_path(&doc, bare).as_deref(),
            Some(format!("$.{}-{}", NodeKind::NamedNode.tag(), bare.index()).as_str())
        );
    }

    #[test]
    fn test_find_by_annotation_delegates() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let address = doc
            .create_node_with_markup(NodeKind::Unassigned, Some(Markup::new("address")))
            .unwrap();
        doc.append_child(root, address).unwrap();
        doc.append_entity(address, Entity::reference("name", "Ada")).unwrap();

        assert_eq!(
            find_by_annotation(&doc, &["address", "name"]),
            Some(Found::Entity {
                node: address,
                index: 0
            })
        );
        assert_eq!(find_by_annotation(&doc, &["address", "zip"]), None);
    }
}
