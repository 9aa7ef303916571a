//! End-to-end tests: bytes to document to rendered output and search.

use std::fs;

use ldoc_ast::{Datum, Document, Entity, EntityKind, Found, Markup, NodeKind};
use ldoc_core::{
    LdocConfig, LdocError, OutputFormat, document_from_value, find_by_cursor, find_kw, find_matches,
    load_document, load_stream, node_path, render, to_json_string, to_json_value,
};
use ldoc_parser::{JsonReader, ParseError, read_json, read_ldjson};
use ldoc_text::{Annotation, Trie, TrieKind};
use pretty_assertions::assert_eq;
use rstest::rstest;

const SAMPLE: &str = r#"{ "key1" : 123, "key2" : "Hello\n", "key3" : [ "val3.1", 3.141, null, true, false, [[ { "nested" : true } ]] ] }"#;
const MINIMIZED: &str = r#"{"key1":123,"key2":"Hello\n","key3":["val3.1",3.141,null,true,false,[[{"nested":true}]]]}"#;

#[test]
fn json_round_trip_is_idempotent() {
    let doc = read_json(SAMPLE.as_bytes()).unwrap();
    let once = to_json_string(&doc).unwrap();
    assert_eq!(once, MINIMIZED);

    let again = to_json_string(&read_json(once.as_bytes()).unwrap()).unwrap();
    assert_eq!(again, once);
}

#[test]
fn text_graph_and_value_paths_agree() {
    let parsed = read_json(SAMPLE.as_bytes()).unwrap();
    let graph = to_json_value(&parsed).unwrap();
    let from_text: serde_json::Value = serde_json::from_str(MINIMIZED).unwrap();
    assert_eq!(graph, from_text);

    let ingested = document_from_value(&from_text).unwrap();
    assert_eq!(to_json_string(&ingested).unwrap(), MINIMIZED);
}

#[test]
fn ldjson_stream_resumes_between_objects() {
    let source = b"{\"a\":1}\n  {\"b\":[true]}\n\n{\"c\":{}}\n";
    let mut next = 0;
    let mut rendered = Vec::new();
    while let Some(doc) = read_ldjson(source, &mut next).unwrap() {
        rendered.push(to_json_string(&doc).unwrap());
    }
    assert_eq!(rendered, vec![r#"{"a":1}"#, r#"{"b":[true]}"#, r#"{"c":{}}"#]);
    assert_eq!(next, source.len());
}

#[test]
fn ldjson_error_reports_absolute_offset() {
    let source = b"{\"a\":1}\n{\"b\" 2}\n";
    let results: Vec<_> = JsonReader::new().stream(source).collect();
    assert_eq!(results.len(), 2);
    let err = results[1].as_ref().unwrap_err();
    assert!(matches!(err, ParseError::Invalid { .. }), "{err:?}");
    assert_eq!(err.offset(), Some(13));
}

#[test]
fn files_load_with_configured_depth() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(".ldoc.jsonc");
    fs::write(
        &config_path,
        r#"{
  // tight limit
  "format": "graph",
  "max_depth": 2
}"#,
    )
    .unwrap();
    let shallow = dir.path().join("shallow.json");
    let deep = dir.path().join("deep.json");
    let stream = dir.path().join("docs.ldjson");
    fs::write(&shallow, r#"{"a":{"b":1}}"#).unwrap();
    fs::write(&deep, r#"{"a":{"b":{"c":1}}}"#).unwrap();
    fs::write(&stream, "{\"x\":[1]}\n{\"y\":\"z\"}\n").unwrap();

    let found = LdocConfig::find_config(dir.path()).unwrap();
    let config = LdocConfig::from_file(&found).unwrap();
    assert_eq!(config.format, OutputFormat::Graph);

    let doc = load_document(&shallow, &config).unwrap();
    assert_eq!(render(&doc, config.format, &config).unwrap(), "{\n  \"a\": {\n    \"b\": 1\n  }\n}");

    let err = load_document(&deep, &config).unwrap_err();
    assert!(matches!(err, LdocError::Parse(ParseError::TooDeep { .. })), "{err:?}");

    let docs = load_stream(&stream, &config).unwrap();
    assert_eq!(docs.len(), 2);
}

#[test]
fn html_page_from_built_document() {
    let mut doc = Document::new();
    let root = doc.root_id();
    let title = doc.create_node(NodeKind::H1).unwrap();
    let anchor = doc.create_node(NodeKind::Anchor).unwrap();
    let body = doc.create_node(NodeKind::Paragraph).unwrap();
    for id in [title, anchor, body] {
        doc.append_child(root, id).unwrap();
    }
    doc.append_entity(title, Entity::text("Notes & Queries")).unwrap();
    doc.append_entity(anchor, Entity::text("intro")).unwrap();
    doc.append_entity(body, Entity::text("See ")).unwrap();
    doc.append_entity(body, Entity::with_datum(EntityKind::Emphasis, Datum::Text("this".into())))
        .unwrap();

    let html = render(&doc, OutputFormat::Html, &LdocConfig::new()).unwrap();
    insta::assert_snapshot!(html, @r#"
    <html>
      <body>
          <h1>Notes &amp; Queries</h1>
          <a name="intro"></a>
          <p>See <em>this</em></p>
      </body>
    </html>
    "#);
}

#[test]
fn label_paths_and_cursor_search() {
    let doc = read_json(br#"{"title":"Hello","address":{"name":"Ada","zip":12345},"tags":["x","y"]}"#)
        .unwrap();

    let Some(Found::Entity { node, index }) = doc.find_by_annotation(&["address", "name"]) else {
        panic!("address.name not found");
    };
    assert_eq!(doc.node(node).unwrap().entities()[index].text_value(), Some("Ada"));
    assert_eq!(node_path(&doc, node).as_deref(), Some("$.address"));

    // "Hello" then "Ada12345" then "xy".
    let pos = find_by_cursor(&doc, 5).unwrap();
    assert_eq!((pos.node, pos.local_offset), (doc.root_id(), 5));
    let pos = find_by_cursor(&doc, 14).unwrap();
    assert_eq!(node_path(&doc, pos.node).as_deref(), Some("$.tags"));

    let pos = find_kw(&doc, 0, "345").unwrap();
    assert_eq!((pos.node, pos.local_offset), (node, 5));
}

#[rstest]
#[case::at_cat(4, vec!["cat", "catnip"])]
#[case::at_tea(11, vec!["tea"])]
#[case::mid_word(5, vec![])]
fn trie_matches_over_document_text(#[case] offset: usize, #[case] expected: Vec<&str>) {
    let mut doc = Document::new();
    let root = doc.root_id();
    let node = doc
        .create_node_with_markup(NodeKind::Unassigned, Some(Markup::new("text")))
        .unwrap();
    doc.append_child(root, node).unwrap();
    doc.append_entity(node, Entity::text("the cat")).unwrap();
    doc.append_entity(node, Entity::text("nip tea")).unwrap();

    let mut trie = Trie::new(TrieKind::Alpha);
    for (i, word) in ["cat", "catnip", "tea"].into_iter().enumerate() {
        trie.add(word, Annotation::new(1, i as u64)).unwrap();
    }

    let words: Vec<_> = find_matches(&doc, offset, &trie)
        .into_iter()
        .map(|m| m.word)
        .collect();
    assert_eq!(words, expected);
}
