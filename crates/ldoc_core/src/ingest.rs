//! Building documents from host object graphs.

use ldoc_ast::{Datum, Document, Entity, EntityKind, Markup, NodeId, NodeKind, TreeError};
use serde_json::{Map, Value};

use crate::LdocError;

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Converts a `serde_json::Value` object into a [`Document`].
///
/// The result has the same shape the JSON reader produces for the
/// equivalent text: objects become `Unassigned` nodes, arrays
/// `OrderedList` nodes, and scalars reference entities under a key or
/// plain entities inside arrays.
pub fn document_from_value(value: &Value) -> Result<Document, LdocError> {
    let Value::Object(members) = value else {
        return Err(LdocError::graph(format!(
            "expected an object at the top level, found {}",
            value_kind(value)
        )));
    };

    let mut doc = Document::new();
    let root = doc.root_id();
    ingest_members(&mut doc, root, members)?;
    Ok(doc)
}

fn ingest_members(doc: &mut Document, parent: NodeId, members: &Map<String, Value>) -> Result<(), TreeError> {
    for (key, value) in members {
        ingest(doc, parent, Some(key), value)?;
    }
    Ok(())
}

fn ingest(doc: &mut Document, parent: NodeId, key: Option<&str>, value: &Value) -> Result<(), TreeError> {
    match value {
        Value::Object(members) => {
            let child = doc.create_node_with_markup(NodeKind::Unassigned, key.map(Markup::new))?;
            doc.append_child(parent, child)?;
            ingest_members(doc, child, members)
        }
        Value::Array(items) => {
            let child = doc.create_node_with_markup(NodeKind::OrderedList, key.map(Markup::new))?;
            doc.append_child(parent, child)?;
            for item in items {
                ingest(doc, child, None, item)?;
            }
            Ok(())
        }
        scalar => doc.append_entity(parent, scalar_entity(key, scalar)),
    }
}

fn scalar_entity(key: Option<&str>, value: &Value) -> Entity {
    let (plain, reference, datum) = match value {
        Value::String(text) => (
            EntityKind::Text,
            EntityKind::OntologyReference,
            Some(Datum::Text(text.clone())),
        ),
        Value::Number(number) => (
            EntityKind::Number,
            EntityKind::NumberReference,
            Some(Datum::Number(number.to_string())),
        ),
        Value::Bool(flag) => (
            EntityKind::Boolean,
            EntityKind::BooleanReference,
            Some(Datum::Bool(*flag)),
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            (EntityKind::Text, EntityKind::OntologyReference, None)
        }
    };

    match (key, datum) {
        (Some(key), datum) => Entity::with_pair(reference, key, datum),
        (None, Some(datum)) => Entity::with_datum(plain, datum),
        (None, None) => Entity::new(plain),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{to_json_string, to_json_value};
    use ldoc_parser::read_json;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_matches_reader_shape() {
        let source = r#"{"key1":123,"key2":"Hello\n","key3":["val3.1",3.141,null,true,false,[[{"nested":true}]]]}"#;
        let value: Value = serde_json::from_str(source).unwrap();

        let ingested = document_from_value(&value).unwrap();
        let parsed = read_json(source.as_bytes()).unwrap();

        let ingested_nodes: Vec<_> = ingested
            .descendants(ingested.root_id())
            .map(|n| (n.kind(), n.label().map(str::to_owned), n.entities().to_vec()))
            .collect();
        let parsed_nodes: Vec<_> = parsed
            .descendants(parsed.root_id())
            .map(|n| (n.kind(), n.label().map(str::to_owned), n.entities().to_vec()))
            .collect();
        assert_eq!(ingested_nodes, parsed_nodes);
        assert_eq!(to_json_string(&ingested).unwrap(), source);
    }

    #[test]
    fn test_value_round_trip() {
        let value = json!({"a": {"b": [1, "two", {"c": null}]}, "d": false});
        let doc = document_from_value(&value).unwrap();
        assert_eq!(to_json_value(&doc).unwrap(), value);
    }

    #[rstest]
    #[case::array(json!([1, 2]), "array")]
    #[case::string(json!("x"), "string")]
    #[case::null(json!(null), "null")]
    fn test_top_level_must_be_object(#[case] value: Value, #[case] found: &str) {
        let err = document_from_value(&value).unwrap_err();
        assert!(matches!(err, LdocError::Graph(_)));
        assert!(err.to_string().ends_with(found), "{err}");
    }
}
