//! Object-graph output.

use ldoc_ast::visitor::{Coordinate, Phase, VisitOutput, Visitor, format, visit};
use ldoc_ast::{Datum, Document, Entity, NodeId, NodeRef, SerializationValue};
use serde_json::Value;

use super::{entity_label, in_array, node_label};
use crate::LdocError;

/// Builds native collections instead of text.
///
/// Labels and array handling match [`JsonEmitter`](super::JsonEmitter), so
/// converting the result with [`SerializationValue::into_json_value`] gives
/// the same value as parsing the JSON emitter's output.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphEmitter;

impl GraphEmitter {
    pub fn new() -> Self {
        Self
    }
}

/// Typed scalar for an entity's datum.
///
/// Numbers become integers when they fit an `i64` and floats otherwise.
fn scalar(entity: &Entity) -> SerializationValue {
    match entity.datum() {
        None => SerializationValue::null(),
        Some(Datum::Bool(value)) => SerializationValue::boolean(*value),
        Some(Datum::Number(literal)) => {
            if let Ok(value) = literal.parse::<i64>() {
                SerializationValue::integer(value)
            } else if let Ok(value) = literal.parse::<f64>() {
                SerializationValue::float(value)
            } else {
                SerializationValue::str(literal.as_str())
            }
        }
        Some(datum @ (Datum::Text(_) | Datum::Bytes(_))) => SerializationValue::str(datum.display()),
    }
}

impl Visitor for GraphEmitter {
    fn visit_node(&mut self, phase: Phase, node: NodeRef<'_>, _coord: &Coordinate) -> VisitOutput {
        if phase != Phase::Pre {
            return None;
        }
        if node.is_root() {
            return Some(SerializationValue::dict());
        }

        let collection = if node.kind().is_list() {
            SerializationValue::list()
        } else {
            SerializationValue::dict()
        };
        if in_array(node) {
            Some(match node.label() {
                Some(label) => collection.with_label(label),
                None => collection,
            })
        } else {
            Some(collection.with_label(node_label(node)))
        }
    }

    fn visit_entity(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        let value = scalar(entity);
        if node.kind().is_list() {
            Some(match entity.annotation() {
                Some(key) => value.with_label(key),
                None => value,
            })
        } else {
            Some(value.with_label(entity_label(entity, coord.entity_plane)))
        }
    }
}

/// Renders `document` as a `serde_json::Value` object.
pub fn to_json_value(document: &Document) -> Result<Value, LdocError> {
    let out = format(document, &mut GraphEmitter::new())?;
    Ok(out.map_or_else(
        || Value::Object(serde_json::Map::new()),
        SerializationValue::into_json_value,
    ))
}

/// Renders the subtree rooted at `id` without the node's own label.
pub fn node_to_json_value(document: &Document, id: NodeId) -> Result<Value, LdocError> {
    let node = document.node(id)?;
    let out = visit(&mut GraphEmitter::new(), node, &mut Coordinate::default())?;
    Ok(out.map_or(Value::Null, SerializationValue::into_json_value))
}

/// The typed value of a single entity.
pub fn entity_to_json_value(entity: &Entity) -> Value {
    scalar(entity).into_json_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::to_json_string;
    use ldoc_ast::{Body, EntityKind, Markup, NodeKind};
    use ldoc_parser::read_json;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn test_graph_matches_parsed_json_output() {
        let source = r#"{ "key1" : 123, "key2" : "Hello\n", "key3" : [ "val3.1", 3.141, null, true, false, [[ { "nested" : true } ]] ] }"#;
        let doc = read_json(source.as_bytes()).unwrap();

        let from_text: Value = serde_json::from_str(&to_json_string(&doc).unwrap()).unwrap();
        assert_eq!(to_json_value(&doc).unwrap(), from_text);
    }

    #[test]
    fn test_empty_document_is_empty_object() {
        assert_eq!(to_json_value(&Document::new()).unwrap(), json!({}));
    }

    #[rstest]
    #[case::integer("42", Body::Integer(42))]
    #[case::negative("-7", Body::Integer(-7))]
    #[case::float("2.5", Body::Float(2.5))]
    #[case::exponent("1e3", Body::Float(1000.0))]
    #[case::too_big_for_i64("9223372036854775808", Body::Float(9223372036854775808.0))]
    fn test_number_typing(#[case] literal: &str, #[case] expected: Body) {
        let entity = Entity::with_datum(EntityKind::Number, Datum::Number(literal.into()));
        assert_eq!(scalar(&entity).body(), &expected);
    }

    #[test]
    fn test_unparseable_number_stays_string() {
        let entity = Entity::with_datum(EntityKind::Number, Datum::Number("NaNish".into()));
        assert_eq!(scalar(&entity).body(), &Body::Str("NaNish".into()));
    }

    #[test]
    fn test_labelled_nodes_in_arrays_are_wrapped() {
        let mut doc = Document::new();
        let root = doc.root_id();
        let list = doc
            .create_node_with_markup(NodeKind::OrderedList, Some(Markup::new("Lists")))
            .unwrap();
        doc.append_child(root, list).unwrap();
        doc.append_entity(list, Entity::text("Entity 1")).unwrap();
        doc.append_entity(list, Entity::reference("k", "v")).unwrap();
        let node = doc
            .create_node_with_markup(NodeKind::Unassigned, Some(Markup::new("Node 1")))
            .unwrap();
        doc.append_child(list, node).unwrap();
        doc.append_entity(node, Entity::reference("Key 1", "Value 1")).unwrap();

        assert_eq!(
            to_json_value(&doc).unwrap(),
            json!({"Lists": ["Entity 1", {"k": "v"}, {"Node 1": {"Key 1": "Value 1"}}]})
        );
    }

    #[test]
    fn test_subtree_values() {
        let doc = read_json(br#"{"a":{"b":[1,{"c":"x"}]},"d":2.5}"#).unwrap();
        let a = doc.root().children().next().unwrap();

        assert_eq!(node_to_json_value(&doc, a.id()).unwrap(), json!({"b": [1, {"c": "x"}]}));
        assert_eq!(entity_to_json_value(&doc.root().entities()[0]), json!(2.5));
        assert_eq!(entity_to_json_value(&Entity::new(EntityKind::Text)), Value::Null);
    }

    #[test]
    fn test_member_order_is_preserved() {
        let doc = read_json(br#"{"z":1,"a":2,"m":3}"#).unwrap();
        let value = to_json_value(&doc).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
