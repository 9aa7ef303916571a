//! Minimized JSON output.

use ldoc_ast::visitor::{Coordinate, Phase, VisitOutput, Visitor};
use ldoc_ast::{Datum, Document, Entity, NodeRef, SerializationValue};
use serde_json::Value;

use super::{entity_label, format_text, in_array, node_label};
use crate::LdocError;

/// Renders a document as minimized JSON.
///
/// Objects become `Unassigned` nodes and arrays `OrderedList` nodes when
/// read, so parsing minimized JSON and rendering it again reproduces the
/// input byte for byte. Inside an array an annotated node is wrapped as
/// `{"label":...}` and a reference entity as `{"key":value}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEmitter;

impl JsonEmitter {
    pub fn new() -> Self {
        Self
    }
}

fn push_quoted(out: &mut String, text: &str) {
    out.push_str(&Value::from(text).to_string());
}

/// JSON literal for an entity's datum.
fn push_value(out: &mut String, entity: &Entity) {
    match entity.datum() {
        None => out.push_str("null"),
        Some(Datum::Bool(true)) => out.push_str("true"),
        Some(Datum::Bool(false)) => out.push_str("false"),
        Some(Datum::Number(literal)) => out.push_str(literal),
        Some(Datum::Text(text)) => push_quoted(out, text),
        Some(Datum::Bytes(bytes)) => push_quoted(out, &String::from_utf8_lossy(bytes)),
    }
}

impl Visitor for JsonEmitter {
    fn setup(&mut self) -> VisitOutput {
        Some(SerializationValue::text("{"))
    }

    fn teardown(&mut self) -> VisitOutput {
        Some(SerializationValue::text("}"))
    }

    fn visit_node(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        if node.is_root() {
            return None;
        }

        let list = node.kind().is_list();
        let element = in_array(node);
        let wrapped = element && node.label().is_some();
        let mut out = String::new();

        match phase {
            Phase::Pre => {
                if !coord.is_first_child(node) {
                    out.push(',');
                }
                if wrapped {
                    out.push('{');
                }
                if wrapped || !element {
                    push_quoted(&mut out, &node_label(node));
                    out.push(':');
                }
                out.push(if list { '[' } else { '{' });
            }
            Phase::Infix => return None,
            Phase::Post => {
                out.push(if list { ']' } else { '}' });
                if wrapped {
                    out.push('}');
                }
            }
        }

        Some(SerializationValue::text(out))
    }

    fn visit_entity(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        let mut out = String::new();
        if coord.entity_plane > 0 {
            out.push(',');
        }

        if node.kind().is_list() {
            match entity.annotation() {
                Some(key) => {
                    out.push('{');
                    push_quoted(&mut out, key);
                    out.push(':');
                    push_value(&mut out, entity);
                    out.push('}');
                }
                None => push_value(&mut out, entity),
            }
        } else {
            push_quoted(&mut out, &entity_label(entity, coord.entity_plane));
            out.push(':');
            push_value(&mut out, entity);
        }

        Some(SerializationValue::text(out))
    }
}

/// Renders `document` as minimized JSON.
pub fn to_json_string(document: &Document) -> Result<String, LdocError> {
    format_text(document, &mut JsonEmitter::new())
}
