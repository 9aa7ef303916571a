//! Visitor-driven traversal and rendering.
//!
//! # Overview
//!
//! - [`Visitor`] - per-kind callback trait with uniform fallbacks
//! - [`VisitorTable`] - function-pointer tables implementing [`Visitor`]
//! - [`dispatch_node`] / [`dispatch_entity`] - exhaustive kind dispatch
//! - [`visit`] - pre / entities / infix / children / post walk of a subtree
//! - [`format`] - setup, walk from the root, teardown
//!
//! # Example
//!
//! ```rust
//! use ldoc_ast::visitor::{format, Coordinate, EntityTable, VisitOutput, VisitorTable};
//! use ldoc_ast::{Document, Entity, NodeKind, NodeRef, SerializationValue};
//!
//! fn words(_node: NodeRef<'_>, entity: &Entity, _coord: &Coordinate) -> VisitOutput {
//!     entity.text_value().map(|text| SerializationValue::text(format!("[{text}]")))
//! }
//!
//! let mut doc = Document::new();
//! let par = doc.create_node(NodeKind::Paragraph).unwrap();
//! doc.append_child(doc.root_id(), par).unwrap();
//! doc.append_entity(par, Entity::text("hello")).unwrap();
//! doc.append_entity(par, Entity::text("world")).unwrap();
//!
//! let mut table = VisitorTable::new().with_entities(EntityTable::uniform(words));
//! let out = format(&doc, &mut table).unwrap();
//! assert_eq!(out.and_then(SerializationValue::into_text).as_deref(), Some("[hello][world]"));
//! ```

mod table;
mod visit;
mod walk;

pub use table::{EntityCallback, EntityTable, HookCallback, NodeCallback, NodeTable, VisitorTable};
pub use visit::{Coordinate, Phase, VisitOutput, Visitor};
pub use walk::{dispatch_entity, dispatch_node, format, visit};
