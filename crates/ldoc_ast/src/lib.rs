//! # ldoc_ast
//!
//! Document tree definitions for ldoc.
//!
//! This crate provides the in-memory document model: typed nodes holding
//! ordered child nodes and ordered leaf entities, the serialization values
//! rendered output is built from, and the visitor engine that walks a tree
//! and folds per-kind callbacks into a single result.
//!
//! ## Architecture
//!
//! - Nodes live in an index-based arena owned by [`Document`]
//! - Parent links are [`NodeId`]s, so the tree has no reference cycles
//! - Entity payloads are sum types ([`Payload`], [`Datum`]) matched on by kind
//! - Rendering is a closed dispatch over [`NodeKind`] x [`visitor::Phase`]
//!   and [`EntityKind`]
//!
//! ## Example
//!
//! ```rust
//! use ldoc_ast::{Document, Entity, Markup, NodeKind};
//!
//! let mut doc = Document::new();
//! let node = doc
//!     .create_node_with_markup(NodeKind::Unassigned, Some(Markup::new("NID")))
//!     .unwrap();
//! doc.append_child(doc.root_id(), node).unwrap();
//! doc.append_entity(node, Entity::reference("CID", "data")).unwrap();
//!
//! assert_eq!(doc.depth(node).unwrap(), 1);
//! assert!(doc.find_by_annotation(&["NID", "CID"]).is_some());
//! ```

mod document;
mod entity;
mod error;
mod kind;
mod node;
mod serialization;
pub mod visitor;

pub use document::{Descendants, Document, Found};
pub use entity::{Datum, Entity, Payload};
pub use error::TreeError;
pub use kind::{EntityKind, NodeKind};
pub use node::{Markup, NodeId, NodeRef};
pub use serialization::{Body, ConcatError, SerializationKind, SerializationValue, concat_into};

// Re-export commonly used visitor items for convenience
pub use visitor::{Coordinate, Phase, VisitOutput, Visitor, VisitorTable};
