//! Tree error types.

use thiserror::Error;

use crate::{NodeId, NodeKind};

/// Errors raised by tree construction and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The kind is reserved for the document root.
    #[error("Node kind `{0}` is reserved")]
    ReservedKind(NodeKind),

    /// The id does not refer to a live node of this document.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// The node already has a parent.
    #[error("Node {0} is already attached")]
    AlreadyAttached(NodeId),

    /// The root cannot be inserted under another node.
    #[error("The root node cannot be attached")]
    RootNotAttachable,

    /// The root can only be freed by dropping the document.
    #[error("The root node cannot be freed")]
    RootNotFreeable,

    /// Attaching would make a node its own ancestor.
    #[error("Attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// The node is not a child of the given parent.
    #[error("Node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Entity index out of range.
    #[error("Entity index {index} out of range for node with {len} entities")]
    EntityIndex { index: usize, len: usize },

    /// The node does not have the number of entities the query requires.
    #[error("Expected {expected} entities on node {node}, found {found}")]
    Arity {
        node: NodeId,
        expected: &'static str,
        found: usize,
    },
}
