//! Node handles and read-only node views.

use serde::Serialize;

use crate::{Document, Entity, NodeKind, TreeError};

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    /// Returns the arena index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Markup annotation attached to a node, typically a JSON object key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Markup {
    /// The label.
    pub annotation: String,
    /// Optional associated value.
    pub datum: Option<String>,
}

impl Markup {
    /// Creates a markup annotation without a datum.
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
            datum: None,
        }
    }
}

/// Storage for a single node in the document arena.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) markup: Option<Markup>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) entities: Vec<Entity>,
}

impl NodeData {
    pub(crate) fn new(kind: NodeKind, markup: Option<Markup>) -> Self {
        Self {
            kind,
            markup,
            parent: None,
            children: Vec::new(),
            entities: Vec::new(),
        }
    }
}

/// A borrowed view of a live node.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
    data: &'a NodeData,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId, data: &'a NodeData) -> Self {
        Self { doc, id, data }
    }

    /// The document this node lives in.
    #[inline]
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.data.kind
    }

    #[inline]
    pub fn markup(&self) -> Option<&'a Markup> {
        self.data.markup.as_ref()
    }

    /// The markup annotation, if any.
    #[inline]
    pub fn label(&self) -> Option<&'a str> {
        self.data.markup.as_ref().map(|m| m.annotation.as_str())
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.id == self.doc.root_id()
    }

    /// The parent node, `None` for the root and for detached nodes.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data.parent.and_then(|id| self.doc.get(id))
    }

    /// Child node ids in insertion order.
    #[inline]
    pub fn child_ids(&self) -> &'a [NodeId] {
        &self.data.children
    }

    /// Child nodes in insertion order.
    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let doc = self.doc;
        self.data.children.iter().filter_map(move |&id| doc.get(id))
    }

    /// Entities in insertion order.
    #[inline]
    pub fn entities(&self) -> &'a [Entity] {
        &self.data.entities
    }

    #[inline]
    pub fn entity_count(&self) -> usize {
        self.data.entities.len()
    }

    #[inline]
    pub fn descendant_count(&self) -> usize {
        self.data.children.len()
    }

    /// Number of parent links between this node and the top of its tree.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.parent();
        while let Some(node) = current {
            depth += 1;
            current = node.parent();
        }
        depth
    }

    /// Length of the longest path from this node down to a leaf.
    pub fn height(&self) -> usize {
        self.children()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total characters contributed by this node's own entities.
    pub fn text_len(&self) -> usize {
        self.data.entities.iter().map(Entity::text_len).sum()
    }

    /// Returns the first entity.
    pub fn first_entity(&self) -> Result<&'a Entity, TreeError> {
        self.data.entities.first().ok_or(TreeError::Arity {
            node: self.id,
            expected: "at least one",
            found: 0,
        })
    }

    /// Returns the only entity, failing unless there is exactly one.
    pub fn unique_entity(&self) -> Result<&'a Entity, TreeError> {
        match self.data.entities.as_slice() {
            [entity] => Ok(entity),
            entities => Err(TreeError::Arity {
                node: self.id,
                expected: "exactly one",
                found: entities.len(),
            }),
        }
    }
}
