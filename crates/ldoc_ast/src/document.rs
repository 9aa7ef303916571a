//! The document arena and its mutation operations.
//!
//! Nodes live in a single `Vec` owned by the [`Document`] and refer to each
//! other by [`NodeId`]. Parent links are plain ids, so they never own
//! anything; freeing a node empties its slot and the slots of everything
//! below it.

use crate::node::NodeData;
use crate::{Entity, Markup, NodeId, NodeKind, NodeRef, TreeError};

/// Result of an annotation path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A node whose markup annotation matched the last segment.
    Node(NodeId),
    /// A reference entity whose pair annotation matched the last segment.
    Entity { node: NodeId, index: usize },
}

/// A tree of nodes with a single root.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(NodeData::new(NodeKind::Root, None))],
            root: NodeId::new(0),
        }
    }

    #[inline]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Returns a view of the root node.
    pub fn root(&self) -> NodeRef<'_> {
        match self.get(self.root) {
            Some(root) => root,
            None => unreachable!("the root slot is never freed"),
        }
    }

    /// Returns a view of a live node.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .map(|data| NodeRef::new(self, id, data))
    }

    /// Like [`get`](Self::get), but reports unknown ids as an error.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_>, TreeError> {
        self.get(id).ok_or(TreeError::UnknownNode(id))
    }

    /// Number of live nodes, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    /// Always false: the root is live for the lifetime of the document.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the subtree under `id` in pre-order, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![id],
        }
    }

    fn data(&self, id: NodeId) -> Result<&NodeData, TreeError> {
        self.nodes
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(TreeError::UnknownNode(id))
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, TreeError> {
        self.nodes
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(TreeError::UnknownNode(id))
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Creates a detached node of the given kind.
    pub fn create_node(&mut self, kind: NodeKind) -> Result<NodeId, TreeError> {
        self.create_node_with_markup(kind, None)
    }

    /// Creates a detached node carrying a markup annotation.
    pub fn create_node_with_markup(
        &mut self,
        kind: NodeKind,
        markup: Option<Markup>,
    ) -> Result<NodeId, TreeError> {
        if kind == NodeKind::Root {
            return Err(TreeError::ReservedKind(kind));
        }
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Some(NodeData::new(kind, markup)));
        Ok(id)
    }

    /// Replaces the markup annotation of a node.
    pub fn set_markup(&mut self, id: NodeId, markup: Option<Markup>) -> Result<(), TreeError> {
        self.data_mut(id)?.markup = markup;
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Child list
    // ---------------------------------------------------------------------

    fn check_attachable(&self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.data(parent)?;
        let child_data = self.data(child)?;
        if child == self.root {
            return Err(TreeError::RootNotAttachable);
        }
        if child_data.parent.is_some() {
            return Err(TreeError::AlreadyAttached(child));
        }
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(TreeError::Cycle { parent, child });
            }
            current = self.data(id)?.parent;
        }
        Ok(())
    }

    fn attach_at(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<(), TreeError> {
        self.data_mut(child)?.parent = Some(parent);
        self.data_mut(parent)?.children.insert(index, child);
        Ok(())
    }

    /// Appends `child` to the end of `parent`'s child list.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        let index = self.data(parent)?.children.len();
        self.attach_at(parent, child, index)
    }

    /// Inserts `child` at the front of `parent`'s child list.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        self.attach_at(parent, child, 0)
    }

    /// Inserts `child` immediately before `reference` in `parent`'s child list.
    pub fn insert_child_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: NodeId,
    ) -> Result<(), TreeError> {
        self.check_attachable(parent, child)?;
        let index = self.child_position(parent, reference)?;
        self.attach_at(parent, child, index)
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> Result<usize, TreeError> {
        self.data(parent)?
            .children
            .iter()
            .position(|&id| id == child)
            .ok_or(TreeError::NotAChild { parent, child })
    }

    fn detach_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, TreeError> {
        let child = self.data_mut(parent)?.children.remove(index);
        self.data_mut(child)?.parent = None;
        Ok(child)
    }

    /// Unlinks `child` from `parent`. The node stays alive and detached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let index = self.child_position(parent, child)?;
        self.detach_at(parent, index).map(|_| ())
    }

    /// Detaches and returns the last child of `parent`.
    pub fn pop_child(&mut self, parent: NodeId) -> Result<Option<NodeId>, TreeError> {
        match self.data(parent)?.children.len() {
            0 => Ok(None),
            len => self.detach_at(parent, len - 1).map(Some),
        }
    }

    /// Detaches and returns the first child of `parent`.
    pub fn pop_front_child(&mut self, parent: NodeId) -> Result<Option<NodeId>, TreeError> {
        if self.data(parent)?.children.is_empty() {
            return Ok(None);
        }
        self.detach_at(parent, 0).map(Some)
    }

    // ---------------------------------------------------------------------
    // Entity list
    // ---------------------------------------------------------------------

    /// Appends an entity to the end of the node's entity list.
    pub fn append_entity(&mut self, id: NodeId, entity: Entity) -> Result<(), TreeError> {
        self.data_mut(id)?.entities.push(entity);
        Ok(())
    }

    /// Inserts an entity at the front of the node's entity list.
    pub fn prepend_entity(&mut self, id: NodeId, entity: Entity) -> Result<(), TreeError> {
        self.data_mut(id)?.entities.insert(0, entity);
        Ok(())
    }

    /// Inserts an entity before position `index`. `index == len` appends.
    pub fn insert_entity_before(
        &mut self,
        id: NodeId,
        index: usize,
        entity: Entity,
    ) -> Result<(), TreeError> {
        let entities = &mut self.data_mut(id)?.entities;
        if index > entities.len() {
            return Err(TreeError::EntityIndex {
                index,
                len: entities.len(),
            });
        }
        entities.insert(index, entity);
        Ok(())
    }

    /// Removes and returns the entity at `index`.
    pub fn remove_entity(&mut self, id: NodeId, index: usize) -> Result<Entity, TreeError> {
        let entities = &mut self.data_mut(id)?.entities;
        if index >= entities.len() {
            return Err(TreeError::EntityIndex {
                index,
                len: entities.len(),
            });
        }
        Ok(entities.remove(index))
    }

    /// Removes and returns the last entity.
    pub fn pop_entity(&mut self, id: NodeId) -> Result<Option<Entity>, TreeError> {
        Ok(self.data_mut(id)?.entities.pop())
    }

    /// Removes and returns the first entity.
    pub fn pop_front_entity(&mut self, id: NodeId) -> Result<Option<Entity>, TreeError> {
        let entities = &mut self.data_mut(id)?.entities;
        if entities.is_empty() {
            return Ok(None);
        }
        Ok(Some(entities.remove(0)))
    }

    /// Mutable access to a single entity.
    pub fn entity_mut(&mut self, id: NodeId, index: usize) -> Result<&mut Entity, TreeError> {
        let entities = &mut self.data_mut(id)?.entities;
        let len = entities.len();
        entities
            .get_mut(index)
            .ok_or(TreeError::EntityIndex { index, len })
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Depth of a node: the root is at 0.
    pub fn depth(&self, id: NodeId) -> Result<usize, TreeError> {
        Ok(self.node(id)?.depth())
    }

    /// Frees a node together with all of its descendants and their entities.
    ///
    /// Returns the number of nodes freed.
    pub fn free_node(&mut self, id: NodeId) -> Result<usize, TreeError> {
        if id == self.root {
            return Err(TreeError::RootNotFreeable);
        }
        if let Some(parent) = self.data(id)?.parent {
            self.remove_child(parent, id)?;
        }

        let mut freed = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(data) = self.nodes.get_mut(current.index()).and_then(Option::take) {
                stack.extend(data.children);
                freed += 1;
            }
        }
        Ok(freed)
    }

    /// Finds a node or reference entity by following markup annotations from the root.
    pub fn find_by_annotation<S: AsRef<str>>(&self, path: &[S]) -> Option<Found> {
        self.find_in(self.root, path)
    }

    /// Finds a node or reference entity by following markup annotations from `start`.
    ///
    /// Every segment but the last must match a child node's annotation. The
    /// last segment may match a reference entity of the current node (checked
    /// first, in entity order) or a child node. Siblings are backtracked when
    /// a deeper segment fails. An empty path yields `start` itself.
    pub fn find_by_annotation_path<S: AsRef<str>>(
        &self,
        start: NodeId,
        path: &[S],
    ) -> Result<Option<Found>, TreeError> {
        self.data(start)?;
        Ok(self.find_in(start, path))
    }

    fn find_in<S: AsRef<str>>(&self, node: NodeId, path: &[S]) -> Option<Found> {
        let Some((segment, rest)) = path.split_first() else {
            return Some(Found::Node(node));
        };
        let segment = segment.as_ref();
        let data = self.data(node).ok()?;

        if rest.is_empty() {
            let hit = data
                .entities
                .iter()
                .position(|entity| entity.annotation() == Some(segment));
            if let Some(index) = hit {
                return Some(Found::Entity { node, index });
            }
        }

        data.children
            .iter()
            .filter(|&&child| {
                self.get(child)
                    .is_some_and(|child| child.label() == Some(segment))
            })
            .find_map(|&child| self.find_in(child, rest))
    }
}

/// Pre-order iterator over a subtree.
#[derive(Debug)]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.doc.get(id) {
                self.stack.extend(node.child_ids().iter().rev());
                return Some(node);
            }
        }
        None
    }
}
