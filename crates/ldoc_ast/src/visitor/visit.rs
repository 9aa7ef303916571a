//! Visitor trait and traversal cursor.
//!
//! Every `visit_*` method has a default implementation that forwards to
//! [`Visitor::visit_node`] or [`Visitor::visit_entity`], so a visitor can
//! handle all kinds uniformly and override only the ones it renders
//! differently.

use crate::{Entity, NodeRef, SerializationValue};

/// Output of a single callback: `None` contributes nothing.
pub type VisitOutput = Option<SerializationValue>;

/// The three points at which a node callback fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the node's entities.
    Pre,
    /// After the entities, before the child nodes.
    Infix,
    /// After the child nodes.
    Post,
}

/// Traversal cursor handed to every callback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coordinate {
    /// Depth of the node being visited; the root is at 0.
    pub level: usize,
    /// Index of the entity being visited. After the entity loop this equals
    /// the node's entity count.
    pub entity_plane: usize,
    /// Index of the node being visited among its parent's children.
    pub child_plane: usize,
}

impl Coordinate {
    /// Returns true if the node is the first item rendered inside its
    /// parent, counting the parent's entities.
    pub fn is_first_child(&self, node: NodeRef<'_>) -> bool {
        self.child_plane == 0 && node.parent().is_none_or(|parent| parent.entity_count() == 0)
    }
}

/// Per-kind callbacks driving [`format`](super::format).
pub trait Visitor {
    /// Produces the opening fragment. `None` makes the traversal result the base.
    fn setup(&mut self) -> VisitOutput {
        None
    }

    /// Produces the closing fragment.
    fn teardown(&mut self) -> VisitOutput {
        None
    }

    /// Fallback for every node kind.
    fn visit_node(&mut self, _phase: Phase, _node: NodeRef<'_>, _coord: &Coordinate) -> VisitOutput {
        None
    }

    /// Fallback for every entity kind.
    fn visit_entity(
        &mut self,
        _node: NodeRef<'_>,
        _entity: &Entity,
        _coord: &Coordinate,
    ) -> VisitOutput {
        None
    }

    // Node kinds

    fn visit_root(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_unassigned(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_h1(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_h2(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_h3(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_h4(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_h5(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_h6(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_paragraph(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_unordered_list(
        &mut self,
        phase: Phase,
        node: NodeRef<'_>,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_ordered_list(
        &mut self,
        phase: Phase,
        node: NodeRef<'_>,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_anchor(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_named_node(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    fn visit_ontology_object(
        &mut self,
        phase: Phase,
        node: NodeRef<'_>,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_node(phase, node, coord)
    }

    // Entity kinds

    fn visit_text(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_emphasis(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_strong_emphasis(
        &mut self,
        node: NodeRef<'_>,
        entity: &Entity,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_uri(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_anchor_reference(
        &mut self,
        node: NodeRef<'_>,
        entity: &Entity,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_number(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_boolean(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_boolean_reference(
        &mut self,
        node: NodeRef<'_>,
        entity: &Entity,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_number_reference(
        &mut self,
        node: NodeRef<'_>,
        entity: &Entity,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }

    fn visit_ontology_reference(
        &mut self,
        node: NodeRef<'_>,
        entity: &Entity,
        coord: &Coordinate,
    ) -> VisitOutput {
        self.visit_entity(node, entity, coord)
    }
}
