//! Callback tables.
//!
//! A [`VisitorTable`] is a caller-assembled set of plain function pointers,
//! one slot per node kind and phase and one per entity kind. It implements
//! [`Visitor`], so it can be passed to [`format`](super::format) directly.

use crate::{Entity, EntityKind, NodeKind, NodeRef};

use super::visit::{Coordinate, Phase, VisitOutput, Visitor};

/// Callback for one node kind in one phase.
pub type NodeCallback = fn(NodeRef<'_>, &Coordinate) -> VisitOutput;

/// Callback for one entity kind.
pub type EntityCallback = fn(NodeRef<'_>, &Entity, &Coordinate) -> VisitOutput;

/// Setup or teardown hook.
pub type HookCallback = fn() -> VisitOutput;

fn skip_node(_node: NodeRef<'_>, _coord: &Coordinate) -> VisitOutput {
    None
}

fn skip_entity(_node: NodeRef<'_>, _entity: &Entity, _coord: &Coordinate) -> VisitOutput {
    None
}

fn skip_hook() -> VisitOutput {
    None
}

/// One node callback per node kind.
#[derive(Debug, Clone, Copy)]
pub struct NodeTable {
    pub root: NodeCallback,
    pub unassigned: NodeCallback,
    pub h1: NodeCallback,
    pub h2: NodeCallback,
    pub h3: NodeCallback,
    pub h4: NodeCallback,
    pub h5: NodeCallback,
    pub h6: NodeCallback,
    pub paragraph: NodeCallback,
    pub unordered_list: NodeCallback,
    pub ordered_list: NodeCallback,
    pub anchor: NodeCallback,
    pub named_node: NodeCallback,
    pub ontology_object: NodeCallback,
}

impl Default for NodeTable {
    fn default() -> Self {
        Self::uniform(skip_node)
    }
}

impl NodeTable {
    /// A table with every slot set to `callback`.
    pub fn uniform(callback: NodeCallback) -> Self {
        Self {
            root: callback,
            unassigned: callback,
            h1: callback,
            h2: callback,
            h3: callback,
            h4: callback,
            h5: callback,
            h6: callback,
            paragraph: callback,
            unordered_list: callback,
            ordered_list: callback,
            anchor: callback,
            named_node: callback,
            ontology_object: callback,
        }
    }

    /// Replaces the slot for `kind`.
    pub fn with(mut self, kind: NodeKind, callback: NodeCallback) -> Self {
        *self.slot_mut(kind) = callback;
        self
    }

    /// Returns the callback for `kind`.
    pub fn get(&self, kind: NodeKind) -> NodeCallback {
        match kind {
            NodeKind::Root => self.root,
            NodeKind::Unassigned => self.unassigned,
            NodeKind::H1 => self.h1,
            NodeKind::H2 => self.h2,
            NodeKind::H3 => self.h3,
            NodeKind::H4 => self.h4,
            NodeKind::H5 => self.h5,
            NodeKind::H6 => self.h6,
            NodeKind::Paragraph => self.paragraph,
            NodeKind::UnorderedList => self.unordered_list,
            NodeKind::OrderedList => self.ordered_list,
            NodeKind::Anchor => self.anchor,
            NodeKind::NamedNode => self.named_node,
            NodeKind::OntologyObject => self.ontology_object,
        }
    }

    fn slot_mut(&mut self, kind: NodeKind) -> &mut NodeCallback {
        match kind {
            NodeKind::Root => &mut self.root,
            NodeKind::Unassigned => &mut self.unassigned,
            NodeKind::H1 => &mut self.h1,
            NodeKind::H2 => &mut self.h2,
            NodeKind::H3 => &mut self.h3,
            NodeKind::H4 => &mut self.h4,
            NodeKind::H5 => &mut self.h5,
            NodeKind::H6 => &mut self.h6,
            NodeKind::Paragraph => &mut self.paragraph,
            NodeKind::UnorderedList => &mut self.unordered_list,
            NodeKind::OrderedList => &mut self.ordered_list,
            NodeKind::Anchor => &mut self.anchor,
            NodeKind::NamedNode => &mut self.named_node,
            NodeKind::OntologyObject => &mut self.ontology_object,
        }
    }
}

/// One entity callback per entity kind.
#[derive(Debug, Clone, Copy)]
pub struct EntityTable {
    pub text: EntityCallback,
    pub emphasis: EntityCallback,
    pub strong_emphasis: EntityCallback,
    pub uri: EntityCallback,
    pub anchor_reference: EntityCallback,
    pub number: EntityCallback,
    pub boolean: EntityCallback,
    pub boolean_reference: EntityCallback,
    pub number_reference: EntityCallback,
    pub ontology_reference: EntityCallback,
}

impl Default for EntityTable {
    fn default() -> Self {
        Self::uniform(skip_entity)
    }
}

impl EntityTable {
    /// A table with every slot set to `callback`.
    pub fn uniform(callback: EntityCallback) -> Self {
        Self {
            text: callback,
            emphasis: callback,
            strong_emphasis: callback,
            uri: callback,
            anchor_reference: callback,
            number: callback,
            boolean: callback,
            boolean_reference: callback,
            number_reference: callback,
            ontology_reference: callback,
        }
    }

    /// Replaces the slot for `kind`.
    pub fn with(mut self, kind: EntityKind, callback: EntityCallback) -> Self {
        *self.slot_mut(kind) = callback;
        self
    }

    /// Returns the callback for `kind`.
    pub fn get(&self, kind: EntityKind) -> EntityCallback {
        match kind {
            EntityKind::Text => self.text,
            EntityKind::Emphasis => self.emphasis,
            EntityKind::StrongEmphasis => self.strong_emphasis,
            EntityKind::Uri => self.uri,
            EntityKind::AnchorReference => self.anchor_reference,
            EntityKind::Number => self.number,
            EntityKind::Boolean => self.boolean,
            EntityKind::BooleanReference => self.boolean_reference,
            EntityKind::NumberReference => self.number_reference,
            EntityKind::OntologyReference => self.ontology_reference,
        }
    }

    fn slot_mut(&mut self, kind: EntityKind) -> &mut EntityCallback {
        match kind {
            EntityKind::Text => &mut self.text,
            EntityKind::Emphasis => &mut self.emphasis,
            EntityKind::StrongEmphasis => &mut self.strong_emphasis,
            EntityKind::Uri => &mut self.uri,
            EntityKind::AnchorReference => &mut self.anchor_reference,
            EntityKind::Number => &mut self.number,
            EntityKind::Boolean => &mut self.boolean,
            EntityKind::BooleanReference => &mut self.boolean_reference,
            EntityKind::NumberReference => &mut self.number_reference,
            EntityKind::OntologyReference => &mut self.ontology_reference,
        }
    }
}

/// Node tables for the three phases, an entity table and the two hooks.
#[derive(Debug, Clone, Copy)]
pub struct VisitorTable {
    pub setup: HookCallback,
    pub teardown: HookCallback,
    pub pre: NodeTable,
    pub infix: NodeTable,
    pub post: NodeTable,
    pub entities: EntityTable,
}

impl Default for VisitorTable {
    fn default() -> Self {
        Self {
            setup: skip_hook,
            teardown: skip_hook,
            pre: NodeTable::default(),
            infix: NodeTable::default(),
            post: NodeTable::default(),
            entities: EntityTable::default(),
        }
    }
}

impl VisitorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hooks(mut self, setup: HookCallback, teardown: HookCallback) -> Self {
        self.setup = setup;
        self.teardown = teardown;
        self
    }

    /// Replaces the node table for `phase`.
    pub fn with_phase(mut self, phase: Phase, table: NodeTable) -> Self {
        *self.phase_mut(phase) = table;
        self
    }

    pub fn with_entities(mut self, table: EntityTable) -> Self {
        self.entities = table;
        self
    }

    /// Returns the node table for `phase`.
    pub fn phase(&self, phase: Phase) -> &NodeTable {
        match phase {
            Phase::Pre => &self.pre,
            Phase::Infix => &self.infix,
            Phase::Post => &self.post,
        }
    }

    fn phase_mut(&mut self, phase: Phase) -> &mut NodeTable {
        match phase {
            Phase::Pre => &mut self.pre,
            Phase::Infix => &mut self.infix,
            Phase::Post => &mut self.post,
        }
    }
}

impl Visitor for VisitorTable {
    fn setup(&mut self) -> VisitOutput {
        (self.setup)()
    }

    fn teardown(&mut self) -> VisitOutput {
        (self.teardown)()
    }

    fn visit_node(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        (self.phase(phase).get(node.kind()))(node, coord)
    }

    fn visit_entity(&mut self, node: NodeRef<'_>, entity: &Entity, coord: &Coordinate) -> VisitOutput {
        (self.entities.get(entity.kind))(node, entity, coord)
    }
}
