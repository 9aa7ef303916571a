//! Dispatch and traversal functions.

use tracing::{debug, debug_span};

use crate::serialization::concat_into;
use crate::{ConcatError, Document, Entity, EntityKind, NodeKind, NodeRef};

use super::visit::{Coordinate, Phase, VisitOutput, Visitor};

/// Calls the node callback matching `node.kind()` for the given phase.
pub fn dispatch_node<V>(visitor: &mut V, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput
where
    V: Visitor + ?Sized,
{
    match node.kind() {
        NodeKind::Root => visitor.visit_root(phase, node, coord),
        NodeKind::Unassigned => visitor.visit_unassigned(phase, node, coord),
        NodeKind::H1 => visitor.visit_h1(phase, node, coord),
        NodeKind::H2 => visitor.visit_h2(phase, node, coord),
        NodeKind::H3 => visitor.visit_h3(phase, node, coord),
        NodeKind::H4 => visitor.visit_h4(phase, node, coord),
        NodeKind::H5 => visitor.visit_h5(phase, node, coord),
        NodeKind::H6 => visitor.visit_h6(phase, node, coord),
        NodeKind::Paragraph => visitor.visit_paragraph(phase, node, coord),
        NodeKind::UnorderedList => visitor.visit_unordered_list(phase, node, coord),
        NodeKind::OrderedList => visitor.visit_ordered_list(phase, node, coord),
        NodeKind::Anchor => visitor.visit_anchor(phase, node, coord),
        NodeKind::NamedNode => visitor.visit_named_node(phase, node, coord),
        NodeKind::OntologyObject => visitor.visit_ontology_object(phase, node, coord),
    }
}

/// Calls the entity callback matching `entity.kind`.
pub fn dispatch_entity<V>(
    visitor: &mut V,
    node: NodeRef<'_>,
    entity: &Entity,
    coord: &Coordinate,
) -> VisitOutput
where
    V: Visitor + ?Sized,
{
    match entity.kind {
        EntityKind::Text => visitor.visit_text(node, entity, coord),
        EntityKind::Emphasis => visitor.visit_emphasis(node, entity, coord),
        EntityKind::StrongEmphasis => visitor.visit_strong_emphasis(node, entity, coord),
        EntityKind::Uri => visitor.visit_uri(node, entity, coord),
        EntityKind::AnchorReference => visitor.visit_anchor_reference(node, entity, coord),
        EntityKind::Number => visitor.visit_number(node, entity, coord),
        EntityKind::Boolean => visitor.visit_boolean(node, entity, coord),
        EntityKind::BooleanReference => visitor.visit_boolean_reference(node, entity, coord),
        EntityKind::NumberReference => visitor.visit_number_reference(node, entity, coord),
        EntityKind::OntologyReference => visitor.visit_ontology_reference(node, entity, coord),
    }
}

/// Visits a node and its subtree, folding every callback's output.
///
/// Order: pre, each entity, infix, each child (recursively), post. The
/// entity plane is reset on entry. The level is incremented for the
/// children only, and each child sees its own sibling index in
/// `child_plane`.
pub fn visit<V>(visitor: &mut V, node: NodeRef<'_>, coord: &mut Coordinate) -> Result<VisitOutput, ConcatError>
where
    V: Visitor + ?Sized,
{
    coord.entity_plane = 0;
    let mut acc = dispatch_node(visitor, Phase::Pre, node, coord);

    for entity in node.entities() {
        let out = dispatch_entity(visitor, node, entity, coord);
        concat_into(&mut acc, out)?;
        coord.entity_plane += 1;
    }

    let out = dispatch_node(visitor, Phase::Infix, node, coord);
    concat_into(&mut acc, out)?;

    let child_plane = coord.child_plane;
    let entity_plane = coord.entity_plane;
    coord.level += 1;
    for (index, child) in node.children().enumerate() {
        coord.child_plane = index;
        let out = visit(visitor, child, coord)?;
        concat_into(&mut acc, out)?;
    }
    coord.level -= 1;
    coord.child_plane = child_plane;
    coord.entity_plane = entity_plane;

    let out = dispatch_node(visitor, Phase::Post, node, coord);
    concat_into(&mut acc, out)?;

    Ok(acc)
}

/// Renders a whole document: setup, traversal from the root, teardown.
///
/// If setup yields nothing, the traversal result becomes the base onto
/// which teardown is concatenated.
pub fn format<V>(document: &Document, visitor: &mut V) -> Result<VisitOutput, ConcatError>
where
    V: Visitor + ?Sized,
{
    let _span = debug_span!("format", nodes = document.len()).entered();

    let mut acc = visitor.setup();
    let mut coord = Coordinate::default();
    let body = visit(visitor, document.root(), &mut coord)?;
    concat_into(&mut acc, body)?;
    let closing = visitor.teardown();
    concat_into(&mut acc, closing)?;

    debug!(empty = acc.is_none(), "document formatted");
    Ok(acc)
}
