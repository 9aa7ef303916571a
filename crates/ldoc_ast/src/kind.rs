//! Node and entity kind definitions.

use serde::{Deserialize, Serialize};

/// Structural kinds a [`Node`](crate::NodeRef) can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Document root. Reserved: only [`Document::new`](crate::Document::new) creates it.
    Root,
    /// Generic container. JSON objects are read into this kind.
    Unassigned,
    /// Heading level 1.
    H1,
    /// Heading level 2.
    H2,
    /// Heading level 3.
    H3,
    /// Heading level 4.
    H4,
    /// Heading level 5.
    H5,
    /// Heading level 6.
    H6,
    /// Paragraph.
    Paragraph,
    /// Unordered list.
    UnorderedList,
    /// Ordered list. JSON arrays are read into this kind.
    OrderedList,
    /// Named anchor.
    Anchor,
    /// Named node.
    NamedNode,
    /// Ontology object.
    OntologyObject,
}

impl NodeKind {
    /// Every node kind, in declaration order.
    pub const ALL: [NodeKind; 14] = [
        NodeKind::Root,
        NodeKind::Unassigned,
        NodeKind::H1,
        NodeKind::H2,
        NodeKind::H3,
        NodeKind::H4,
        NodeKind::H5,
        NodeKind::H6,
        NodeKind::Paragraph,
        NodeKind::UnorderedList,
        NodeKind::OrderedList,
        NodeKind::Anchor,
        NodeKind::NamedNode,
        NodeKind::OntologyObject,
    ];

    /// Returns the heading level (1-6) for heading kinds.
    #[inline]
    pub const fn heading_level(&self) -> Option<u8> {
        match self {
            NodeKind::H1 => Some(1),
            NodeKind::H2 => Some(2),
            NodeKind::H3 => Some(3),
            NodeKind::H4 => Some(4),
            NodeKind::H5 => Some(5),
            NodeKind::H6 => Some(6),
            _ => None,
        }
    }

    /// Returns true if members of this kind render as array elements.
    #[inline]
    pub const fn is_list(&self) -> bool {
        matches!(self, NodeKind::OrderedList | NodeKind::UnorderedList)
    }

    /// Short tag used when a label has to be synthesized.
    pub const fn tag(&self) -> &'static str {
        match self {
            NodeKind::Root => "rt",
            NodeKind::Unassigned => "ua",
            NodeKind::H1 => "h1",
            NodeKind::H2 => "h2",
            NodeKind::H3 => "h3",
            NodeKind::H4 => "h4",
            NodeKind::H5 => "h5",
            NodeKind::H6 => "h6",
            NodeKind::Paragraph => "par",
            NodeKind::UnorderedList => "ul",
            NodeKind::OrderedList => "ol",
            NodeKind::Anchor => "anc",
            NodeKind::NamedNode => "nn",
            NodeKind::OntologyObject => "oo",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kinds of leaf content attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Plain text.
    Text,
    /// First-level emphasis.
    Emphasis,
    /// Second-level (strong) emphasis.
    StrongEmphasis,
    /// A URI.
    Uri,
    /// Reference to an anchor.
    AnchorReference,
    /// Numeric literal.
    Number,
    /// Boolean value.
    Boolean,
    /// Boolean carrying its originating key.
    BooleanReference,
    /// Number carrying its originating key.
    NumberReference,
    /// String (or null) carrying its originating key.
    OntologyReference,
}

impl EntityKind {
    /// Every entity kind, in declaration order.
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Text,
        EntityKind::Emphasis,
        EntityKind::StrongEmphasis,
        EntityKind::Uri,
        EntityKind::AnchorReference,
        EntityKind::Number,
        EntityKind::Boolean,
        EntityKind::BooleanReference,
        EntityKind::NumberReference,
        EntityKind::OntologyReference,
    ];

    /// Returns true for kinds whose payload is an annotation/datum pair.
    #[inline]
    pub const fn is_reference(&self) -> bool {
        matches!(
            self,
            EntityKind::BooleanReference
                | EntityKind::NumberReference
                | EntityKind::OntologyReference
        )
    }

    /// Short tag used when a label has to be synthesized.
    pub const fn tag(&self) -> &'static str {
        match self {
            EntityKind::Text => "txt",
            EntityKind::Emphasis => "em1",
            EntityKind::StrongEmphasis => "em2",
            EntityKind::Uri => "uri",
            EntityKind::AnchorReference => "ref",
            EntityKind::Number => "num",
            EntityKind::Boolean => "bl",
            EntityKind::BooleanReference => "br",
            EntityKind::NumberReference => "nr",
            EntityKind::OntologyReference => "or",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}
