//! HTML page output.

use ldoc_ast::visitor::{Coordinate, Phase, VisitOutput, Visitor};
use ldoc_ast::{Datum, Document, Entity, EntityKind, NodeKind, NodeRef, SerializationValue, TreeError};
use tracing::warn;

use super::format_text;
use crate::LdocError;

const DOCUMENT_OPEN: &str = "<html>\n  <body>\n";
const DOCUMENT_CLOSE: &str = "  </body>\n</html>\n";

/// Escapes the five HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders headings, paragraphs, anchors and inline emphasis as HTML.
///
/// Structural kinds without an HTML counterpart (objects, lists, named
/// nodes) contribute only their entities' text.
#[derive(Debug, Clone)]
pub struct HtmlEmitter {
    indent: usize,
    error: Option<TreeError>,
}

impl Default for HtmlEmitter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl HtmlEmitter {
    /// Creates an emitter indenting `indent` spaces per level.
    pub fn new(indent: usize) -> Self {
        Self { indent, error: None }
    }

    /// The first error met while rendering, if any.
    pub fn error(&self) -> Option<&TreeError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<TreeError> {
        self.error.take()
    }

    fn pad(&self, coord: &Coordinate) -> String {
        " ".repeat(self.indent * (coord.level + 2))
    }

    fn anchor(&mut self, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        match node.unique_entity() {
            Ok(entity) => {
                let name = entity.datum().map(Datum::display).unwrap_or_default();
                Some(SerializationValue::text(format!(
                    "{}<a name=\"{}\"></a>\n",
                    self.pad(coord),
                    escape_html(&name)
                )))
            }
            Err(err) => {
                warn!(node = %node.id(), "anchor without a unique name");
                self.error.get_or_insert(err);
                None
            }
        }
    }
}

impl Visitor for HtmlEmitter {
    fn setup(&mut self) -> VisitOutput {
        Some(SerializationValue::text(DOCUMENT_OPEN))
    }

    fn teardown(&mut self) -> VisitOutput {
        Some(SerializationValue::text(DOCUMENT_CLOSE))
    }

    fn visit_node(&mut self, phase: Phase, node: NodeRef<'_>, coord: &Coordinate) -> VisitOutput {
        let kind = node.kind();
        let html = match (phase, kind) {
            (Phase::Pre, NodeKind::Anchor) => return self.anchor(node, coord),
            (Phase::Pre, NodeKind::Paragraph) => format!("{}<p>", self.pad(coord)),
            (Phase::Post, NodeKind::Paragraph) => "</p>\n".to_string(),
            (phase, _) => {
                let level = kind.heading_level()?;
                match phase {
                    Phase::Pre => format!("{}<h{level}>", self.pad(coord)),
                    Phase::Infix => format!("</h{level}>\n"),
                    Phase::Post => return None,
                }
            }
        };
        Some(SerializationValue::text(html))
    }

    fn visit_entity(&mut self, node: NodeRef<'_>, entity: &Entity, _coord: &Coordinate) -> VisitOutput {
        if node.kind() == NodeKind::Anchor {
            return None;
        }

        let text = escape_html(&entity.datum()?.display());
        let html = match entity.kind {
            EntityKind::Emphasis => format!("<em>{text}</em>"),
            EntityKind::StrongEmphasis => format!("<strong>{text}</strong>"),
            EntityKind::Uri => format!("<a href=\"{text}\">{text}</a>"),
            _ => text,
        };
        Some(SerializationValue::text(html))
    }
}

/// Renders `document` as an HTML page.
pub fn to_html_string(document: &Document, indent: usize) -> Result<String, LdocError> {
    let mut emitter = HtmlEmitter::new(indent);
    let html = format_text(document, &mut emitter)?;
    match emitter.take_error() {
        Some(err) => Err(LdocError::emit(err.to_string())),
        None => Ok(html),
    }
}
