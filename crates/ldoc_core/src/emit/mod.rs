//! Visitors rendering a [`Document`] to JSON, HTML or an object graph.
//!
//! All three emitters implement [`Visitor`](ldoc_ast::Visitor) and are driven
//! by [`ldoc_ast::visitor::format`]. Callbacks cannot fail, so an emitter
//! records the first problem it meets and the entry points in this module
//! turn it into [`LdocError::Emit`].

mod graph;
mod html;
mod json;

use std::borrow::Cow;

use ldoc_ast::visitor::format;
use ldoc_ast::{Document, Entity, NodeRef};

use crate::config::{LdocConfig, OutputFormat};
use crate::LdocError;

pub use graph::{GraphEmitter, entity_to_json_value, node_to_json_value, to_json_value};
pub use html::{HtmlEmitter, escape_html, to_html_string};
pub use json::{JsonEmitter, to_json_string};

/// Label a node carries in object context: its markup annotation, or a
/// placeholder built from its kind tag and index.
pub(crate) fn node_label(node: NodeRef<'_>) -> Cow<'_, str> {
    match node.label() {
        Some(label) => Cow::Borrowed(label),
        None => Cow::Owned(format!("{}-{}", node.kind().tag(), node.id().index())),
    }
}

/// Label an entity carries in object context: its pair annotation, or a
/// placeholder built from its kind tag and entity plane.
pub(crate) fn entity_label(entity: &Entity, plane: usize) -> Cow<'_, str> {
    match entity.annotation() {
        Some(annotation) => Cow::Borrowed(annotation),
        None => Cow::Owned(format!("{}-{}", entity.kind.tag(), plane)),
    }
}

/// Returns true if the node's parent renders as an array.
pub(crate) fn in_array(node: NodeRef<'_>) -> bool {
    node.parent().is_some_and(|parent| parent.kind().is_list())
}

/// Renders `document` in the requested format using `config` settings.
///
/// Graph output is printed as pretty JSON.
pub fn render(document: &Document, output: OutputFormat, config: &LdocConfig) -> Result<String, LdocError> {
    match output {
        OutputFormat::Json => to_json_string(document),
        OutputFormat::Html => to_html_string(document, config.html.indent),
        OutputFormat::Graph => {
            let value = to_json_value(document)?;
            serde_json::to_string_pretty(&value).map_err(|e| LdocError::emit(e.to_string()))
        }
    }
}

/// Runs `emitter` over `document` and returns its text output.
pub(crate) fn format_text<V>(document: &Document, emitter: &mut V) -> Result<String, LdocError>
where
    V: ldoc_ast::Visitor,
{
    let out = format(document, emitter)?;
    Ok(out.and_then(|value| value.into_text()).unwrap_or_default())
}
