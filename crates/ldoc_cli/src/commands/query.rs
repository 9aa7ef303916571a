//! Query command implementation

use std::path::Path;

use ldoc_ast::Found;
use ldoc_core::{entity_to_json_value, load_document, node_path, node_to_json_value};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use super::load_config;
use crate::cli::Cli;

/// Prints the value at `path`. Returns true when nothing matches.
pub fn run_query(cli: &Cli, file: &Path, path: &str) -> Result<bool> {
    let config = load_config(cli)?;
    let document = load_document(file, &config).into_diagnostic()?;

    let segments: Vec<&str> = path.split('.').collect();
    let Some(found) = document.find_by_annotation(segments.as_slice()) else {
        info!("No match for '{}'", path);
        return Ok(true);
    };

    let value = match found {
        Found::Node(id) => {
            if let Some(address) = node_path(&document, id) {
                info!("Matched node {}", address);
            }
            node_to_json_value(&document, id).into_diagnostic()?
        }
        Found::Entity { node, index } => {
            let entity = &document.node(node).into_diagnostic()?.entities()[index];
            entity_to_json_value(entity)
        }
    };
    println!("{}", value);
    Ok(false)
}
