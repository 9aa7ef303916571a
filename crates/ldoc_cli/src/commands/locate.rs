//! Locate command implementation

use std::path::Path;

use ldoc_core::{find_by_cursor, load_document, node_path};
use miette::{IntoDiagnostic, Result};
use tracing::info;

use super::load_config;
use crate::cli::Cli;
use crate::output::output_position;

/// Prints the node covering `offset`. Returns true when the offset lies
/// outside the document text.
pub fn run_locate(cli: &Cli, file: &Path, offset: usize) -> Result<bool> {
    let config = load_config(cli)?;
    let document = load_document(file, &config).into_diagnostic()?;

    let Some(position) = find_by_cursor(&document, offset) else {
        info!("Offset {} is outside the document text", offset);
        return Ok(true);
    };
    let address = node_path(&document, position.node).unwrap_or_else(|| "$".to_string());
    output_position(&address, &position);
    Ok(false)
}
