//! Render command implementation

use std::path::Path;

use ldoc_core::{OutputFormat, load_document, load_stream};
use miette::{IntoDiagnostic, Result, miette};
use tracing::debug;

use super::load_config;
use crate::cli::Cli;
use crate::output::output_documents;

fn parse_format(name: &str) -> Result<OutputFormat> {
    match name {
        "json" => Ok(OutputFormat::Json),
        "html" => Ok(OutputFormat::Html),
        "graph" => Ok(OutputFormat::Graph),
        other => Err(miette!(
            "Unknown format '{}'. Expected one of: json, html, graph",
            other
        )),
    }
}

pub fn run_render(cli: &Cli, file: &Path, format: Option<&str>, ldjson: bool) -> Result<()> {
    let config = load_config(cli)?;
    let format = match format {
        Some(name) => parse_format(name)?,
        None => config.format,
    };
    debug!(%format, ldjson, "rendering {}", file.display());

    let documents = if ldjson {
        load_stream(file, &config).into_diagnostic()?
    } else {
        vec![load_document(file, &config).into_diagnostic()?]
    };

    output_documents(&documents, format, &config, ldjson)
}
