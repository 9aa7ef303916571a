//! Output formatting module

use ldoc_ast::Document;
use ldoc_core::{LdocConfig, OutputFormat, Position, TrieMatch, render, to_json_value};
use miette::{IntoDiagnostic, Result};

/// Prints every document in `format`.
///
/// With `one_per_line`, graph output is printed compactly so each input
/// object yields one line.
pub fn output_documents(
    documents: &[Document],
    format: OutputFormat,
    config: &LdocConfig,
    one_per_line: bool,
) -> Result<()> {
    for document in documents {
        match format {
            OutputFormat::Html => print!("{}", render(document, format, config).into_diagnostic()?),
            OutputFormat::Graph if one_per_line => {
                println!("{}", to_json_value(document).into_diagnostic()?)
            }
            _ => println!("{}", render(document, format, config).into_diagnostic()?),
        }
    }
    Ok(())
}

pub fn output_position(address: &str, position: &Position) {
    println!(
        "{}\tnode {}\toffset {}+{}",
        address, position.node, position.node_offset, position.local_offset
    );
}

pub fn output_matches(matches: &[TrieMatch]) {
    for m in matches {
        println!(
            "{}\tcategory {}\tpayload {}\tlength {}",
            m.word, m.annotation.category, m.annotation.payload, m.len
        );
    }
}
