//! Keywords command implementation

use std::path::Path;

use ldoc_core::{find_matches, load_document};
use ldoc_text::{Annotation, Trie, TrieKind};
use miette::{IntoDiagnostic, Result, miette};
use tracing::{debug, info};

use super::load_config;
use crate::cli::Cli;
use crate::output::output_matches;

fn parse_kind(name: &str) -> Result<TrieKind> {
    match name {
        "alpha" => Ok(TrieKind::Alpha),
        "alpha-numeric" => Ok(TrieKind::AlphaNumeric),
        "ascii" => Ok(TrieKind::Ascii),
        "unicode" => Ok(TrieKind::Unicode),
        other => Err(miette!(
            "Unknown keyword alphabet '{}'. Expected one of: alpha, alpha-numeric, ascii, unicode",
            other
        )),
    }
}

/// Splits `word=category`. A missing category means 0.
fn parse_word(entry: &str) -> Result<(&str, u16)> {
    match entry.rsplit_once('=') {
        Some((word, category)) => {
            let category = category
                .parse()
                .map_err(|_| miette!("Invalid category '{}' for keyword '{}'", category, word))?;
            Ok((word, category))
        }
        None => Ok((entry, 0)),
    }
}

/// Builds a trie from `words`, keeping each word's position as its payload.
pub fn build_trie(words: &[String], kind: TrieKind) -> Result<Trie> {
    let mut trie = Trie::new(kind);
    for (index, entry) in words.iter().enumerate() {
        let (word, category) = parse_word(entry)?;
        trie.add(word, Annotation::new(category, index as u64))
            .map_err(miette::Report::new)?;
    }
    debug!(words = trie.len(), max_len = trie.max_len(), "keyword trie built");
    Ok(trie)
}

/// Prints the keywords starting at `offset`. Returns true when none match.
pub fn run_keywords(cli: &Cli, file: &Path, words: &[String], offset: usize, kind: &str) -> Result<bool> {
    let config = load_config(cli)?;
    let document = load_document(file, &config).into_diagnostic()?;
    let trie = build_trie(words, parse_kind(kind)?)?;

    let matches = find_matches(&document, offset, &trie);
    if matches.is_empty() {
        info!("No keywords at offset {}", offset);
        return Ok(true);
    }
    output_matches(&matches);
    Ok(false)
}
