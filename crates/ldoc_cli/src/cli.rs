//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ldoc - render and search labelled JSON documents
#[derive(Parser)]
#[command(name = "ldoc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a document as JSON, HTML or a pretty-printed object graph
    Render {
        /// Input file
        file: PathBuf,

        /// Output format (json, html, graph). Defaults to the configured format
        #[arg(short, long)]
        format: Option<String>,

        /// Read one object per line
        #[arg(long)]
        ldjson: bool,
    },

    /// Print the node or entity at a dotted annotation path
    Query {
        /// Input file
        file: PathBuf,

        /// Dotted path such as `address.name`
        path: String,
    },

    /// Print the node covering a character offset of the document text
    Locate {
        /// Input file
        file: PathBuf,

        /// Character offset
        offset: usize,
    },

    /// List keywords starting at an offset of the document text
    Keywords {
        /// Input file
        file: PathBuf,

        /// Keyword with its category, as `word=category`
        #[arg(short, long = "word", value_name = "WORD=CATEGORY", required = true)]
        words: Vec<String>,

        /// Character offset to match at
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Keyword alphabet (alpha, alpha-numeric, ascii, unicode)
        #[arg(long, default_value = "unicode")]
        kind: String,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}
