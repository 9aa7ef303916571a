//! # ldoc_core
//!
//! Rendering and search on top of the ldoc document model.
//!
//! This crate provides:
//! - JSON, HTML and object-graph emitters
//! - Conversion from `serde_json::Value` graphs into documents
//! - Cursor, keyword and trie-backed search over document text
//! - Configuration loading
//!
//! ## Example
//!
//! ```rust
//! use ldoc_core::{find_by_cursor, to_json_string};
//! use ldoc_parser::read_json;
//!
//! let doc = read_json(br#"{ "greeting" : "hello", "list" : [ 1, 2 ] }"#).unwrap();
//! assert_eq!(to_json_string(&doc).unwrap(), r#"{"greeting":"hello","list":[1,2]}"#);
//!
//! let pos = find_by_cursor(&doc, 6).unwrap();
//! assert_eq!(pos.local_offset, 1);
//! ```

mod config;
pub mod emit;
mod error;
mod ingest;
mod load;
pub mod search;

pub use config::{HtmlConfig, LdocConfig, MAX_HTML_INDENT, OutputFormat};
pub use emit::{
    GraphEmitter, HtmlEmitter, JsonEmitter, entity_to_json_value, node_to_json_value, render,
    to_html_string, to_json_string, to_json_value,
};
pub use error::LdocError;
pub use ingest::document_from_value;
pub use load::{load_document, load_stream};
pub use search::{
    Position, TrieMatch, document_text, find_by_cursor, find_kw, find_matches, lookahead, node_path,
};
