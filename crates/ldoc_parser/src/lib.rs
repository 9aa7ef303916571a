//! # ldoc_parser
//!
//! Readers that turn JSON and line-delimited JSON into an
//! [`ldoc_ast::Document`].
//!
//! ## Example
//!
//! ```rust
//! use ldoc_parser::{read_ldjson, read_json};
//!
//! let doc = read_json(br#"{"list":[1,2],"name":"x"}"#).unwrap();
//! assert_eq!(doc.root().entity_count(), 1);
//! assert_eq!(doc.root().descendant_count(), 1);
//!
//! let stream = b"{\"a\":1}\n{\"b\":2}\n";
//! let mut next = 0;
//! let mut count = 0;
//! while let Some(_doc) = read_ldjson(stream, &mut next).unwrap() {
//!     count += 1;
//! }
//! assert_eq!(count, 2);
//! ```

mod error;
mod json;
mod limits;
mod traits;

pub use error::ParseError;
pub use json::{JsonReader, LdjsonStream, read_json, read_ldjson};
pub use limits::{DEFAULT_MAX_DEPTH, ReadLimits};
pub use traits::Reader;
