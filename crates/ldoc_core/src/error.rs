//! Error types for ldoc operations.

use ldoc_ast::{ConcatError, TreeError};
use ldoc_parser::ParseError;
use thiserror::Error;

/// Errors that can occur while loading, rendering or searching documents.
#[derive(Debug, Error)]
pub enum LdocError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The input could not be read as a document.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The tree was used incorrectly.
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Rendered fragments could not be combined. This indicates an emitter bug.
    #[error("Internal render error: {0}")]
    Concat(#[from] ConcatError),

    /// An emitter rejected the document.
    #[error("Emit error: {0}")]
    Emit(String),

    /// A host object graph could not be converted into a document.
    #[error("Invalid object graph: {0}")]
    Graph(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LdocError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an object graph error.
    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph(message.into())
    }

    /// Creates an emitter error.
    pub fn emit(message: impl Into<String>) -> Self {
        Self::Emit(message.into())
    }
}
