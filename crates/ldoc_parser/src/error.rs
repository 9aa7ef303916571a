//! Parse error types.

use ldoc_ast::TreeError;
use thiserror::Error;

/// Errors that can occur while reading JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not valid JSON.
    #[error("Invalid JSON at byte {offset}: {message}")]
    Invalid {
        /// Error message.
        message: String,
        /// Byte offset where the error was detected.
        offset: usize,
    },

    /// Objects or arrays are nested deeper than the configured limit.
    #[error("Nesting depth {depth} exceeds limit of {limit} at byte {offset}")]
    TooDeep {
        depth: usize,
        limit: usize,
        offset: usize,
    },

    /// Building the tree failed. This indicates a reader bug.
    #[error("Internal reader error: {0}")]
    Tree(#[from] TreeError),
}

impl ParseError {
    /// Creates a new invalid input error at the given offset.
    pub fn invalid_at(message: impl Into<String>, offset: usize) -> Self {
        Self::Invalid {
            message: message.into(),
            offset,
        }
    }

    /// Creates a new nesting depth error.
    pub fn too_deep(depth: usize, limit: usize, offset: usize) -> Self {
        Self::TooDeep {
            depth,
            limit,
            offset,
        }
    }

    /// Byte offset of the failure, when known.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Invalid { offset, .. } | Self::TooDeep { offset, .. } => Some(*offset),
            Self::Tree(_) => None,
        }
    }
}
