//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout idlgen. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - The resolution and synthesis core never aborts a run. The only core
//!   error is [`ResolveError`], returned by the fallible resolution entry
//!   point; the infallible one degrades it to a placeholder.
//! - Schema document errors carry the document path and the parser's reason.

use thiserror::Error;

/// Error while resolving a type reference through the typedef tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A typedef chain revisited a name within a single resolution.
    #[error("cyclic typedef starting at '{start}': {}", .chain.join(" -> "))]
    CyclicTypedef {
        /// The reference the resolution started from.
        start: String,
        /// Every name visited, ending with the repeated one.
        chain: Vec<String>,
    },
}

impl ResolveError {
    /// The name at which the cycle closed.
    pub fn cycle_point(&self) -> &str {
        match self {
            ResolveError::CyclicTypedef { start, chain } => {
                chain.last().map(String::as_str).unwrap_or(start)
            }
        }
    }
}

/// Error reading or normalizing a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The document is not well-formed.
    #[error("failed to parse '{path}': {reason}")]
    DocumentParse {
        /// Path (or label) of the document.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A directory or wildcard pattern could not be enumerated.
    #[error("cannot enumerate '{pattern}': {reason}")]
    Enumerate {
        /// Directory or pattern being enumerated.
        pattern: String,
        /// Underlying reason.
        reason: String,
    },

    /// IO error reading a document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
