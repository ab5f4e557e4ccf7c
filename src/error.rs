//! Error types for the Morfo library.
//!
//! This module provides error handling for all Morfo operations. All errors
//! are represented by the [`MorfoError`] enum. Analysis of an unparseable
//! word is *not* an error — it yields an empty result list. Errors are
//! reserved for configuration problems: malformed suffix templates, graph
//! states that are referenced but never registered, and special roots the
//! stem generator does not know about.
//!
//! # Examples
//!
//! ```
//! use morfo::error::{MorfoError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(MorfoError::template("unexpected token 'Q'"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Morfo operations.
///
/// This enum represents all possible errors that can occur in the Morfo
/// library. It uses the `thiserror` crate for automatic `Error` trait
/// implementation and provides convenient constructor methods for creating
/// specific error types.
#[derive(Error, Debug)]
pub enum MorfoError {
    /// I/O errors (reading words from stdin, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Suffix template errors (unparseable template tokens)
    #[error("Template error: {0}")]
    Template(String),

    /// Morphotactics graph errors (duplicate or missing states)
    #[error("Graph error: {0}")]
    Graph(String),

    /// Lexicon errors (malformed or conflicting dictionary items)
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Stem index errors (unknown special roots, unregistered root states)
    #[error("Index error: {0}")]
    Index(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with MorfoError.
pub type Result<T> = std::result::Result<T, MorfoError>;

impl MorfoError {
    /// Create a new template error.
    pub fn template<S: Into<String>>(msg: S) -> Self {
        MorfoError::Template(msg.into())
    }

    /// Create a new graph error.
    pub fn graph<S: Into<String>>(msg: S) -> Self {
        MorfoError::Graph(msg.into())
    }

    /// Create a new lexicon error.
    pub fn lexicon<S: Into<String>>(msg: S) -> Self {
        MorfoError::Lexicon(msg.into())
    }

    /// Create a new index error.
    pub fn index<S: Into<String>>(msg: S) -> Self {
        MorfoError::Index(msg.into())
    }

    /// Create an error for a state key that is not present in the graph.
    pub fn missing_state<S: Into<String>>(key: S) -> Self {
        MorfoError::Graph(format!("state '{}' is not registered", key.into()))
    }

    /// Create an error for a special root the generator has no entry for.
    pub fn unknown_special_root<S: Into<String>>(id: S) -> Self {
        MorfoError::Index(format!("no special root table entry for '{}'", id.into()))
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MorfoError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = MorfoError::template("bad token");
        assert_eq!(error.to_string(), "Template error: bad token");

        let error = MorfoError::graph("duplicate state");
        assert_eq!(error.to_string(), "Graph error: duplicate state");

        let error = MorfoError::unknown_special_root("fo_Pron");
        assert_eq!(
            error.to_string(),
            "Index error: no special root table entry for 'fo_Pron'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let morfo_error = MorfoError::from(io_error);

        match morfo_error {
            MorfoError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
