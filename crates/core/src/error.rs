//! Error types for the pairgram library.

use crate::core::token::Token;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the pairgram library.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// I/O error with file context
    #[error("I/O error for {path}: {err}")]
    Io {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },

    /// File length is not a whole number of elements
    #[error(
        "Malformed file {path}: size {size} is not a multiple of the element width {width}"
    )]
    Format {
        path: PathBuf,
        size: u64,
        width: usize,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error loading a model
    #[error("Load error: {0}")]
    Load(String),

    /// Composite token that points past the end of the merge table
    #[error("Token {token} refers to merge entry {index}, but the table only has {table_len} entries")]
    TokenOutOfRange {
        token: Token,
        index: usize,
        table_len: usize,
    },

    /// Merge entry that references itself or a later entry
    #[error("Invalid merge rule at entry {index}: ({first}, {second}) references a token not yet defined")]
    InvalidMerge {
        index: usize,
        first: Token,
        second: Token,
    },

    /// Encoding was asked to process zero bytes
    #[error("Cannot encode empty input")]
    EmptyInput,

    /// Input byte outside the literal token range
    #[error("Byte {byte:#04x} at offset {offset} is outside the literal token range")]
    NonLiteralByte { byte: u8, offset: usize },

    /// Merge table exhausted the 16-bit token space
    #[error("Vocabulary size exceeded maximum of {max} merges (tried to add {tried})")]
    VocabularyOverflow { max: usize, tried: usize },

    /// Invalid configuration or argument
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TokenizerError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for pairgram operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
