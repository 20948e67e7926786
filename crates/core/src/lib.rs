//! Pairgram-core - Core byte-pair encoding data model
//!
//! This crate provides the token model, the merge table and the grammar
//! decoder that every other pairgram crate builds on.
//!
//! # Features
//!
//! - 16-bit tokens split into literal bytes and composite merge references
//! - Append-only merge table with acyclicity validation
//! - Deterministic ordering of merge candidates
//! - Stack-safe expansion of composite tokens back into bytes
//!
//! # Example
//!
//! ```rust
//! use pairgram_core::{decoder, MergeTable, FIRST_TOKEN};
//!
//! let mut table = MergeTable::new();
//! let ab = table.push((b'a' as u16, b'b' as u16))?;
//! assert_eq!(ab, FIRST_TOKEN);
//!
//! let (bytes, _stats) = decoder::decode(&[ab, b'c' as u16, ab], &table)?;
//! assert_eq!(bytes, b"abcab");
//! # Ok::<(), pairgram_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Token model and merge table
pub mod core;
pub use self::core::{
    is_composite, is_literal, MergeCandidate, MergeStats, MergeTable, Pair, Token, FIRST_TOKEN,
    MAX_MERGES,
};

// Grammar expansion
pub mod decoder;
pub use decoder::{Decoder, DecodingStats};
