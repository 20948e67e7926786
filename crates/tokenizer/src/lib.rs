//! Pairgram-tokenizer - High-level byte-pair encoding API
//!
//! This crate ties the pairgram pieces together: building a merge table,
//! decoding token sequences, random-walk generation and the on-disk token
//! files.
//!
//! # Features
//!
//! - Simple builder pattern for tokenizer configuration
//! - Raw native-endian token and merge table files, plus a JSON layout
//! - Seedable random-walk generation over the merge table
//! - Escaped rendering of merge entries and token sequences
//!
//! # Example
//!
//! ```rust
//! use pairgram_tokenizer::Tokenizer;
//!
//! let mut tokenizer = Tokenizer::builder().seed(7).build()?;
//!
//! // Encode text
//! let encoding = tokenizer.encode(b"aaabdaaabac")?;
//! println!("{:?}", encoding.tokens);
//!
//! // Decode tokens
//! let (text, _stats) = tokenizer.decode(&encoding.tokens)?;
//! assert_eq!(text, b"aaabdaaabac");
//! # Ok::<(), pairgram_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use pairgram_core::{
    DecodingStats, MergeTable, Pair, Result, Token, TokenizerError, FIRST_TOKEN,
};
pub use pairgram_training::{EncodingStats, TrainingConfig};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Encoding, Tokenizer, TokenizerBuilder, TokenizerConfig};

// Random-walk generation
pub mod generator;
pub use generator::{Generator, GeneratorConfig};

// IO/Serialization
pub mod io;
pub use io::{ModelFormat, TokenizerLoader, TokenizerSaver};

// Utilities
pub mod utils;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
