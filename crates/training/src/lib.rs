//! Pairgram-training - Byte-pair merge-table construction
//!
//! This crate implements the encoder side of pairgram: repeated merge passes
//! over a working token sequence until no adjacent pair repeats.
//!
//! # Features
//!
//! - Pair frequency counting with a deterministic leftmost tie-break
//! - Non-overlapping left-to-right rewrite passes
//! - Configurable minimum frequency and merge limit
//!
//! # Example
//!
//! ```rust
//! use pairgram_training::{BpeTrainer, TrainingConfig};
//!
//! let config = TrainingConfig::builder().max_merges(100).build()?;
//!
//! let mut trainer = BpeTrainer::new(config);
//! let (table, tokens, stats) = trainer.train(b"aaabdaaabac")?;
//! assert_eq!(table.len(), 3);
//! assert_eq!(tokens.len(), stats.encoded_len);
//! # Ok::<(), pairgram_training::TokenizerError>(())
//! ```

pub use pairgram_core::{Result, TokenizerError};

// Training infrastructure
pub mod training;
pub use training::{
    encode, BpeTrainer, EncodingStats, PairCounter, TrainingConfig, TrainingConfigBuilder,
};
