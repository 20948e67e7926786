//! Serialization and deserialization of encoded models.
//!
//! This module provides the raw binary layouts for merge tables and token
//! sequences, plus a versioned JSON layout for inspection.

pub mod format;
pub mod load;
pub mod save;

pub use format::{ModelFormat, SerializedMerge, SerializedModel};
pub use load::{read_table, read_text, read_tokens, TokenizerLoader};
pub use save::{write_table, write_text, write_tokens, TokenizerSaver};
