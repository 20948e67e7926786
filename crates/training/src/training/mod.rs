//! Merge-table construction.
//!
//! This module provides the pair counter and the iterative trainer that
//! turns raw bytes into a merge table and a compressed token sequence.

pub mod counter;
pub mod trainer;

pub use counter::{merge_pair, PairCounter};
pub use trainer::{encode, BpeTrainer, EncodingStats, TrainingConfig, TrainingConfigBuilder};
