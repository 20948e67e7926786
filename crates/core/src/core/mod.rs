//! Core BPE data model.
//!
//! This module contains the token value space, the merge table and the
//! ordering used to pick a merge during encoding.

pub mod merges;
pub mod priority;
pub mod token;

pub use merges::{MergeStats, MergeTable, Pair};
pub use priority::MergeCandidate;
pub use token::{is_composite, is_literal, Token, FIRST_TOKEN, MAX_MERGES};
