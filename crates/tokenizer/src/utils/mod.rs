//! Utility modules for pairgram.
//!
//! This module contains display helpers for merge tables and token
//! sequences.

pub mod display;

pub use display::{describe_table, describe_tokens, escape_bytes};
