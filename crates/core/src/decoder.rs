//! Grammar expansion of token sequences.
//!
//! Composite tokens are expanded depth-first, `first` before `second`, using
//! an explicit work stack. Each expanded entry is checked to only reference
//! earlier entries, so a corrupted table can neither loop forever nor grow the
//! stack beyond the table length.

use crate::core::merges::{MergeTable, Pair};
use crate::core::token::{self, Token};
use crate::error::{Result, TokenizerError};
use serde::Serialize;

/// Summary of a decode call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DecodingStats {
    /// Number of tokens consumed
    pub token_count: usize,
    /// Number of bytes produced
    pub byte_count: usize,
}

/// Expands tokens into bytes against a borrowed merge table.
///
/// The work stack is kept between calls so decoding a long sequence does not
/// reallocate per token.
pub struct Decoder<'a> {
    table: &'a MergeTable,
    stack: Vec<Token>,
}

impl<'a> Decoder<'a> {
    /// Create a decoder for the given table.
    pub fn new(table: &'a MergeTable) -> Self {
        Self {
            table,
            stack: Vec::new(),
        }
    }

    /// Expand a single token, appending its bytes to `out`.
    ///
    /// On error, `out` may hold a partial expansion of the token.
    pub fn decode_token(&mut self, token: Token, out: &mut Vec<u8>) -> Result<()> {
        self.stack.clear();
        self.stack.push(token);

        while let Some(current) = self.stack.pop() {
            let Some(index) = token::merge_index(current) else {
                out.push(current as u8);
                continue;
            };

            let (first, second) = self.entry(current, index)?;

            self.stack.push(second);
            self.stack.push(first);
        }

        Ok(())
    }

    /// Expand a full token sequence.
    pub fn decode(&mut self, tokens: &[Token]) -> Result<(Vec<u8>, DecodingStats)> {
        let mut out = Vec::with_capacity(tokens.len() * 2);

        for &token in tokens {
            self.decode_token(token, &mut out)?;
        }

        let stats = DecodingStats {
            token_count: tokens.len(),
            byte_count: out.len(),
        };
        log::debug!(
            "decoded {} tokens into {} bytes",
            stats.token_count,
            stats.byte_count
        );

        Ok((out, stats))
    }

    fn entry(&self, token: Token, index: usize) -> Result<Pair> {
        let (first, second) = self.table.get(index).ok_or(TokenizerError::TokenOutOfRange {
            token,
            index,
            table_len: self.table.len(),
        })?;

        if !MergeTable::precedes(first, index) || !MergeTable::precedes(second, index) {
            return Err(TokenizerError::InvalidMerge {
                index,
                first,
                second,
            });
        }

        Ok((first, second))
    }
}

/// Decode a token sequence with the given merge table.
pub fn decode(tokens: &[Token], table: &MergeTable) -> Result<(Vec<u8>, DecodingStats)> {
    Decoder::new(table).decode(tokens)
}

/// Expand a single token, appending its bytes to `out`.
pub fn decode_token(token: Token, table: &MergeTable, out: &mut Vec<u8>) -> Result<()> {
    Decoder::new(table).decode_token(token, out)
}
