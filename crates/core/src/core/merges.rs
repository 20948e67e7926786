//! Merge table management.
//!
//! The merge table is an append-only list of token pairs. Entry `i` is the
//! `i`-th merge performed during encoding and is referenced by the composite
//! token `FIRST_TOKEN + i`.

use crate::core::token::{self, Token, FIRST_TOKEN, MAX_MERGES};
use crate::error::{Result, TokenizerError};

/// A pair of tokens that can be merged.
pub type Pair = (Token, Token);

/// Ordered collection of merge rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeTable {
    entries: Vec<Pair>,
}

impl MergeTable {
    /// Create a new empty merge table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a table from pairs in index order.
    ///
    /// No acyclicity check is performed; see [`MergeTable::validate`].
    pub fn from_pairs(pairs: impl IntoIterator<Item = Pair>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// Append a merge rule and return the composite token assigned to it.
    pub fn push(&mut self, pair: Pair) -> Result<Token> {
        let index = self.entries.len();
        let new_token = token::token_for_index(index).ok_or(TokenizerError::VocabularyOverflow {
            max: MAX_MERGES,
            tried: index + 1,
        })?;

        self.entries.push(pair);
        Ok(new_token)
    }

    /// Get the entry at a table index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Pair> {
        self.entries.get(index).copied()
    }

    /// Look up the pair a composite token expands to.
    ///
    /// Literal tokens have no entry and yield `Ok(None)`; composite tokens
    /// past the end of the table are an error.
    pub fn resolve(&self, token: Token) -> Result<Option<Pair>> {
        let Some(index) = token::merge_index(token) else {
            return Ok(None);
        };

        self.get(index)
            .map(Some)
            .ok_or(TokenizerError::TokenOutOfRange {
                token,
                index,
                table_len: self.len(),
            })
    }

    /// Next token value the table would assign.
    #[inline]
    pub fn next_token(&self) -> Option<Token> {
        token::token_for_index(self.entries.len())
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in index order.
    #[inline]
    pub fn pairs(&self) -> &[Pair] {
        &self.entries
    }

    /// Iterate over `(token, pair)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Token, Pair)> + '_ {
        (FIRST_TOKEN..=Token::MAX).zip(self.entries.iter().copied())
    }

    /// Second components of every entry whose first component is `token`.
    pub fn successors(&self, token: Token) -> Vec<Token> {
        self.entries
            .iter()
            .filter(|&&(first, _)| first == token)
            .map(|&(_, second)| second)
            .collect()
    }

    /// Check that every entry only references literals or earlier entries.
    pub fn validate(&self) -> Result<()> {
        for (index, &(first, second)) in self.entries.iter().enumerate() {
            if !Self::precedes(first, index) || !Self::precedes(second, index) {
                return Err(TokenizerError::InvalidMerge {
                    index,
                    first,
                    second,
                });
            }
        }
        Ok(())
    }

    /// Whether `token` is defined before the entry at `index` is created.
    #[inline]
    pub fn precedes(token: Token, index: usize) -> bool {
        token::merge_index(token).map_or(true, |i| i < index)
    }
}

impl FromIterator<Pair> for MergeTable {
    fn from_iter<I: IntoIterator<Item = Pair>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Statistics about a merge table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Number of merge rules
    pub count: usize,
    /// Longest chain of nested composite references
    pub max_depth: usize,
    /// Length in bytes of the longest expansion
    pub max_expansion: usize,
}

impl MergeTable {
    /// Get statistics about the merge table.
    ///
    /// Assumes a table that passes [`MergeTable::validate`].
    pub fn stats(&self) -> MergeStats {
        let mut depth = vec![0usize; self.len()];
        let mut expansion = vec![0usize; self.len()];

        fn measure(token: Token, depth: &[usize], expansion: &[usize]) -> (usize, usize) {
            match token::merge_index(token) {
                Some(i) if i < depth.len() => (depth[i], expansion[i]),
                _ => (0, 1),
            }
        }

        for (index, &(first, second)) in self.entries.iter().enumerate() {
            let (d1, e1) = measure(first, &depth, &expansion);
            let (d2, e2) = measure(second, &depth, &expansion);
            depth[index] = d1.max(d2) + 1;
            expansion[index] = e1.saturating_add(e2);
        }

        MergeStats {
            count: self.len(),
            max_depth: depth.into_iter().max().unwrap_or(0),
            max_expansion: expansion.into_iter().max().unwrap_or(0),
        }
    }
}
