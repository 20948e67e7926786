//! Pair counting for merge passes.
//!
//! This module counts adjacent token pairs in the working sequence and
//! rewrites the sequence once a pair has been chosen for merging.

use ahash::AHashMap;
use pairgram_core::{MergeCandidate, Pair, Token};

/// Frequency and first position of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairStat {
    count: u64,
    first_seen: usize,
}

/// Counter for adjacent pair frequencies.
pub struct PairCounter {
    /// Pair -> frequency and first occurrence
    pair_counts: AHashMap<Pair, PairStat>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self {
            pair_counts: AHashMap::new(),
        }
    }

    /// Replace the current counts with the pairs of `sequence`.
    ///
    /// Overlapping occurrences are all counted, so `aaa` counts `(a, a)` twice.
    pub fn count_pairs(&mut self, sequence: &[Token]) {
        self.pair_counts.clear();

        for (position, window) in sequence.windows(2).enumerate() {
            let pair = (window[0], window[1]);
            self.pair_counts
                .entry(pair)
                .or_insert(PairStat {
                    count: 0,
                    first_seen: position,
                })
                .count += 1;
        }
    }

    /// Get the frequency of a pair.
    pub fn get(&self, pair: Pair) -> Option<u64> {
        self.pair_counts.get(&pair).map(|stat| stat.count)
    }

    /// All counted pairs as merge candidates, in no particular order.
    pub fn candidates(&self) -> impl Iterator<Item = MergeCandidate> + '_ {
        self.pair_counts
            .iter()
            .map(|(&pair, stat)| MergeCandidate::new(pair, stat.count, stat.first_seen))
    }

    /// The highest frequency pair, ties going to the leftmost first occurrence.
    pub fn most_frequent(&self) -> Option<MergeCandidate> {
        MergeCandidate::best(self.candidates())
    }

    /// Get the number of distinct pairs.
    pub fn len(&self) -> usize {
        self.pair_counts.len()
    }

    /// Check if no pairs were counted.
    pub fn is_empty(&self) -> bool {
        self.pair_counts.is_empty()
    }

    /// Clear all data from the counter.
    pub fn clear(&mut self) {
        self.pair_counts.clear();
    }
}

impl Default for PairCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite `sequence` into `out`, replacing each occurrence of `pair` with
/// `new_token`.
///
/// The scan is left to right and matches never overlap: a token consumed by a
/// merge cannot start the next match. Returns the number of replacements.
pub fn merge_pair(sequence: &[Token], pair: Pair, new_token: Token, out: &mut Vec<Token>) -> usize {
    out.clear();
    out.reserve(sequence.len());

    let mut replaced = 0;
    let mut i = 0;

    while i < sequence.len() {
        if i + 1 < sequence.len() && (sequence[i], sequence[i + 1]) == pair {
            out.push(new_token);
            replaced += 1;
            i += 2;
        } else {
            out.push(sequence[i]);
            i += 1;
        }
    }

    replaced
}
