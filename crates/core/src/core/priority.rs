//! Merge candidate ordering.
//!
//! Every merge pass picks the single best candidate out of the pair counts.
//! The ordering lives here so that it is the same for every caller: higher
//! count wins, and among equal counts the pair seen first in the working
//! sequence wins. The resulting merge table does not depend on hash map
//! iteration order.

use crate::core::merges::Pair;
use std::cmp::Ordering;

/// A merge candidate during a merge pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// The pair of tokens to merge
    pub pair: Pair,
    /// The frequency/count of this pair
    pub count: u64,
    /// Position of the pair's first occurrence in the working sequence
    pub first_seen: usize,
}

impl MergeCandidate {
    /// Create a new merge candidate.
    pub fn new(pair: Pair, count: u64, first_seen: usize) -> Self {
        Self {
            pair,
            count,
            first_seen,
        }
    }

    /// Pick the highest priority candidate.
    ///
    /// Returns None if the iterator is empty.
    pub fn best(candidates: impl IntoIterator<Item = MergeCandidate>) -> Option<MergeCandidate> {
        candidates.into_iter().max()
    }
}

// Higher count = higher priority, earlier occurrence breaks ties
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.first_seen.cmp(&self.first_seen))
            .then_with(|| other.pair.cmp(&self.pair))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
