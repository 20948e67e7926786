//! Token value space.
//!
//! Tokens are 16-bit values split into two ranges: literal tokens below
//! [`FIRST_TOKEN`] stand for one raw byte, composite tokens at or above it
//! refer to an entry of the merge table.

/// A single symbolic unit of a token sequence.
pub type Token = u16;

/// First composite token value (one past the largest signed 8-bit value).
///
/// Raw token files carry no marker for this constant, so files written with a
/// different boundary cannot be detected.
pub const FIRST_TOKEN: Token = i8::MAX as Token + 1;

/// Largest number of merge entries addressable by a 16-bit token.
pub const MAX_MERGES: usize = Token::MAX as usize - FIRST_TOKEN as usize + 1;

/// Check if a token denotes a single raw byte.
#[inline]
pub fn is_literal(token: Token) -> bool {
    token < FIRST_TOKEN
}

/// Check if a token refers to a merge table entry.
#[inline]
pub fn is_composite(token: Token) -> bool {
    !is_literal(token)
}

/// Index of the merge entry a composite token refers to.
///
/// Returns `None` for literal tokens.
#[inline]
pub fn merge_index(token: Token) -> Option<usize> {
    token.checked_sub(FIRST_TOKEN).map(usize::from)
}

/// Token value that refers to the merge entry at `index`.
///
/// Returns `None` when the value would not fit in 16 bits.
#[inline]
pub fn token_for_index(index: usize) -> Option<Token> {
    index
        .checked_add(FIRST_TOKEN as usize)
        .and_then(|value| Token::try_from(value).ok())
}
