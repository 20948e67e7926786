//! Human-readable rendering of tokens.
//!
//! Expansions are shown between `|` delimiters, with every byte outside
//! printable ASCII written as `\0xNN`.

use pairgram_core::{Decoder, MergeTable, Result, Token};
use std::fmt::Write;

/// Escape bytes for display.
pub fn escape_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    for &b in bytes {
        if b == b' ' || b.is_ascii_graphic() {
            out.push(b as char);
        } else {
            let _ = write!(out, "\\0x{:02X}", b);
        }
    }

    out
}

/// Render every merge entry as `TOKEN = |expansion|`.
pub fn describe_table(table: &MergeTable) -> Result<Vec<String>> {
    let mut decoder = Decoder::new(table);
    let mut expansion = Vec::new();

    table
        .iter()
        .map(|(token, _)| -> Result<String> {
            expansion.clear();
            decoder.decode_token(token, &mut expansion)?;
            Ok(format!("{} = |{}|", token, escape_bytes(&expansion)))
        })
        .collect()
}

/// Render each token of a sequence as `|expansion| (TOKEN)`.
pub fn describe_tokens(tokens: &[Token], table: &MergeTable) -> Result<Vec<String>> {
    let mut decoder = Decoder::new(table);
    let mut expansion = Vec::new();

    tokens
        .iter()
        .map(|&token| -> Result<String> {
            expansion.clear();
            decoder.decode_token(token, &mut expansion)?;
            Ok(format!("|{}| ({})", escape_bytes(&expansion), token))
        })
        .collect()
}
