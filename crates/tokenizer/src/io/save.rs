//! Save functionality for encoded models.
//!
//! This module writes merge tables, token sequences and raw text to disk.
//! A failed write leaves whatever was already written; nothing is rolled back.

use super::format::{self, ModelFormat, SerializedMerge, SerializedModel};
use crate::utils::display;
use pairgram_core::{decoder, MergeTable, Result, Token, TokenizerError, FIRST_TOKEN};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Model saver - handles writing encoded models.
pub struct TokenizerSaver<'a> {
    /// Merge table reference
    table: &'a MergeTable,
    /// Token sequence reference
    tokens: Option<&'a [Token]>,
}

impl<'a> TokenizerSaver<'a> {
    /// Create a new saver for a merge table.
    pub fn new(table: &'a MergeTable) -> Self {
        Self {
            table,
            tokens: None,
        }
    }

    /// Include a token sequence.
    pub fn with_tokens(mut self, tokens: &'a [Token]) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Save the merge table in the given format.
    ///
    /// The JSON format also embeds the token sequence, if one was given.
    pub fn save(&self, path: &Path, model_format: ModelFormat) -> Result<()> {
        match model_format {
            ModelFormat::Raw => write_table(path, self.table),
            ModelFormat::Json => self.save_json(path),
        }
    }

    /// Save the token sequence as a raw token file.
    pub fn save_tokens(&self, path: &Path) -> Result<()> {
        let tokens = self.tokens.ok_or_else(|| {
            TokenizerError::InvalidConfig("no token sequence to save".to_string())
        })?;
        write_tokens(path, tokens)
    }

    /// Save the model as a JSON document.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let serialized = self.serialize()?;

        let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &serialized)?;

        log::debug!(
            "saved {} merges as JSON to {}",
            serialized.merges.len(),
            path.display()
        );
        Ok(())
    }

    /// Serialize the model to a structure.
    fn serialize(&self) -> Result<SerializedModel> {
        let mut decoder = decoder::Decoder::new(self.table);
        let mut expansion = Vec::new();

        let merges = self
            .table
            .iter()
            .map(|(token, (first, second))| -> Result<SerializedMerge> {
                expansion.clear();
                decoder.decode_token(token, &mut expansion)?;
                Ok(SerializedMerge {
                    token,
                    first,
                    second,
                    text: Some(display::escape_bytes(&expansion)),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SerializedModel {
            version: env!("CARGO_PKG_VERSION").to_string(),
            first_token: FIRST_TOKEN,
            merges,
            tokens: self.tokens.map(<[Token]>::to_vec),
        })
    }
}

/// Write raw bytes to `path`, creating or truncating it.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|e| TokenizerError::io(path, e))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .and_then(|_| writer.flush())
        .map_err(|e| TokenizerError::io(path, e))?;

    log::trace!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

/// Write a merge table file.
pub fn write_table(path: &Path, table: &MergeTable) -> Result<()> {
    write_bytes(path, &format::merges_to_bytes(table))
}

/// Write a token sequence file.
pub fn write_tokens(path: &Path, tokens: &[Token]) -> Result<()> {
    write_bytes(path, &format::tokens_to_bytes(tokens))
}

/// Write decoded text.
pub fn write_text(path: &Path, text: &[u8]) -> Result<()> {
    write_bytes(path, text)
}
