//! Load functionality for encoded models.
//!
//! This module reads merge tables, token sequences and raw text from disk.
//! Raw files are only checked for a whole number of elements; the merge
//! table is not validated on load.

use super::format::{self, ModelFormat, SerializedModel, MERGE_WIDTH, TOKEN_WIDTH};
use pairgram_core::{MergeTable, Result, Token, TokenizerError, FIRST_TOKEN};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Model loader - handles reading encoded models.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Load a merge table in the given format.
    ///
    /// For the JSON format any embedded token sequence is discarded; use
    /// [`TokenizerLoader::load_json`] to keep it.
    pub fn load(path: &Path, model_format: ModelFormat) -> Result<MergeTable> {
        match model_format {
            ModelFormat::Raw => read_table(path),
            ModelFormat::Json => Self::load_json(path).map(|(table, _)| table),
        }
    }

    /// Load a raw token sequence file.
    pub fn load_tokens(path: &Path) -> Result<Vec<Token>> {
        read_tokens(path)
    }

    /// Load a model from a JSON document.
    ///
    /// Rejects documents written with a different token boundary.
    pub fn load_json(path: &Path) -> Result<(MergeTable, Option<Vec<Token>>)> {
        let file = File::open(path).map_err(|e| TokenizerError::io(path, e))?;

        let reader = BufReader::new(file);
        let serialized: SerializedModel = serde_json::from_reader(reader)?;

        Self::deserialize(serialized)
    }

    /// Deserialize from a serialized structure.
    fn deserialize(data: SerializedModel) -> Result<(MergeTable, Option<Vec<Token>>)> {
        if !data.is_compatible() {
            return Err(TokenizerError::Load(format!(
                "model uses first_token {}, expected {}",
                data.first_token, FIRST_TOKEN
            )));
        }

        let mut table = MergeTable::new();
        for merge in data.merges {
            let token = table.push((merge.first, merge.second))?;
            if token != merge.token {
                return Err(TokenizerError::Load(format!(
                    "merge entry for token {} found where token {} was expected",
                    merge.token, token
                )));
            }
        }

        Ok((table, data.tokens))
    }
}

/// Read a whole file.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = std::fs::read(path).map_err(|e| TokenizerError::io(path, e))?;
    log::trace!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

fn misaligned(path: &Path, bytes: &[u8], width: usize) -> TokenizerError {
    TokenizerError::Format {
        path: path.to_path_buf(),
        size: bytes.len() as u64,
        width,
    }
}

/// Read a merge table file.
///
/// The file length must be a multiple of [`MERGE_WIDTH`].
pub fn read_table(path: &Path) -> Result<MergeTable> {
    let bytes = read_bytes(path)?;
    format::merges_from_bytes(&bytes).ok_or_else(|| misaligned(path, &bytes, MERGE_WIDTH))
}

/// Read a token sequence file.
///
/// The file length must be a multiple of [`TOKEN_WIDTH`].
pub fn read_tokens(path: &Path) -> Result<Vec<Token>> {
    let bytes = read_bytes(path)?;
    format::tokens_from_bytes(&bytes).ok_or_else(|| misaligned(path, &bytes, TOKEN_WIDTH))
}

/// Read a text file as raw bytes.
pub fn read_text(path: &Path) -> Result<Vec<u8>> {
    read_bytes(path)
}
