//! Format definitions for model serialization.
//!
//! Two layouts are supported. The raw layout is what the encoder has always
//! written: headerless 16-bit tokens in native byte order, one file for the
//! merge table and one for the token sequence. The JSON layout is a separate,
//! versioned inspection format that also records the token boundary.

use pairgram_core::{MergeTable, Pair, Token, FIRST_TOKEN};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Width in bytes of one token in a raw token file.
pub const TOKEN_WIDTH: usize = std::mem::size_of::<Token>();

/// Width in bytes of one merge entry in a raw merge table file.
pub const MERGE_WIDTH: usize = 2 * TOKEN_WIDTH;

/// Model format types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModelFormat {
    /// Headerless native-endian 16-bit tokens
    #[default]
    Raw,
    /// Versioned JSON document
    Json,
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" | "bin" => Ok(Self::Raw),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown model format '{}'", other)),
        }
    }
}

/// Serialize tokens as native-endian 16-bit values.
pub fn tokens_to_bytes(tokens: &[Token]) -> Vec<u8> {
    tokens.iter().flat_map(|token| token.to_ne_bytes()).collect()
}

/// Parse native-endian 16-bit tokens.
///
/// Returns None if the length is not a multiple of [`TOKEN_WIDTH`].
pub fn tokens_from_bytes(bytes: &[u8]) -> Option<Vec<Token>> {
    if bytes.len() % TOKEN_WIDTH != 0 {
        return None;
    }

    Some(
        bytes
            .chunks_exact(TOKEN_WIDTH)
            .map(|chunk| Token::from_ne_bytes([chunk[0], chunk[1]]))
            .collect(),
    )
}

/// Serialize a merge table as `first`, `second` token pairs in index order.
pub fn merges_to_bytes(table: &MergeTable) -> Vec<u8> {
    table
        .pairs()
        .iter()
        .flat_map(|&(first, second)| {
            let [a, b] = first.to_ne_bytes();
            let [c, d] = second.to_ne_bytes();
            [a, b, c, d]
        })
        .collect()
}

/// Parse a merge table from `first`, `second` token pairs.
///
/// Returns None if the length is not a multiple of [`MERGE_WIDTH`].
pub fn merges_from_bytes(bytes: &[u8]) -> Option<MergeTable> {
    if bytes.len() % MERGE_WIDTH != 0 {
        return None;
    }

    Some(
        bytes
            .chunks_exact(MERGE_WIDTH)
            .map(|chunk| -> Pair {
                (
                    Token::from_ne_bytes([chunk[0], chunk[1]]),
                    Token::from_ne_bytes([chunk[2], chunk[3]]),
                )
            })
            .collect(),
    )
}

/// A single merge entry in the JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedMerge {
    /// Composite token assigned to this entry
    pub token: Token,
    /// First component
    pub first: Token,
    /// Second component
    pub second: Token,
    /// Escaped expansion, for reading only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Complete model in the JSON layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Format version
    pub version: String,
    /// Literal/composite boundary the tokens were written with
    pub first_token: Token,
    /// Merge rules in index order
    pub merges: Vec<SerializedMerge>,
    /// Token sequence, if one was saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<Token>>,
}

impl SerializedModel {
    /// Whether the model was written with the current token boundary.
    pub fn is_compatible(&self) -> bool {
        self.first_token == FIRST_TOKEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_bytes_native_order() {
        let tokens = [0x0061, 0x0180];
        let bytes = tokens_to_bytes(&tokens);

        let mut expected = Vec::new();
        expected.extend_from_slice(&0x0061u16.to_ne_bytes());
        expected.extend_from_slice(&0x0180u16.to_ne_bytes());
        assert_eq!(bytes, expected);

        assert_eq!(tokens_from_bytes(&bytes).unwrap(), tokens);
    }

    #[test]
    fn test_tokens_misaligned() {
        assert!(tokens_from_bytes(&[1, 2, 3]).is_none());
        assert_eq!(tokens_from_bytes(&[]).unwrap(), Vec::<Token>::new());
    }

    #[test]
    fn test_merges_layout() {
        let table = MergeTable::from_pairs([(97, 97), (FIRST_TOKEN, 98)]);
        let bytes = merges_to_bytes(&table);

        assert_eq!(bytes.len(), 2 * MERGE_WIDTH);
        // Same layout as the token file with pairs flattened
        assert_eq!(bytes, tokens_to_bytes(&[97, 97, FIRST_TOKEN, 98]));
        assert_eq!(merges_from_bytes(&bytes).unwrap(), table);
    }

    #[test]
    fn test_merges_misaligned() {
        assert!(merges_from_bytes(&[0; 6]).is_none());
        assert!(merges_from_bytes(&[0; 8]).is_some());
        assert!(merges_from_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_model_format_from_str() {
        assert_eq!("raw".parse::<ModelFormat>().unwrap(), ModelFormat::Raw);
        assert_eq!("JSON".parse::<ModelFormat>().unwrap(), ModelFormat::Json);
        assert!("yaml".parse::<ModelFormat>().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let model = SerializedModel {
            version: "0.1.0".to_string(),
            first_token: FIRST_TOKEN,
            merges: vec![SerializedMerge {
                token: FIRST_TOKEN,
                first: 97,
                second: 98,
                text: Some("ab".to_string()),
            }],
            tokens: Some(vec![FIRST_TOKEN, 99]),
        };

        let json = serde_json::to_string(&model).unwrap();
        let deserialized: SerializedModel = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.version, model.version);
        assert_eq!(deserialized.merges, model.merges);
        assert_eq!(deserialized.tokens, model.tokens);
        assert!(deserialized.is_compatible());
    }

    #[test]
    fn test_optional_fields() {
        let json = r#"{"version":"0.1.0","first_token":128,"merges":[{"token":128,"first":1,"second":2}]}"#;
        let model: SerializedModel = serde_json::from_str(json).unwrap();

        assert!(model.tokens.is_none());
        assert!(model.merges[0].text.is_none());
    }
}
