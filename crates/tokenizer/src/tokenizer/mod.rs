//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties the
//! trainer, the decoder, the generator and the file codec to one merge table.

use crate::generator::{Generator, GeneratorConfig};
use crate::io::{ModelFormat, TokenizerLoader, TokenizerSaver};
use crate::utils::display;
use pairgram_core::{decoder, DecodingStats, MergeTable, Result, Token};
use pairgram_training::{BpeTrainer, EncodingStats, TrainingConfig};
use std::path::Path;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerConfig {
    /// Merge-table construction settings
    pub training: TrainingConfig,
    /// Random-walk settings
    pub generator: GeneratorConfig,
}

/// Builder for creating a tokenizer.
#[derive(Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.training.min_frequency = freq;
        self
    }

    /// Limit the number of merges.
    pub fn max_merges(mut self, max: usize) -> Self {
        self.config.training.max_merges = Some(max);
        self
    }

    /// Seed the generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.generator.seed = Some(seed);
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> Result<Tokenizer> {
        let mut training = TrainingConfig::builder().min_frequency(self.config.training.min_frequency);
        if let Some(max) = self.config.training.max_merges {
            training = training.max_merges(max);
        }

        Ok(Tokenizer::new(TokenizerConfig {
            training: training.build()?,
            generator: self.config.generator,
        }))
    }
}

/// Result of encoding text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    /// Compressed token sequence
    pub tokens: Vec<Token>,
    /// Run statistics
    pub stats: EncodingStats,
}

impl Encoding {
    /// Get the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the encoding is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Main tokenizer struct.
///
/// Holds one merge table. Encoding replaces it; decoding and generation only
/// read it.
pub struct Tokenizer {
    /// Merge table
    table: MergeTable,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new tokenizer with an empty merge table.
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            table: MergeTable::new(),
            config,
        }
    }

    /// Create a tokenizer around an existing merge table.
    pub fn from_table(table: MergeTable, config: TokenizerConfig) -> Self {
        Self { table, config }
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Build a merge table for `input`, replacing the current one, and return
    /// the compressed sequence.
    pub fn encode(&mut self, input: &[u8]) -> Result<Encoding> {
        let mut trainer = BpeTrainer::new(self.config.training.clone());
        let (table, tokens, stats) = trainer.train(input)?;

        self.table = table;
        Ok(Encoding { tokens, stats })
    }

    /// Decode a token sequence with the current merge table.
    pub fn decode(&self, tokens: &[Token]) -> Result<(Vec<u8>, DecodingStats)> {
        decoder::decode(tokens, &self.table)
    }

    /// Generate up to `count` tokens by random walk over the merge table.
    pub fn generate(&self, count: usize) -> Result<Vec<Token>> {
        Generator::new(&self.table, self.config.generator).generate(count)
    }

    /// Render the merge table, one line per entry.
    pub fn describe(&self) -> Result<Vec<String>> {
        self.table.validate()?;
        display::describe_table(&self.table)
    }

    /// Render each token of a sequence with its expansion.
    pub fn describe_tokens(&self, tokens: &[Token]) -> Result<Vec<String>> {
        display::describe_tokens(tokens, &self.table)
    }

    /// Load a tokenizer from a merge table file.
    pub fn load(path: &Path, model_format: ModelFormat) -> Result<Self> {
        let table = TokenizerLoader::load(path, model_format)?;
        log::debug!("loaded {} merges from {}", table.len(), path.display());
        Ok(Self::from_table(table, TokenizerConfig::default()))
    }

    /// Save the merge table.
    pub fn save(&self, path: &Path, model_format: ModelFormat) -> Result<()> {
        TokenizerSaver::new(&self.table).save(path, model_format)
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TokenizerConfig) -> Self {
        self.config = config;
        self
    }

    /// The current merge table.
    pub fn table(&self) -> &MergeTable {
        &self.table
    }

    /// Get the number of merges in the table.
    pub fn merge_count(&self) -> usize {
        self.table.len()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}
