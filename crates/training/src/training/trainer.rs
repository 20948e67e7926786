//! BPE merge-table construction.
//!
//! The trainer maps the input bytes to literal tokens and then runs merge
//! passes until no adjacent pair repeats: count every adjacent pair, take the
//! most frequent one, give it the next composite token and rewrite the
//! working sequence.

use super::counter::{self, PairCounter};
use pairgram_core::{
    MergeCandidate, MergeTable, Result, Token, TokenizerError, FIRST_TOKEN,
};
use serde::Serialize;

/// Configuration for building a merge table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingConfig {
    /// Minimum frequency for a pair to be merged
    pub min_frequency: u64,
    /// Stop after this many merges (unlimited if None)
    pub max_merges: Option<usize>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            min_frequency: 2,
            max_merges: None,
        }
    }
}

impl TrainingConfig {
    /// Create a builder starting from the default configuration.
    pub fn builder() -> TrainingConfigBuilder {
        TrainingConfigBuilder::default()
    }
}

/// Builder for [`TrainingConfig`].
#[derive(Debug, Clone, Default)]
pub struct TrainingConfigBuilder {
    config: TrainingConfig,
}

impl TrainingConfigBuilder {
    /// Set the minimum frequency for merges.
    pub fn min_frequency(mut self, freq: u64) -> Self {
        self.config.min_frequency = freq;
        self
    }

    /// Limit the number of merges.
    pub fn max_merges(mut self, max: usize) -> Self {
        self.config.max_merges = Some(max);
        self
    }

    /// Build the configuration.
    ///
    /// A minimum frequency below 2 is rejected: merging a pair that occurs
    /// once does not shrink the sequence and would never terminate.
    pub fn build(self) -> Result<TrainingConfig> {
        if self.config.min_frequency < 2 {
            return Err(TokenizerError::InvalidConfig(format!(
                "min_frequency must be at least 2, got {}",
                self.config.min_frequency
            )));
        }
        Ok(self.config)
    }
}

/// Summary of an encode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EncodingStats {
    /// Number of merge passes that produced a merge
    pub iterations: u64,
    /// Sequence length before compression
    pub initial_len: usize,
    /// Sequence length after compression
    pub encoded_len: usize,
}

impl EncodingStats {
    /// Encoded length divided by initial length.
    pub fn compression_ratio(&self) -> f64 {
        if self.initial_len == 0 {
            return 1.0;
        }
        self.encoded_len as f64 / self.initial_len as f64
    }
}

/// BPE trainer.
///
/// Owns the working sequence and the merge table for one encode run; nothing
/// is shared between runs.
pub struct BpeTrainer {
    /// Configuration
    config: TrainingConfig,
    /// Merge table being built
    table: MergeTable,
    /// Current working sequence
    sequence: Vec<Token>,
    /// Scratch buffer for the rewrite pass
    scratch: Vec<Token>,
    /// Pair frequencies of the current sequence
    counter: PairCounter,
    /// Statistics for the current run
    stats: EncodingStats,
}

impl BpeTrainer {
    /// Create a new BPE trainer with the given configuration.
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            table: MergeTable::new(),
            sequence: Vec::new(),
            scratch: Vec::new(),
            counter: PairCounter::new(),
            stats: EncodingStats::default(),
        }
    }

    /// Create a new BPE trainer that stops after `max_merges` merges.
    pub fn with_max_merges(max_merges: usize) -> Self {
        Self::new(TrainingConfig {
            max_merges: Some(max_merges),
            ..Default::default()
        })
    }

    /// Build a merge table for `input` and compress it.
    ///
    /// # Returns
    /// The merge table, the compressed token sequence and run statistics
    pub fn train(&mut self, input: &[u8]) -> Result<(MergeTable, Vec<Token>, EncodingStats)> {
        self.initialize(input)?;

        while self.step()?.is_some() {}

        self.stats.encoded_len = self.sequence.len();
        log::debug!(
            "encoded {} bytes into {} tokens with {} merges",
            self.stats.initial_len,
            self.stats.encoded_len,
            self.table.len()
        );

        Ok((
            std::mem::take(&mut self.table),
            std::mem::take(&mut self.sequence),
            self.stats,
        ))
    }

    /// Reset the trainer and load `input` as literal tokens.
    pub fn initialize(&mut self, input: &[u8]) -> Result<()> {
        if input.is_empty() {
            return Err(TokenizerError::EmptyInput);
        }

        if let Some(offset) = input.iter().position(|&b| Token::from(b) >= FIRST_TOKEN) {
            return Err(TokenizerError::NonLiteralByte {
                byte: input[offset],
                offset,
            });
        }

        self.table = MergeTable::new();
        self.sequence = input.iter().map(|&b| Token::from(b)).collect();
        self.counter.clear();
        self.stats = EncodingStats {
            iterations: 0,
            initial_len: input.len(),
            encoded_len: input.len(),
        };

        Ok(())
    }

    /// Run one merge pass over the working sequence.
    ///
    /// Returns the merged candidate, or None once no pair reaches the minimum
    /// frequency, the merge limit is hit or every composite token is taken.
    pub fn step(&mut self) -> Result<Option<MergeCandidate>> {
        if let Some(max) = self.config.max_merges {
            if self.table.len() >= max {
                return Ok(None);
            }
        }

        if self.table.next_token().is_none() {
            log::warn!(
                "token space exhausted after {} merges, stopping with {} tokens",
                self.table.len(),
                self.sequence.len()
            );
            return Ok(None);
        }

        self.counter.count_pairs(&self.sequence);

        let candidate = match self.counter.most_frequent() {
            Some(c) if c.count >= self.config.min_frequency => c,
            _ => return Ok(None),
        };

        let new_token = self.table.push(candidate.pair)?;

        let replaced = counter::merge_pair(
            &self.sequence,
            candidate.pair,
            new_token,
            &mut self.scratch,
        );
        std::mem::swap(&mut self.sequence, &mut self.scratch);

        self.stats.iterations += 1;
        self.stats.encoded_len = self.sequence.len();

        log::trace!(
            "pass {}: merged ({}, {}) x{} into {} ({} replaced, {} tokens left)",
            self.stats.iterations,
            candidate.pair.0,
            candidate.pair.1,
            candidate.count,
            new_token,
            replaced,
            self.sequence.len()
        );

        Ok(Some(candidate))
    }

    /// The current working sequence.
    pub fn sequence(&self) -> &[Token] {
        &self.sequence
    }

    /// The merge table built so far.
    pub fn table(&self) -> &MergeTable {
        &self.table
    }

    /// Statistics for the current run.
    pub fn stats(&self) -> EncodingStats {
        self.stats
    }
}

impl Default for BpeTrainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}

/// Encode `input` with the default configuration.
pub fn encode(input: &[u8]) -> Result<(MergeTable, Vec<Token>, EncodingStats)> {
    BpeTrainer::default().train(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairgram_core::{decoder, is_literal, MAX_MERGES};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const A: Token = b'a' as Token;
    const B: Token = b'b' as Token;
    const C: Token = b'c' as Token;
    const D: Token = b'd' as Token;

    #[test]
    fn test_reference_example() {
        let (table, tokens, stats) = encode(b"aaabdaaabac").unwrap();

        assert_eq!(
            table.pairs(),
            &[(A, A), (FIRST_TOKEN, A), (FIRST_TOKEN + 1, B)]
        );
        let z = FIRST_TOKEN + 2;
        assert_eq!(tokens, vec![z, D, z, A, C]);
        assert_eq!(stats.iterations, 3);
        assert_eq!(stats.initial_len, 11);
        assert_eq!(stats.encoded_len, 5);

        let (bytes, _) = decoder::decode(&tokens, &table).unwrap();
        assert_eq!(bytes, b"aaabdaaabac");
    }

    #[test]
    fn test_first_merge_is_most_frequent() {
        let mut trainer = BpeTrainer::default();
        trainer.initialize(b"aaabdaaabac").unwrap();

        let first = trainer.step().unwrap().unwrap();
        assert_eq!(first.pair, (A, A));
        assert_eq!(first.count, 4);
    }

    #[test]
    fn test_no_repeated_pair() {
        let (table, tokens, stats) = encode(b"abcdefg").unwrap();

        assert!(table.is_empty());
        assert_eq!(tokens, b"abcdefg".iter().map(|&b| Token::from(b)).collect::<Vec<_>>());
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.encoded_len, 7);
    }

    #[test]
    fn test_single_byte() {
        let (table, tokens, _) = encode(b"x").unwrap();
        assert!(table.is_empty());
        assert_eq!(tokens, vec![b'x' as Token]);
    }

    #[test]
    fn test_monotonic_shrink() {
        let text = b"the cat sat on the mat and the hat sat on the cat";
        let mut trainer = BpeTrainer::default();
        trainer.initialize(text).unwrap();

        let mut previous = trainer.sequence().len();
        while trainer.step().unwrap().is_some() {
            let current = trainer.sequence().len();
            assert!(current < previous, "pass did not shrink: {previous} -> {current}");
            previous = current;
        }
        assert!(!trainer.table().is_empty());
    }

    #[test]
    fn test_table_acyclic() {
        let text = b"In the above example, the output of the BPE is a vocabulary, which can be used to encode any text that is written with the letters abcd.";
        let (table, _, _) = encode(text).unwrap();

        assert!(table.validate().is_ok());
        for (index, &(first, second)) in table.pairs().iter().enumerate() {
            for component in [first, second] {
                assert!(is_literal(component) || usize::from(component - FIRST_TOKEN) < index);
            }
        }
    }

    #[test]
    fn test_round_trip() {
        let samples: [&[u8]; 5] = [
            b"a",
            b"aaaaaaaaaaaaaaaa",
            b"abababababab",
            b"hello hello hello world\n\twith\x00control\x7fbytes",
            b"It will not be able to encode text containing other symbols, such as no.",
        ];

        for sample in samples {
            let (table, tokens, stats) = encode(sample).unwrap();
            let (bytes, decoded) = decoder::decode(&tokens, &table).unwrap();
            assert_eq!(bytes, sample);
            assert_eq!(decoded.token_count, stats.encoded_len);
            assert_eq!(decoded.byte_count, stats.initial_len);
        }
    }

    #[test]
    fn test_round_trip_random_inputs() {
        let alphabets: [&[u8]; 4] = [
            b"ab",
            b"acgt",
            b"etaoin shrdlu",
            b" !\"#$%&'()*+,-./0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[\\]^_`abcdefghijklmnopqrstuvwxyz{|}~\n\t",
        ];
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for alphabet in alphabets {
            for len in [1, 2, 3, 17, 256, 2048] {
                let input: Vec<u8> = (0..len)
                    .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                    .collect();

                let mut trainer = BpeTrainer::default();
                trainer.initialize(&input).unwrap();
                let mut previous = trainer.sequence().len();
                while trainer.step().unwrap().is_some() {
                    assert!(trainer.sequence().len() < previous);
                    previous = trainer.sequence().len();
                }

                let (bytes, _) = decoder::decode(trainer.sequence(), trainer.table()).unwrap();
                assert_eq!(bytes, input, "alphabet {alphabet:?}, length {len}");
                assert!(trainer.table().validate().is_ok());
            }
        }
    }

    #[test]
    fn test_stops_when_token_space_exhausted() {
        let mut trainer = BpeTrainer::default();
        trainer.initialize(b"xyxyxyxy").unwrap();
        // Leave room for exactly one more merge
        trainer.table = MergeTable::from_pairs(std::iter::repeat((A, B)).take(MAX_MERGES - 1));

        let merged = trainer.step().unwrap().unwrap();
        assert_eq!(merged.pair, (b'x' as Token, b'y' as Token));
        assert_eq!(trainer.table().len(), MAX_MERGES);

        // (Token::MAX, Token::MAX) repeats, but no token is left for it
        assert_eq!(trainer.sequence(), &[Token::MAX; 4]);
        assert!(trainer.step().unwrap().is_none());
        assert_eq!(trainer.table().len(), MAX_MERGES);

        let (bytes, _) = decoder::decode(trainer.sequence(), trainer.table()).unwrap();
        assert_eq!(bytes, b"xyxyxyxy");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(encode(b""), Err(TokenizerError::EmptyInput)));
    }

    #[test]
    fn test_non_literal_byte() {
        let err = encode("café".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            TokenizerError::NonLiteralByte { byte: 0xC3, offset: 3 }
        ));
    }

    #[test]
    fn test_max_merges() {
        let mut trainer = BpeTrainer::with_max_merges(1);
        let (table, tokens, stats) = trainer.train(b"aaabdaaabac").unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(stats.iterations, 1);
        let (bytes, _) = decoder::decode(&tokens, &table).unwrap();
        assert_eq!(bytes, b"aaabdaaabac");
    }

    #[test]
    fn test_min_frequency() {
        let config = TrainingConfig::builder().min_frequency(3).build().unwrap();
        let mut trainer = BpeTrainer::new(config);

        // (a,b) occurs only twice
        let (table, _, _) = trainer.train(b"abxab").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_builder_rejects_low_min_frequency() {
        assert!(matches!(
            TrainingConfig::builder().min_frequency(1).build(),
            Err(TokenizerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_trainer_reusable() {
        let mut trainer = BpeTrainer::default();
        let first = trainer.train(b"abab").unwrap();
        let second = trainer.train(b"abab").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compression_ratio() {
        let (_, _, stats) = encode(b"aaaaaaaa").unwrap();
        // aaaaaaaa -> XXXX -> YY, and (Y, Y) occurs once
        assert_eq!(stats.encoded_len, 2);
        assert_eq!(stats.compression_ratio(), 0.25);
    }
}
