//! Random-walk token generation.
//!
//! The walk starts from the `second` component of a random merge entry. Each
//! step collects the `second` component of every entry whose `first` equals
//! the current token and picks one uniformly. When a composite token has no
//! successor, the walk retries from that token's own `second` component; when
//! a literal token has none, generation stops early.
//!
//! The fallback does not always lead anywhere useful: on some table shapes it
//! walks down to a literal and ends the sequence after very few tokens.

use pairgram_core::{is_literal, MergeTable, Result, Token, TokenizerError, FIRST_TOKEN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed for a reproducible walk (OS entropy if None)
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Build the random number generator described by this configuration.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Random-walk generator over a borrowed merge table.
pub struct Generator<'a, R: Rng> {
    table: &'a MergeTable,
    rng: R,
}

impl<'a> Generator<'a, StdRng> {
    /// Create a generator with the RNG described by `config`.
    pub fn new(table: &'a MergeTable, config: GeneratorConfig) -> Self {
        Self::with_rng(table, config.rng())
    }
}

impl<'a, R: Rng> Generator<'a, R> {
    /// Create a generator with a caller-supplied RNG.
    pub fn with_rng(table: &'a MergeTable, rng: R) -> Self {
        Self { table, rng }
    }

    /// Generate up to `count` tokens.
    ///
    /// Fewer tokens are returned when the walk reaches a literal token with
    /// no successor.
    pub fn generate(&mut self, count: usize) -> Result<Vec<Token>> {
        if count == 0 {
            return Err(TokenizerError::InvalidConfig(
                "token count must be greater than zero".to_string(),
            ));
        }
        if self.table.is_empty() {
            return Err(TokenizerError::InvalidConfig(
                "cannot generate from an empty merge table".to_string(),
            ));
        }

        let start = self.rng.random_range(0..self.table.len());
        let (_, mut current) = self.table.pairs()[start];

        let mut result = Vec::with_capacity(count);
        result.push(current);

        while result.len() < count {
            let Some(candidates) = self.successors(current)? else {
                log::debug!(
                    "gave up after {} tokens: reached terminal token {}",
                    result.len(),
                    current
                );
                break;
            };

            log::trace!(
                "token {}: {} possible next tokens",
                result.len(),
                candidates.len()
            );

            current = candidates[self.rng.random_range(0..candidates.len())];
            result.push(current);
        }

        Ok(result)
    }

    /// Successor candidates of `token`, falling back through `second`
    /// components of composite tokens that have none.
    ///
    /// Returns None once a literal token without successors is reached.
    fn successors(&self, token: Token) -> Result<Option<Vec<Token>>> {
        let mut probe = token;

        loop {
            let candidates = self.table.successors(probe);
            if !candidates.is_empty() {
                return Ok(Some(candidates));
            }

            if is_literal(probe) {
                return Ok(None);
            }

            let next = self.fallback(probe)?;
            log::trace!("no token follows {}, checking {} instead", probe, next);
            probe = next;
        }
    }

    /// The `second` component of a composite token's entry.
    fn fallback(&self, token: Token) -> Result<Token> {
        let (first, second) = self
            .table
            .resolve(token)?
            .ok_or_else(|| TokenizerError::InvalidConfig(format!("token {} is literal", token)))?;

        // A self or forward reference would never reach a literal
        let index = usize::from(token - FIRST_TOKEN);
        if !MergeTable::precedes(second, index) {
            return Err(TokenizerError::InvalidMerge {
                index,
                first,
                second,
            });
        }

        Ok(second)
    }
}

/// Generate up to `count` tokens with the given configuration.
pub fn generate(table: &MergeTable, count: usize, config: GeneratorConfig) -> Result<Vec<Token>> {
    Generator::new(table, config).generate(count)
}
