//! Generate command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairgram_tokenizer::{io, GeneratorConfig, ModelFormat, Tokenizer, TokenizerConfig};
use std::path::PathBuf;

/// Generate command arguments.
#[derive(Parser)]
pub struct GenerateCommand {
    /// Merge table to walk
    #[arg(short, long)]
    pub table: PathBuf,

    /// Merge table file layout (raw or json)
    #[arg(long, default_value = "raw")]
    pub format: ModelFormat,

    /// Number of tokens to generate
    #[arg(short = 'n', long)]
    pub count: usize,

    /// Seed for a reproducible sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also write the sequence as a token file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: GenerateCommand) -> AnyhowResult<()> {
    let config = TokenizerConfig {
        generator: GeneratorConfig { seed: cmd.seed },
        ..TokenizerConfig::default()
    };
    let tokenizer = Tokenizer::load(&cmd.table, cmd.format)
        .with_context(|| format!("failed to load merge table {}", cmd.table.display()))?
        .with_config(config);

    let tokens = tokenizer.generate(cmd.count)?;
    if tokens.len() < cmd.count {
        log::warn!(
            "generation stopped after {} of {} tokens",
            tokens.len(),
            cmd.count
        );
    }

    if let Some(path) = &cmd.output {
        io::write_tokens(path, &tokens).context("failed to write token file")?;
    }

    for line in tokenizer.describe_tokens(&tokens)? {
        println!("{}", line);
    }

    Ok(())
}
