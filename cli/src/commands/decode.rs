//! Decode command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairgram_tokenizer::{io, ModelFormat, Tokenizer};
use std::io::Write;
use std::path::PathBuf;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Token file to expand
    #[arg(short, long)]
    pub input: PathBuf,

    /// Merge table the tokens were produced with
    #[arg(short, long)]
    pub table: PathBuf,

    /// Merge table file layout (raw or json)
    #[arg(long, default_value = "raw")]
    pub format: ModelFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.table, cmd.format)
        .with_context(|| format!("failed to load merge table {}", cmd.table.display()))?;
    let tokens = io::read_tokens(&cmd.input)
        .with_context(|| format!("failed to load tokens {}", cmd.input.display()))?;

    let (text, stats) = tokenizer.decode(&tokens)?;
    log::info!("{}", serde_json::to_string(&stats)?);

    match &cmd.output {
        Some(path) => {
            io::write_text(path, &text).context("failed to write decoded text")?;
            log::info!("decoded {} tokens to {}", stats.token_count, path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&text)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
