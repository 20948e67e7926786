//! Print command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairgram_tokenizer::{ModelFormat, Tokenizer};
use std::path::PathBuf;

/// Print command arguments.
#[derive(Parser)]
pub struct PrintCommand {
    /// Merge table to show
    #[arg(short, long)]
    pub table: PathBuf,

    /// Merge table file layout (raw or json)
    #[arg(long, default_value = "raw")]
    pub format: ModelFormat,
}

pub fn run(cmd: PrintCommand) -> AnyhowResult<()> {
    let tokenizer = Tokenizer::load(&cmd.table, cmd.format)
        .with_context(|| format!("failed to load merge table {}", cmd.table.display()))?;

    let lines = tokenizer.describe()?;

    let stats = tokenizer.table().stats();
    log::info!(
        "{} merges, deepest expansion {} levels, longest expansion {} bytes",
        stats.count,
        stats.max_depth,
        stats.max_expansion
    );

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}
