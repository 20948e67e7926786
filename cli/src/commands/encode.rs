//! Encode command implementation.

use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use pairgram_tokenizer::{io, ModelFormat, Tokenizer, TokenizerSaver};
use std::path::PathBuf;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Text file to compress
    #[arg(short, long)]
    pub input: PathBuf,

    /// Where to write the merge table
    #[arg(short, long)]
    pub table: PathBuf,

    /// Merge table file layout (raw or json)
    #[arg(long, default_value = "raw")]
    pub format: ModelFormat,

    /// Where to write the token sequence
    #[arg(short, long)]
    pub output: PathBuf,

    /// Also write the model as an inspectable JSON document
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Stop after this many merges
    #[arg(long)]
    pub max_merges: Option<usize>,
}

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let input = io::read_text(&cmd.input)
        .with_context(|| format!("failed to read input {}", cmd.input.display()))?;

    let mut builder = Tokenizer::builder();
    if let Some(max) = cmd.max_merges {
        builder = builder.max_merges(max);
    }
    let mut tokenizer = builder.build()?;

    let encoding = tokenizer
        .encode(&input)
        .with_context(|| format!("failed to encode {}", cmd.input.display()))?;

    tokenizer
        .save(&cmd.table, cmd.format)
        .context("failed to write merge table")?;
    io::write_tokens(&cmd.output, &encoding.tokens).context("failed to write token file")?;

    if let Some(path) = &cmd.json {
        TokenizerSaver::new(tokenizer.table())
            .with_tokens(&encoding.tokens)
            .save_json(path)
            .context("failed to write JSON model")?;
    }

    let stats = encoding.stats;
    log::info!("{}", serde_json::to_string(&stats)?);
    println!(
        "Encoded {} bytes into {} tokens with {} merges ({:.1}% of original)",
        stats.initial_len,
        stats.encoded_len,
        tokenizer.merge_count(),
        stats.compression_ratio() * 100.0
    );

    Ok(())
}
