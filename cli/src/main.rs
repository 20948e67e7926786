//! Pairgram CLI - Command-line interface for the byte-pair encoder.
//!
//! This is the main entry point for the `pairgram` command-line tool.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{DecodeCommand, EncodeCommand, GenerateCommand, PrintCommand};

#[derive(Parser)]
#[command(name = "pairgram")]
#[command(about = "Byte-pair encoding of ASCII text with 16-bit tokens", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a text file into a merge table and a token file
    Encode(EncodeCommand),
    /// Expand a token file back into text
    Decode(DecodeCommand),
    /// Show every merge table entry with its expansion
    Print(PrintCommand),
    /// Produce a random token sequence from a merge table
    Generate(GenerateCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    stderrlog::new()
        .module(module_path!())
        .modules(["pairgram_core", "pairgram_training", "pairgram_tokenizer"])
        .quiet(cli.quiet)
        .verbosity(usize::from(cli.verbose) + 1)
        .init()?;

    match cli.command {
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
        Commands::Print(cmd) => commands::print::run(cmd)?,
        Commands::Generate(cmd) => commands::generate::run(cmd)?,
    }

    Ok(())
}
