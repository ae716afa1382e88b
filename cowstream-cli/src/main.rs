//! cowstream command-line entry point

use anyhow::Result;
use clap::Parser;
use cowstream_cli::commands::Commands;

/// Stream sentences out of COW corpus files
#[derive(Debug, Parser)]
#[command(name = "cowstream", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
