// GEODE Market demo binary
// Parses the CLI and runs the scripted marketplace walkthrough.

use anyhow::Result;
use clap::Parser;

use geode_market::cli::{self, Commands};
use geode_market::observability;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let verbose = matches!(cli.command, Commands::Demo { verbose: true, .. });
    observability::init(verbose)?;

    if let Commands::Demo { .. } = cli.command {
        cli::print_banner();
    }

    cli::commands::execute(cli.command).await
}
