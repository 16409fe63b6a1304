//! Portal CLI - Main entry point.

use anyhow::Result;
use clap::Parser;

use portal_cli::cli::{Cli, dispatch_command};
use portal_cli::logging::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.resolve_config().await?;
    setup_logging(config.log_level.as_deref(), cli.json_logs);

    dispatch_command(cli.command, config).await
}
