//! Command-line arguments and dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::catalog_cmd::CatalogCli;
use crate::config::PortalConfig;
use crate::visibility_cmd::VisibilityCli;

/// Portal administration.
#[derive(Debug, Parser)]
#[command(name = "portal")]
#[command(about = "Manage Portal role visibility settings")]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PORTAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Document store root (overrides config and PORTAL_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Identity recorded on save (overrides config and PORTAL_ACTOR)
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect the feature catalog and role registry
    Catalog(CatalogCli),

    /// View and edit which features each role can see
    #[command(visible_alias = "vis")]
    Visibility(VisibilityCli),
}

impl Cli {
    /// Load the config file, then layer environment and flag overrides.
    pub async fn resolve_config(&self) -> Result<PortalConfig> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => PortalConfig::default_path()?,
        };

        let mut config = PortalConfig::load(&path).await?.with_env();
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(actor) = &self.actor {
            config.actor = Some(actor.clone());
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
        Ok(config)
    }
}

/// Run the parsed command.
pub async fn dispatch_command(command: Commands, config: PortalConfig) -> Result<()> {
    match command {
        Commands::Catalog(cli) => cli.run(),
        Commands::Visibility(cli) => cli.run(&config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "portal",
            "visibility",
            "show",
            "--actor",
            "ops@example.com",
            "--data-dir",
            "/tmp/portal",
        ])
        .unwrap();
        assert_eq!(cli.actor.as_deref(), Some("ops@example.com"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/portal")));
    }
}
