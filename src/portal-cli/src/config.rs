//! CLI configuration.
//!
//! Read from `config.toml` in the Portal config directory, then overridden
//! by `PORTAL_*` environment variables and finally by command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use portal_storage::paths::CONFIG_FILE;
use portal_storage::portal_config_dir;

/// Portal CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Root of the document store. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Document path of the visibility settings.
    pub document_path: Option<String>,

    /// Identity recorded as `updatedBy` on save.
    pub actor: Option<String>,

    /// Log level when `RUST_LOG` is unset.
    pub log_level: Option<String>,
}

impl PortalConfig {
    /// Parse from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid portal configuration")
    }

    /// Load from a TOML file. A missing file yields the defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                Self::parse(&content).with_context(|| format!("Failed to load {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        Ok(portal_config_dir()?.join(CONFIG_FILE))
    }

    /// Apply `PORTAL_*` environment overrides.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(dir) = get("PORTAL_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(actor) = get("PORTAL_ACTOR") {
            self.actor = Some(actor);
        }
        if let Some(level) = get("PORTAL_LOG_LEVEL") {
            self.log_level = Some(level);
        }
        self
    }
}
