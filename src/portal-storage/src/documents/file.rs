//! File-backed document store.
//!
//! Each document is a pretty-printed JSON file under the documents directory,
//! e.g. `settings/roleVisibility` lives at `documents/settings/roleVisibility.json`.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::store::{DocumentStore, SetOptions, apply_write};
use crate::error::{Result, StorageError};
use crate::paths::PortalPaths;

/// Document store persisting JSON documents on the local filesystem.
#[derive(Debug)]
pub struct FileDocumentStore {
    paths: PortalPaths,
    initialized: AtomicBool,
}

impl FileDocumentStore {
    /// Create a file store with automatic path detection.
    pub fn new() -> Result<Self> {
        let paths = PortalPaths::new()?;
        Ok(Self::with_paths(paths))
    }

    /// Create a file store with custom paths.
    pub fn with_paths(paths: PortalPaths) -> Self {
        Self {
            paths,
            initialized: AtomicBool::new(false),
        }
    }

    /// Initialize storage (create directories). Must be called before use.
    pub async fn init(&self) -> Result<()> {
        self.paths.ensure_dirs_async().await?;
        self.initialized.store(true, Ordering::Release);
        info!(data_dir = %self.paths.data_dir.display(), "Document storage initialized");
        Ok(())
    }

    /// Whether [`init`](Self::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Get the underlying paths.
    pub fn paths(&self) -> &PortalPaths {
        &self.paths
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(StorageError::NotInitialized)
        }
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        self.ensure_initialized()?;
        let file_path = self.paths.document_path(path)?;

        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value: Value = serde_json::from_str(&content)?;
        debug!(path = %path, "Document read");
        Ok(Some(value))
    }

    /// Write a document to disk.
    ///
    /// The file is fsynced, along with its parent directory on Unix, before
    /// returning.
    async fn set(&self, path: &str, data: Value, options: SetOptions) -> Result<()> {
        self.ensure_initialized()?;
        let file_path = self.paths.document_path(path)?;

        let existing = if options.merge {
            self.get(path).await?
        } else {
            None
        };
        let document = apply_write(path, existing, data, options)?;
        let content = serde_json::to_string_pretty(&document)?;

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        file.sync_all().await?;

        #[cfg(unix)]
        {
            if let Some(parent) = file_path.parent() {
                if let Ok(dir) = fs::File::open(parent).await {
                    let _ = dir.sync_all().await;
                }
            }
        }

        debug!(path = %path, merge = options.merge, "Document written");
        Ok(())
    }
}
