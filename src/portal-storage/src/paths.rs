//! OS-aware path detection for Portal storage.
//!
//! Documents live under the platform data directory:
//!
//! - **Windows**: `%APPDATA%\Portal\`
//! - **macOS**: `~/Library/Application Support/Portal/`
//! - **Linux**: `~/.local/share/Portal/`
//!
//! `PORTAL_DATA_DIR` and `PORTAL_CONFIG_DIR` override the detected locations.

use std::path::PathBuf;
use tracing::debug;

use crate::error::{Result, StorageError};

/// Application name used for storage directories.
pub const APP_NAME: &str = "Portal";

/// Subdirectory names.
pub const DOCUMENTS_DIR: &str = "documents";
pub const CONFIG_FILE: &str = "config.toml";

/// File extension used for stored documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Portal storage paths container.
#[derive(Debug, Clone)]
pub struct PortalPaths {
    /// Root data directory (platform-specific).
    pub data_dir: PathBuf,
    /// Document store directory.
    pub documents_dir: PathBuf,
}

impl PortalPaths {
    /// Create PortalPaths with automatic OS detection.
    pub fn new() -> Result<Self> {
        let data_dir = portal_data_dir()?;
        Ok(Self::from_root(data_dir))
    }

    /// Create PortalPaths from a custom root directory.
    pub fn from_root(data_dir: PathBuf) -> Self {
        Self {
            documents_dir: data_dir.join(DOCUMENTS_DIR),
            data_dir,
        }
    }

    /// Ensure all directories exist (async version).
    pub async fn ensure_dirs_async(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir).await?;
        tokio::fs::create_dir_all(&self.documents_dir).await?;
        debug!(data_dir = %self.data_dir.display(), "Portal storage directories initialized");
        Ok(())
    }

    /// Get the file backing a document path such as `settings/roleVisibility`.
    pub fn document_path(&self, doc_path: &str) -> Result<PathBuf> {
        let segments = split_document_path(doc_path)?;
        let mut path = self.documents_dir.clone();
        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| StorageError::InvalidPath(doc_path.to_string()))?;
        for segment in parents {
            path.push(segment);
        }
        path.push(format!("{}.{}", last, DOCUMENT_EXTENSION));
        Ok(path)
    }
}

/// Split a document path into validated segments.
///
/// Segments are non-empty and limited to ASCII alphanumerics, `-` and `_`,
/// so a document path can never escape the documents directory.
pub fn split_document_path(doc_path: &str) -> Result<Vec<&str>> {
    let invalid = || StorageError::InvalidPath(doc_path.to_string());

    if doc_path.is_empty() {
        return Err(invalid());
    }

    doc_path
        .split('/')
        .map(|segment| {
            let valid = !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if valid { Ok(segment) } else { Err(invalid()) }
        })
        .collect()
}

/// Get the Portal data directory based on the current OS.
pub fn portal_data_dir() -> Result<PathBuf> {
    // Check environment variable override first
    if let Ok(val) = std::env::var("PORTAL_DATA_DIR") {
        if !val.is_empty() {
            let path = PathBuf::from(val);
            debug!(path = %path.display(), "Using PORTAL_DATA_DIR override");
            return Ok(path);
        }
    }

    let base = dirs::data_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}

/// Get the Portal config directory based on the current OS.
pub fn portal_config_dir() -> Result<PathBuf> {
    if let Ok(val) = std::env::var("PORTAL_CONFIG_DIR") {
        if !val.is_empty() {
            let path = PathBuf::from(val);
            debug!(path = %path.display(), "Using PORTAL_CONFIG_DIR override");
            return Ok(path);
        }
    }

    let base = dirs::config_dir().ok_or(StorageError::HomeDirNotFound)?;
    Ok(base.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_structure() {
        let paths = PortalPaths::from_root(PathBuf::from("/srv/portal"));
        assert!(paths.documents_dir.ends_with(DOCUMENTS_DIR));
        assert_eq!(paths.data_dir, PathBuf::from("/srv/portal"));
    }

    #[test]
    fn test_document_path() {
        let paths = PortalPaths::from_root(PathBuf::from("/srv/portal"));
        let path = paths.document_path("settings/roleVisibility").unwrap();
        assert_eq!(
            path,
            PathBuf::from("/srv/portal/documents/settings/roleVisibility.json")
        );
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let paths = PortalPaths::from_root(PathBuf::from("/srv/portal"));
        for bad in ["", "/settings", "settings/", "../etc/passwd", "a//b", "a/./b", "a b"] {
            assert!(
                matches!(paths.document_path(bad), Err(StorageError::InvalidPath(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
