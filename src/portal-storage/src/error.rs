//! Error types for portal-storage.

use thiserror::Error;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Document path is empty or contains an illegal segment.
    #[error("Invalid document path: {0:?}")]
    InvalidPath(String),

    /// A merge write targeted a document that is not a JSON object.
    #[error("Document at {0:?} is not an object and cannot be merged into")]
    NotAnObject(String),

    /// Home directory not found.
    #[error("Could not determine home/data directory")]
    HomeDirNotFound,

    /// Storage not initialized.
    #[error("Storage not initialized")]
    NotInitialized,
}

impl StorageError {
    /// Whether the error means the store itself is unusable, as opposed to a
    /// single request failing.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::NotInitialized | Self::HomeDirNotFound)
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
