//! Error types for portal-visibility.

use portal_storage::StorageError;
use thiserror::Error;

/// Catalog validation and lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate feature id: {0}")]
    DuplicateFeature(String),

    #[error("Duplicate role id: {0}")]
    DuplicateRole(String),

    /// A role's default policy names a feature the catalog does not have.
    #[error("Role '{role}' default access refers to unknown feature '{feature}'")]
    UnknownPolicyFeature { role: String, feature: String },

    #[error("Unknown feature: {0}")]
    UnknownFeature(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown feature category: {0}")]
    UnknownCategory(String),
}

/// Errors from loading or saving the visibility document.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The document store could not be constructed or is not initialized.
    #[error("Settings storage is unavailable")]
    StorageUnavailable,

    /// The store was reachable but the read failed.
    #[error("Failed to read visibility settings: {0}")]
    Read(#[source] StorageError),

    /// The store was reachable but the write failed.
    #[error("Failed to save visibility settings: {0}")]
    Write(#[source] StorageError),
}

/// Errors surfaced by an edit session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Saving failed. Edits are kept and the session stays dirty.
    #[error("Could not save role visibility changes: {source}")]
    WriteFailed {
        #[source]
        source: PersistenceError,
    },

    /// The session fell back to defaults because loading failed. Saving
    /// would overwrite whatever is stored, so it is refused until a reload
    /// succeeds.
    #[error("Stored role visibility could not be loaded ({reason}); reload before saving")]
    LoadUnresolved { reason: String },
}
