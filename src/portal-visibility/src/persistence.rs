//! Loading and saving the visibility document.
//!
//! The whole matrix is one document, replaced on every save. Concurrent
//! administrators overwrite each other; the last save wins.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use portal_storage::{DocumentStore, SetOptions, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::matrix::VisibilityMatrix;

/// Where the visibility document lives in the store.
pub const VISIBILITY_DOCUMENT: &str = "settings/roleVisibility";

/// The stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredVisibilitySettings {
    pub role_settings: VisibilityMatrix,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
}

/// Reads and writes [`StoredVisibilitySettings`] through a document store.
#[derive(Clone)]
pub struct VisibilityRepository {
    store: Option<Arc<dyn DocumentStore>>,
    document_path: String,
}

impl VisibilityRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store: Some(store),
            document_path: VISIBILITY_DOCUMENT.to_string(),
        }
    }

    /// A repository whose store could not be constructed.
    pub fn unavailable() -> Self {
        Self {
            store: None,
            document_path: VISIBILITY_DOCUMENT.to_string(),
        }
    }

    pub fn with_document_path(mut self, path: impl Into<String>) -> Self {
        self.document_path = path.into();
        self
    }

    pub fn document_path(&self) -> &str {
        &self.document_path
    }

    pub fn is_available(&self) -> bool {
        self.store.is_some()
    }

    fn store(&self) -> Result<&Arc<dyn DocumentStore>, PersistenceError> {
        self.store.as_ref().ok_or(PersistenceError::StorageUnavailable)
    }

    /// Fetch the stored document, `None` if nothing was ever saved.
    pub async fn load(&self) -> Result<Option<StoredVisibilitySettings>, PersistenceError> {
        let store = self.store()?;

        let Some(value) = store
            .get(&self.document_path)
            .await
            .map_err(read_error)?
        else {
            debug!(path = %self.document_path, "No stored role visibility");
            return Ok(None);
        };

        let settings: StoredVisibilitySettings = serde_json::from_value(value)
            .map_err(|e| PersistenceError::Read(StorageError::Json(e)))?;
        debug!(
            path = %self.document_path,
            roles = settings.role_settings.roles().count(),
            "Loaded role visibility"
        );
        Ok(Some(settings))
    }

    /// Replace the stored document with `matrix`, stamped with the time and
    /// `actor`.
    pub async fn save(
        &self,
        matrix: &VisibilityMatrix,
        actor: &str,
    ) -> Result<StoredVisibilitySettings, PersistenceError> {
        let store = self.store()?;

        let settings = StoredVisibilitySettings {
            role_settings: matrix.clone(),
            updated_at: Some(Utc::now()),
            updated_by: Some(actor.to_string()),
        };
        let value = serde_json::to_value(&settings)
            .map_err(|e| PersistenceError::Write(StorageError::Json(e)))?;

        store
            .set(&self.document_path, value, SetOptions::replace())
            .await
            .map_err(write_error)?;

        info!(path = %self.document_path, actor = %actor, "Saved role visibility");
        Ok(settings)
    }
}

impl fmt::Debug for VisibilityRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityRepository")
            .field("available", &self.is_available())
            .field("document_path", &self.document_path)
            .finish()
    }
}

fn read_error(e: StorageError) -> PersistenceError {
    if e.is_unavailable() {
        PersistenceError::StorageUnavailable
    } else {
        PersistenceError::Read(e)
    }
}

fn write_error(e: StorageError) -> PersistenceError {
    if e.is_unavailable() {
        PersistenceError::StorageUnavailable
    } else {
        PersistenceError::Write(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_matrix;
    use crate::test_support::small_catalog;
    use portal_storage::MemoryDocumentStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn memory_repo() -> (Arc<MemoryDocumentStore>, VisibilityRepository) {
        let store = Arc::new(MemoryDocumentStore::new());
        let repo = VisibilityRepository::new(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_load_absent_document() {
        let (_, repo) = memory_repo();
        assert!(repo.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_writes_document_shape() {
        let (store, repo) = memory_repo();
        let matrix = default_matrix(small_catalog());

        let saved = repo.save(&matrix, "ops@example.com").await.unwrap();
        assert_eq!(saved.updated_by.as_deref(), Some("ops@example.com"));

        let doc = store.get(VISIBILITY_DOCUMENT).await.unwrap().unwrap();
        assert_eq!(
            doc["roleSettings"],
            json!({
                "superadmin": {"command-center": true, "platform-settings": true},
                "viewer": {"command-center": true, "platform-settings": false},
            })
        );
        assert_eq!(doc["updatedBy"], json!("ops@example.com"));
        assert!(doc["updatedAt"].is_string());

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_save_replaces_whole_document() {
        let (store, repo) = memory_repo();
        store
            .set(
                VISIBILITY_DOCUMENT,
                json!({"roleSettings": {"retired": {"x": true}}, "legacy": 1}),
                SetOptions::replace(),
            )
            .await
            .unwrap();

        repo.save(&VisibilityMatrix::new(), "ops@example.com")
            .await
            .unwrap();

        let doc = store.get(VISIBILITY_DOCUMENT).await.unwrap().unwrap();
        assert!(doc.get("legacy").is_none());
        assert_eq!(doc["roleSettings"], json!({}));
    }

    #[tokio::test]
    async fn test_load_tolerates_missing_metadata() {
        let (store, repo) = memory_repo();
        store
            .set(
                VISIBILITY_DOCUMENT,
                json!({"roleSettings": {"viewer": {"command-center": true}}}),
                SetOptions::replace(),
            )
            .await
            .unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert!(loaded.updated_at.is_none());
        assert!(loaded.role_settings.is_feature_visible("viewer", "command-center"));
    }

    #[tokio::test]
    async fn test_malformed_document_is_read_error() {
        let (store, repo) = memory_repo();
        store
            .set(
                VISIBILITY_DOCUMENT,
                json!({"roleSettings": {"viewer": {"command-center": "yes"}}}),
                SetOptions::replace(),
            )
            .await
            .unwrap();

        assert!(matches!(
            repo.load().await,
            Err(PersistenceError::Read(StorageError::Json(_)))
        ));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let repo = VisibilityRepository::unavailable();
        assert!(!repo.is_available());
        assert!(matches!(
            repo.load().await,
            Err(PersistenceError::StorageUnavailable)
        ));
        assert!(matches!(
            repo.save(&VisibilityMatrix::new(), "ops@example.com").await,
            Err(PersistenceError::StorageUnavailable)
        ));
    }
}
