//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use super::store::{DocumentStore, SetOptions, apply_write};
use crate::error::Result;
use crate::paths::split_document_path;

/// Document store kept entirely in process memory.
///
/// Useful for tests and dry runs; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        split_document_path(path)?;
        Ok(self.documents.read().await.get(path).cloned())
    }

    async fn set(&self, path: &str, data: Value, options: SetOptions) -> Result<()> {
        split_document_path(path)?;
        let mut documents = self.documents.write().await;
        let value = apply_write(path, documents.get(path).cloned(), data, options)?;
        documents.insert(path.to_string(), value);
        debug!(path = %path, merge = options.merge, "Document written");
        Ok(())
    }
}
