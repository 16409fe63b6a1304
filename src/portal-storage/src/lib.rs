//! Portal Storage - document persistence for the Portal.
//!
//! A small key-value document store: whole-document reads, whole-document
//! replace writes, and an optional shallow-merge write mode.
//!
//! # Usage
//!
//! ```rust,no_run
//! use portal_storage::{DocumentStore, FileDocumentStore, SetOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> portal_storage::Result<()> {
//!     let store = FileDocumentStore::new()?;
//!     store.init().await?;
//!
//!     store
//!         .set("settings/example", json!({"enabled": true}), SetOptions::replace())
//!         .await?;
//!     let doc = store.get("settings/example").await?;
//!     println!("{:?}", doc);
//!
//!     Ok(())
//! }
//! ```

pub mod documents;
pub mod error;
pub mod paths;

// Re-export main types at crate root
pub use documents::{DocumentStore, FileDocumentStore, MemoryDocumentStore, SetOptions};
pub use error::{Result, StorageError};
pub use paths::{PortalPaths, portal_config_dir, portal_data_dir};
