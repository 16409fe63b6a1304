//! Role-based feature visibility for the Portal.
//!
//! Decides which navigation entries each role can see:
//!
//! - [`catalog`] / [`builtin`] - the fixed feature catalog and role registry
//! - [`matrix`] - the role × feature table
//! - [`defaults`] / [`merge`] - default policy and load-time reconciliation
//! - [`editor`] - in-memory administrator edits with a dirty flag
//! - [`persistence`] / [`session`] - whole-document load and save
//! - [`navigation`] - lookups for rendering menus

pub mod builtin;
pub mod catalog;
pub mod defaults;
pub mod editor;
pub mod error;
pub mod matrix;
pub mod merge;
pub mod navigation;
pub mod persistence;
pub mod session;

#[cfg(test)]
mod test_support;

pub use catalog::{Catalog, DefaultAccess, Feature, FeatureCategory, Role};
pub use defaults::{default_matrix, default_role_visibility};
pub use editor::{CategoryScope, CategoryState, MatrixEditor};
pub use error::{CatalogError, PersistenceError, SessionError};
pub use matrix::{RoleVisibility, VisibilityMatrix};
pub use merge::{MergeOutcome, merge_with_defaults};
pub use navigation::{FeatureGate, NavigationContext};
pub use persistence::{StoredVisibilitySettings, VISIBILITY_DOCUMENT, VisibilityRepository};
pub use session::{LoadSource, VisibilitySession};
