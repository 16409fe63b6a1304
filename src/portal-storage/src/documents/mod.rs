//! Document storage - whole-document JSON persistence.
//!
//! - [`store`] - the `DocumentStore` trait and write semantics
//! - [`memory`] - in-process store
//! - [`file`] - filesystem-backed store

mod file;
mod memory;
mod store;
#[cfg(test)]
mod tests;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;
pub use store::{DocumentStore, SetOptions, apply_write};
