//! The document store abstraction.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, StorageError};

/// Options for [`DocumentStore::set`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Shallow-merge the top-level fields into the existing document instead
    /// of replacing it.
    pub merge: bool,
}

impl SetOptions {
    /// Whole-document replace.
    pub fn replace() -> Self {
        Self { merge: false }
    }

    /// Shallow top-level merge.
    pub fn merge() -> Self {
        Self { merge: true }
    }
}

/// A key-value document store with whole-document reads and writes.
///
/// Paths are slash-separated segments, e.g. `settings/roleVisibility`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document, `None` if it does not exist.
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// Write a document.
    async fn set(&self, path: &str, data: Value, options: SetOptions) -> Result<()>;
}

/// Apply `incoming` on top of `existing` according to `options`.
///
/// Merging overwrites top-level fields only; nested objects are replaced
/// wholesale.
pub fn apply_write(
    path: &str,
    existing: Option<Value>,
    incoming: Value,
    options: SetOptions,
) -> Result<Value> {
    if !options.merge {
        return Ok(incoming);
    }

    let Some(existing) = existing else {
        return Ok(incoming);
    };

    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(fields)) => {
            for (key, value) in fields {
                base.insert(key, value);
            }
            Ok(Value::Object(base))
        }
        _ => Err(StorageError::NotAnObject(path.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_replace_ignores_existing() {
        let out = apply_write(
            "doc",
            Some(json!({"a": 1, "b": 2})),
            json!({"c": 3}),
            SetOptions::replace(),
        )
        .unwrap();
        assert_eq!(out, json!({"c": 3}));
    }

    #[test]
    fn test_merge_is_shallow() {
        let out = apply_write(
            "doc",
            Some(json!({"a": 1, "nested": {"x": true, "y": true}})),
            json!({"nested": {"x": false}}),
            SetOptions::merge(),
        )
        .unwrap();
        assert_eq!(out, json!({"a": 1, "nested": {"x": false}}));
    }

    #[test]
    fn test_merge_into_missing_document() {
        let out = apply_write("doc", None, json!({"a": 1}), SetOptions::merge()).unwrap();
        assert_eq!(out, json!({"a": 1}));
    }

    #[test]
    fn test_merge_into_scalar_fails() {
        let err = apply_write("doc", Some(json!(7)), json!({"a": 1}), SetOptions::merge());
        assert!(matches!(err, Err(StorageError::NotAnObject(p)) if p == "doc"));
    }
}
