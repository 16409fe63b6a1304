//! Reconcile a stored matrix with the current catalog.

use tracing::debug;

use crate::catalog::Catalog;
use crate::defaults::default_role_visibility;
use crate::matrix::{RoleVisibility, VisibilityMatrix};

/// Result of [`merge_with_defaults`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Complete matrix for the current catalog.
    pub matrix: VisibilityMatrix,
    /// Pairs that had no stored value and took the default.
    pub filled: usize,
    /// Stored entries dropped because their role or feature left the catalog.
    pub pruned: usize,
}

/// Overlay stored values onto the catalog defaults.
///
/// A stored value always wins, even when the default for that pair has
/// changed since it was saved. Pairs with no stored value, including every
/// pair of a role that was never saved, take the default.
pub fn merge_with_defaults(stored: &VisibilityMatrix, catalog: &Catalog) -> MergeOutcome {
    let mut matrix = VisibilityMatrix::new();
    let mut filled = 0;

    for role in catalog.roles() {
        let saved = stored.role(role.id);
        let merged: RoleVisibility = default_role_visibility(catalog, role)
            .into_iter()
            .map(|(feature_id, default)| {
                match saved.and_then(|s| s.get(&feature_id)).copied() {
                    Some(value) => (feature_id, value),
                    None => {
                        filled += 1;
                        (feature_id, default)
                    }
                }
            })
            .collect();
        matrix.replace_role(role.id, merged);
    }

    let pruned: usize = stored
        .roles()
        .map(|(role_id, saved)| match catalog.role(role_id) {
            Some(_) => saved
                .keys()
                .filter(|feature_id| catalog.feature(feature_id).is_none())
                .count(),
            None => saved.len(),
        })
        .sum();

    debug!(filled, pruned, "Merged stored role visibility with defaults");

    MergeOutcome {
        matrix,
        filled,
        pruned,
    }
}
