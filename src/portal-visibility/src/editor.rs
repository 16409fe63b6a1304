//! In-memory edits to the visibility matrix.
//!
//! Every mutation is synchronous, validates its ids against the catalog
//! before touching the matrix, and marks the editor dirty.

use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, Feature, FeatureCategory};
use crate::defaults::{default_matrix, default_role_visibility};
use crate::error::CatalogError;
use crate::matrix::VisibilityMatrix;

/// Which features a category toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    /// Every feature in the catalog.
    All,
    /// Features in one category.
    Category(FeatureCategory),
}

impl CategoryScope {
    fn includes(&self, feature: &Feature) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => feature.category == *category,
        }
    }
}

impl From<FeatureCategory> for CategoryScope {
    fn from(category: FeatureCategory) -> Self {
        Self::Category(category)
    }
}

impl FromStr for CategoryScope {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Category)
        }
    }
}

impl fmt::Display for CategoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(category) => f.write_str(category.as_str()),
        }
    }
}

/// Aggregate state of a category for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryState {
    /// Every feature in scope is visible.
    Enabled,
    /// No feature in scope is visible (or the scope is empty).
    Disabled,
    /// Some but not all are visible.
    Mixed,
}

/// Editor over an in-memory matrix with a dirty flag.
#[derive(Debug, Clone)]
pub struct MatrixEditor {
    catalog: Catalog,
    matrix: VisibilityMatrix,
    dirty: bool,
}

impl MatrixEditor {
    /// Start a clean editor over `matrix`.
    pub fn new(catalog: Catalog, matrix: VisibilityMatrix) -> Self {
        Self {
            catalog,
            matrix,
            dirty: false,
        }
    }

    /// Start a clean editor over the catalog defaults.
    pub fn with_defaults(catalog: Catalog) -> Self {
        let matrix = default_matrix(&catalog);
        Self::new(catalog, matrix)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn matrix(&self) -> &VisibilityMatrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> VisibilityMatrix {
        self.matrix
    }

    /// Whether there are unsaved edits.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Flip one feature for one role. Returns the new value.
    pub fn toggle_feature(&mut self, role: &str, feature_id: &str) -> Result<bool, CatalogError> {
        self.catalog.require_role(role)?;
        self.catalog.require_feature(feature_id)?;

        let value = !self.matrix.is_feature_visible(role, feature_id);
        self.matrix.set(role, feature_id, value);
        self.dirty = true;
        Ok(value)
    }

    /// Set one feature for one role.
    pub fn set_feature(
        &mut self,
        role: &str,
        feature_id: &str,
        visible: bool,
    ) -> Result<(), CatalogError> {
        self.catalog.require_role(role)?;
        self.catalog.require_feature(feature_id)?;

        self.matrix.set(role, feature_id, visible);
        self.dirty = true;
        Ok(())
    }

    /// Set every feature in `scope` for `role` to `visible`.
    ///
    /// Returns the number of features in scope.
    pub fn toggle_category(
        &mut self,
        role: &str,
        scope: CategoryScope,
        visible: bool,
    ) -> Result<usize, CatalogError> {
        self.catalog.require_role(role)?;

        let mut count = 0;
        for feature in self.catalog.features().iter().filter(|f| scope.includes(f)) {
            self.matrix.set(role, feature.id, visible);
            count += 1;
        }
        self.dirty = true;
        Ok(count)
    }

    /// Replace `target`'s feature map with a copy of `source`'s.
    pub fn copy_role(&mut self, source: &str, target: &str) -> Result<(), CatalogError> {
        self.catalog.require_role(source)?;
        self.catalog.require_role(target)?;

        let copied = self.matrix.role(source).cloned().unwrap_or_default();
        self.matrix.replace_role(target, copied);
        self.dirty = true;
        Ok(())
    }

    /// Restore one role to its defaults.
    pub fn reset_role(&mut self, role: &str) -> Result<(), CatalogError> {
        let role = self.catalog.require_role(role)?;

        self.matrix
            .replace_role(role.id, default_role_visibility(&self.catalog, role));
        self.dirty = true;
        Ok(())
    }

    /// Restore every role to its defaults.
    pub fn reset_all(&mut self) {
        self.matrix = default_matrix(&self.catalog);
        self.dirty = true;
    }

    /// Whether the features in `scope` are all, none or partly visible.
    pub fn category_state(
        &self,
        role: &str,
        scope: CategoryScope,
    ) -> Result<CategoryState, CatalogError> {
        self.catalog.require_role(role)?;

        let (mut on, mut total) = (0usize, 0usize);
        for feature in self.catalog.features().iter().filter(|f| scope.includes(f)) {
            total += 1;
            if self.matrix.is_feature_visible(role, feature.id) {
                on += 1;
            }
        }

        Ok(match on {
            0 => CategoryState::Disabled,
            n if n == total => CategoryState::Enabled,
            _ => CategoryState::Mixed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{PARTNER, STAFF};
    use crate::test_support::small_catalog;
    use pretty_assertions::assert_eq;

    fn editor() -> MatrixEditor {
        MatrixEditor::with_defaults(*small_catalog())
    }

    #[test]
    fn test_starts_clean() {
        let editor = editor();
        assert!(!editor.is_dirty());
        assert_eq!(editor.matrix(), &default_matrix(small_catalog()));
    }

    #[test]
    fn test_toggle_feature_is_involution() {
        let mut editor = editor();
        let before = editor.matrix().clone();

        assert!(editor.toggle_feature("viewer", "platform-settings").unwrap());
        assert!(editor.is_dirty());
        assert!(!editor.toggle_feature("viewer", "platform-settings").unwrap());

        assert_eq!(editor.matrix(), &before);
    }

    #[test]
    fn test_toggle_category_admin() {
        let mut editor = editor();
        let count = editor
            .toggle_category("viewer", CategoryScope::Category(FeatureCategory::Admin), true)
            .unwrap();

        assert_eq!(count, 1);
        let viewer = editor.matrix().role("viewer").unwrap();
        assert_eq!(viewer.get("command-center"), Some(&true));
        assert_eq!(viewer.get("platform-settings"), Some(&true));
    }

    #[test]
    fn test_toggle_category_all_off() {
        let mut editor = editor();
        editor
            .toggle_category("superadmin", CategoryScope::All, false)
            .unwrap();

        assert_eq!(editor.matrix().enabled_count("superadmin"), 0);
        assert_eq!(
            editor.category_state("superadmin", CategoryScope::All).unwrap(),
            CategoryState::Disabled
        );
    }

    #[test]
    fn test_copy_role_is_independent() {
        let mut editor = editor();
        editor.copy_role("superadmin", "viewer").unwrap();

        assert_eq!(
            editor.matrix().role("viewer"),
            editor.matrix().role("superadmin")
        );

        editor.toggle_feature("viewer", "command-center").unwrap();
        assert!(!editor.matrix().is_feature_visible("viewer", "command-center"));
        assert!(editor.matrix().is_feature_visible("superadmin", "command-center"));
    }

    #[test]
    fn test_reset_role_only_touches_that_role() {
        let mut editor = editor();
        editor.toggle_feature("viewer", "platform-settings").unwrap();
        editor.toggle_feature("superadmin", "platform-settings").unwrap();

        editor.reset_role("viewer").unwrap();

        let defaults = default_matrix(small_catalog());
        assert_eq!(editor.matrix().role("viewer"), defaults.role("viewer"));
        assert!(!editor.matrix().is_feature_visible("superadmin", "platform-settings"));
    }

    #[test]
    fn test_reset_all_matches_defaults() {
        let mut editor = editor();
        editor.toggle_category("viewer", CategoryScope::All, true).unwrap();
        editor.mark_clean();

        editor.reset_all();

        assert!(editor.is_dirty());
        assert_eq!(editor.matrix(), &default_matrix(small_catalog()));
    }

    #[test]
    fn test_unknown_ids_rejected_without_mutation() {
        let mut editor = editor();

        assert!(matches!(
            editor.toggle_feature("intern", "command-center"),
            Err(CatalogError::UnknownRole(_))
        ));
        assert!(matches!(
            editor.toggle_feature("viewer", "payroll"),
            Err(CatalogError::UnknownFeature(_))
        ));
        assert!(matches!(
            editor.copy_role("viewer", "intern"),
            Err(CatalogError::UnknownRole(_))
        ));
        assert!(!editor.is_dirty());
        assert_eq!(editor.matrix(), &default_matrix(small_catalog()));
    }

    #[test]
    fn test_category_state_mixed() {
        let mut editor = MatrixEditor::with_defaults(*Catalog::builtin());
        assert_eq!(
            editor
                .category_state(STAFF, FeatureCategory::Admin.into())
                .unwrap(),
            CategoryState::Mixed
        );
        assert_eq!(
            editor
                .category_state(PARTNER, FeatureCategory::Ai.into())
                .unwrap(),
            CategoryState::Disabled
        );

        editor
            .toggle_category(STAFF, FeatureCategory::Admin.into(), true)
            .unwrap();
        assert_eq!(
            editor
                .category_state(STAFF, FeatureCategory::Admin.into())
                .unwrap(),
            CategoryState::Enabled
        );
    }

    #[test]
    fn test_scope_parse() {
        assert_eq!("all".parse::<CategoryScope>().unwrap(), CategoryScope::All);
        assert_eq!(
            "Admin".parse::<CategoryScope>().unwrap(),
            CategoryScope::Category(FeatureCategory::Admin)
        );
        assert!("nope".parse::<CategoryScope>().is_err());
    }
}
