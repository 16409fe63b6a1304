//! The role × feature visibility table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Feature id -> visible, for a single role.
pub type RoleVisibility = BTreeMap<String, bool>;

/// Role id -> feature id -> visible.
///
/// Serializes as a plain nested object, the `roleSettings` field of the
/// stored document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMatrix {
    roles: BTreeMap<String, RoleVisibility>,
}

impl VisibilityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `role` may see `feature_id`. Missing entries read as hidden.
    pub fn is_feature_visible(&self, role: &str, feature_id: &str) -> bool {
        self.get(role, feature_id).unwrap_or(false)
    }

    /// The stored value for a pair, if any.
    pub fn get(&self, role: &str, feature_id: &str) -> Option<bool> {
        self.roles.get(role)?.get(feature_id).copied()
    }

    pub fn set(&mut self, role: &str, feature_id: &str, visible: bool) {
        self.roles
            .entry(role.to_string())
            .or_default()
            .insert(feature_id.to_string(), visible);
    }

    pub fn role(&self, role: &str) -> Option<&RoleVisibility> {
        self.roles.get(role)
    }

    /// Replace a role's whole feature map.
    pub fn replace_role(&mut self, role: &str, visibility: RoleVisibility) {
        self.roles.insert(role.to_string(), visibility);
    }

    /// Iterate roles in id order.
    pub fn roles(&self) -> impl Iterator<Item = (&str, &RoleVisibility)> {
        self.roles.iter().map(|(id, v)| (id.as_str(), v))
    }

    /// Number of features visible to `role`.
    pub fn enabled_count(&self, role: &str) -> usize {
        self.roles
            .get(role)
            .map(|v| v.values().filter(|&&on| on).count())
            .unwrap_or(0)
    }

    /// Catalog pairs with no entry in this matrix.
    pub fn missing_pairs(&self, catalog: &Catalog) -> Vec<(&'static str, &'static str)> {
        catalog
            .roles()
            .iter()
            .flat_map(|role| {
                catalog
                    .features()
                    .iter()
                    .filter(move |feature| self.get(role.id, feature.id).is_none())
                    .map(move |feature| (role.id, feature.id))
            })
            .collect()
    }

    /// Whether every catalog (role, feature) pair has an entry.
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        self.missing_pairs(catalog).is_empty()
    }
}

impl FromIterator<(String, RoleVisibility)> for VisibilityMatrix {
    fn from_iter<I: IntoIterator<Item = (String, RoleVisibility)>>(iter: I) -> Self {
        Self {
            roles: iter.into_iter().collect(),
        }
    }
}
