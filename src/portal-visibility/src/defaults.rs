//! Default visibility, computed from each role's policy.

use crate::catalog::{Catalog, Role};
use crate::matrix::{RoleVisibility, VisibilityMatrix};

/// Build a complete matrix covering every (role, feature) pair.
pub fn default_matrix(catalog: &Catalog) -> VisibilityMatrix {
    catalog
        .roles()
        .iter()
        .map(|role| (role.id.to_string(), default_role_visibility(catalog, role)))
        .collect()
}

/// Default feature map for a single role.
pub fn default_role_visibility(catalog: &Catalog, role: &Role) -> RoleVisibility {
    catalog
        .features()
        .iter()
        .map(|feature| (feature.id.to_string(), role.default_access.allows(feature)))
        .collect()
}
