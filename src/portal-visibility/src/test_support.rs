//! Small catalog shared by unit tests.

use crate::catalog::{Catalog, DefaultAccess, Feature, FeatureCategory, Role};

const FEATURES: &[Feature] = &[
    Feature::new(
        "command-center",
        "Command Center",
        "Home",
        FeatureCategory::Main,
    ),
    Feature::new(
        "platform-settings",
        "Platform Settings",
        "Global configuration",
        FeatureCategory::Admin,
    ),
];

const ROLES: &[Role] = &[
    Role::new("superadmin", "Super Admin", "", DefaultAccess::All),
    Role::new(
        "viewer",
        "Viewer",
        "",
        DefaultAccess::HomeAndCategories {
            home: "command-center",
            categories: &[FeatureCategory::Main],
        },
    ),
];

pub(crate) static SMALL_CATALOG: Catalog = Catalog::new(FEATURES, ROLES);

pub(crate) fn small_catalog() -> &'static Catalog {
    &SMALL_CATALOG
}
