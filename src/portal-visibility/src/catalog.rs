//! Feature and role definitions.
//!
//! Both tables are fixed at build time. Only the visibility matrix that
//! references them changes at runtime.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builtin::{BUILTIN_FEATURES, BUILTIN_ROLES};
use crate::error::CatalogError;

/// Navigation group a feature belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureCategory {
    /// Home and always-on entries.
    Main,
    /// Day-to-day business work.
    Work,
    /// AI-assisted tooling.
    Ai,
    /// Platform administration.
    Admin,
    /// EOS/Traction initiatives.
    Initiatives,
}

impl FeatureCategory {
    /// All categories, in navigation order.
    pub const ALL: [FeatureCategory; 5] = [
        Self::Main,
        Self::Work,
        Self::Ai,
        Self::Admin,
        Self::Initiatives,
    ];

    /// Identifier used in stored documents and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Work => "work",
            Self::Ai => "ai",
            Self::Admin => "admin",
            Self::Initiatives => "initiatives",
        }
    }

    /// Human-readable section label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Work => "Work",
            Self::Ai => "AI Tools",
            Self::Admin => "Administration",
            Self::Initiatives => "Initiatives",
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeatureCategory {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// A gateable portal capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feature {
    /// Feature ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// Navigation group.
    pub category: FeatureCategory,
    /// Whether the tenant needs a paid subscription to use it.
    pub requires_subscription: bool,
}

impl Feature {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        category: FeatureCategory,
    ) -> Self {
        Self {
            id,
            name,
            description,
            category,
            requires_subscription: false,
        }
    }

    pub const fn requires_subscription(self) -> Self {
        Self {
            requires_subscription: true,
            ..self
        }
    }
}

/// How a role's visibility is seeded before any administrator edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DefaultAccess {
    /// Every feature.
    All,
    /// Every feature except the listed ids.
    AllExcept { excluded: &'static [&'static str] },
    /// Every feature outside `category`, plus the listed ids inside it.
    AllOutsideCategory {
        category: FeatureCategory,
        except: &'static [&'static str],
    },
    /// Only features in the listed categories, minus the listed ids.
    Categories {
        categories: &'static [FeatureCategory],
        excluded: &'static [&'static str],
    },
    /// The home feature plus the listed categories.
    HomeAndCategories {
        home: &'static str,
        categories: &'static [FeatureCategory],
    },
}

impl DefaultAccess {
    /// Whether the policy grants `feature` by default.
    pub fn allows(&self, feature: &Feature) -> bool {
        match *self {
            Self::All => true,
            Self::AllExcept { excluded } => !excluded.contains(&feature.id),
            Self::AllOutsideCategory { category, except } => {
                feature.category != category || except.contains(&feature.id)
            }
            Self::Categories {
                categories,
                excluded,
            } => categories.contains(&feature.category) && !excluded.contains(&feature.id),
            Self::HomeAndCategories { home, categories } => {
                feature.id == home || categories.contains(&feature.category)
            }
        }
    }

    /// Feature ids the policy names explicitly.
    fn referenced_ids(&self) -> Vec<&'static str> {
        match *self {
            Self::All => Vec::new(),
            Self::AllExcept { excluded } => excluded.to_vec(),
            Self::AllOutsideCategory { except, .. } => except.to_vec(),
            Self::Categories { excluded, .. } => excluded.to_vec(),
            Self::HomeAndCategories { home, .. } => vec![home],
        }
    }
}

/// A user role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Role {
    /// Role ID.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// Default visibility policy.
    pub default_access: DefaultAccess,
}

impl Role {
    pub const fn new(
        id: &'static str,
        name: &'static str,
        description: &'static str,
        default_access: DefaultAccess,
    ) -> Self {
        Self {
            id,
            name,
            description,
            default_access,
        }
    }
}

/// The feature catalog paired with the role registry.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    features: &'static [Feature],
    roles: &'static [Role],
}

static BUILTIN_CATALOG: Catalog = Catalog::new(BUILTIN_FEATURES, BUILTIN_ROLES);

impl Catalog {
    pub const fn new(features: &'static [Feature], roles: &'static [Role]) -> Self {
        Self { features, roles }
    }

    /// The catalog compiled into the portal.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN_CATALOG
    }

    /// All features, in navigation order.
    pub fn features(&self) -> &'static [Feature] {
        self.features
    }

    /// All roles, most privileged first.
    pub fn roles(&self) -> &'static [Role] {
        self.roles
    }

    pub fn feature(&self, id: &str) -> Option<&'static Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    pub fn role(&self, id: &str) -> Option<&'static Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Look up a feature, failing on unknown ids.
    pub fn require_feature(&self, id: &str) -> Result<&'static Feature, CatalogError> {
        self.feature(id)
            .ok_or_else(|| CatalogError::UnknownFeature(id.to_string()))
    }

    /// Look up a role, failing on unknown ids.
    pub fn require_role(&self, id: &str) -> Result<&'static Role, CatalogError> {
        self.role(id)
            .ok_or_else(|| CatalogError::UnknownRole(id.to_string()))
    }

    /// Features in one category, in navigation order.
    pub fn features_in(&self, category: FeatureCategory) -> impl Iterator<Item = &'static Feature> {
        self.features.iter().filter(move |f| f.category == category)
    }

    /// Check ids are unique and every policy refers to known features.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut feature_ids = HashSet::new();
        for feature in self.features {
            if !feature_ids.insert(feature.id) {
                return Err(CatalogError::DuplicateFeature(feature.id.to_string()));
            }
        }

        let mut role_ids = HashSet::new();
        for role in self.roles {
            if !role_ids.insert(role.id) {
                return Err(CatalogError::DuplicateRole(role.id.to_string()));
            }
            for id in role.default_access.referenced_ids() {
                if !feature_ids.contains(id) {
                    return Err(CatalogError::UnknownPolicyFeature {
                        role: role.id.to_string(),
                        feature: id.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
