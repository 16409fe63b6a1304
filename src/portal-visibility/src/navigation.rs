//! Read-side lookups used when rendering navigation.

use crate::catalog::{Catalog, Feature, FeatureCategory};
use crate::matrix::VisibilityMatrix;

/// Tenant facts that affect what navigation shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationContext {
    /// Whether the tenant holds a paid subscription.
    pub has_subscription: bool,
}

/// Read-only view answering "can this role see this feature".
#[derive(Debug, Clone, Copy)]
pub struct FeatureGate<'a> {
    catalog: &'a Catalog,
    matrix: &'a VisibilityMatrix,
}

impl<'a> FeatureGate<'a> {
    pub fn new(catalog: &'a Catalog, matrix: &'a VisibilityMatrix) -> Self {
        Self { catalog, matrix }
    }

    /// Pure matrix lookup; missing entries are hidden.
    pub fn is_feature_visible(&self, role: &str, feature_id: &str) -> bool {
        self.matrix.is_feature_visible(role, feature_id)
    }

    /// Features the role can open, in navigation order.
    ///
    /// Subscription-only features are hidden from tenants without one
    /// regardless of the matrix.
    pub fn visible_features(&self, role: &str, context: NavigationContext) -> Vec<&'static Feature> {
        self.catalog
            .features()
            .iter()
            .filter(|f| self.is_feature_visible(role, f.id))
            .filter(|f| context.has_subscription || !f.requires_subscription)
            .collect()
    }

    /// [`visible_features`](Self::visible_features) grouped into menu
    /// sections. Empty sections are omitted.
    pub fn grouped_by_category(
        &self,
        role: &str,
        context: NavigationContext,
    ) -> Vec<(FeatureCategory, Vec<&'static Feature>)> {
        let visible = self.visible_features(role, context);
        FeatureCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let section: Vec<_> = visible
                    .iter()
                    .copied()
                    .filter(|f| f.category == category)
                    .collect();
                (!section.is_empty()).then_some((category, section))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{PARTNER, SUPERADMIN, VIEWER};
    use crate::defaults::default_matrix;

    fn ids(features: &[&Feature]) -> Vec<&'static str> {
        features.iter().map(|f| f.id).collect()
    }

    #[test]
    fn test_viewer_sees_main_only() {
        let catalog = Catalog::builtin();
        let matrix = default_matrix(catalog);
        let gate = FeatureGate::new(catalog, &matrix);

        let sections = gate.grouped_by_category(VIEWER, NavigationContext::default());
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, FeatureCategory::Main);
        assert_eq!(
            ids(&sections[0].1),
            vec!["command-center", "notifications", "calendar"]
        );
    }

    #[test]
    fn test_subscription_features_hidden_without_subscription() {
        let catalog = Catalog::builtin();
        let matrix = default_matrix(catalog);
        let gate = FeatureGate::new(catalog, &matrix);

        let without = gate.visible_features(SUPERADMIN, NavigationContext::default());
        assert!(without.iter().all(|f| !f.requires_subscription));
        assert!(gate.is_feature_visible(SUPERADMIN, "proposal-writer"));

        let with = gate.visible_features(
            SUPERADMIN,
            NavigationContext {
                has_subscription: true,
            },
        );
        assert_eq!(with.len(), catalog.features().len());
    }

    #[test]
    fn test_partner_sections() {
        let catalog = Catalog::builtin();
        let matrix = default_matrix(catalog);
        let gate = FeatureGate::new(catalog, &matrix);

        let sections: Vec<_> = gate
            .grouped_by_category(PARTNER, NavigationContext::default())
            .into_iter()
            .map(|(c, _)| c)
            .collect();
        assert_eq!(sections, vec![FeatureCategory::Main, FeatureCategory::Work]);
        assert!(!gate.is_feature_visible(PARTNER, "crm"));
    }
}
