//! Builtin feature catalog and role registry.

use crate::catalog::{DefaultAccess, Feature, FeatureCategory, Role};

/// Landing page every role can reach.
pub const HOME_FEATURE: &str = "command-center";

/// Role ids.
pub const SUPERADMIN: &str = "superadmin";
pub const ADMIN: &str = "admin";
pub const STAFF: &str = "staff";
pub const PARTNER: &str = "partner";
pub const CLIENT: &str = "client";
pub const VIEWER: &str = "viewer";

/// Platform-wide controls withheld from tenant administrators.
const ADMIN_EXCLUDED: &[&str] = &["platform-settings", "tenant-management"];

/// The one admin-category feature staff see by default.
const STAFF_ADMIN_EXCEPTIONS: &[&str] = &["activity-log"];

/// Work features that expose pricing or customer data to outsiders.
const EXTERNAL_SENSITIVE: &[&str] = &["crm", "pricing-tools"];

const EXTERNAL_CATEGORIES: &[FeatureCategory] = &[FeatureCategory::Main, FeatureCategory::Work];

pub const BUILTIN_FEATURES: &[Feature] = &[
    // ============================================================
    // Main
    // ============================================================
    Feature::new(
        HOME_FEATURE,
        "Command Center",
        "Tenant dashboard with open work and alerts",
        FeatureCategory::Main,
    ),
    Feature::new(
        "notifications",
        "Notifications",
        "Inbox of mentions, approvals and reminders",
        FeatureCategory::Main,
    ),
    Feature::new(
        "calendar",
        "Calendar",
        "Deadlines, meetings and submission dates",
        FeatureCategory::Main,
    ),
    // ============================================================
    // Work
    // ============================================================
    Feature::new(
        "suppliers",
        "Supplier Qualification",
        "Track supplier certifications and qualification status",
        FeatureCategory::Work,
    ),
    Feature::new(
        "crm",
        "CRM",
        "Contacts, accounts and opportunities synced from the CRM",
        FeatureCategory::Work,
    ),
    Feature::new(
        "proposals",
        "Proposals",
        "Build and track proposals through the proposal wizard",
        FeatureCategory::Work,
    ),
    Feature::new(
        "contracts",
        "Contracts",
        "Awarded contracts and their deliverables",
        FeatureCategory::Work,
    ),
    Feature::new(
        "fpds-search",
        "FPDS Search",
        "Query federal procurement data with saved searches",
        FeatureCategory::Work,
    ),
    Feature::new(
        "pricing-tools",
        "Pricing Tools",
        "Labor rates and price-to-win worksheets",
        FeatureCategory::Work,
    ),
    Feature::new(
        "documents",
        "Documents",
        "Shared document library",
        FeatureCategory::Work,
    ),
    // ============================================================
    // AI
    // ============================================================
    Feature::new(
        "content-generator",
        "Content Generator",
        "Draft marketing and capability content",
        FeatureCategory::Ai,
    )
    .requires_subscription(),
    Feature::new(
        "proposal-writer",
        "Proposal Writer",
        "Generate proposal sections from solicitation text",
        FeatureCategory::Ai,
    )
    .requires_subscription(),
    Feature::new(
        "ai-assistant",
        "AI Assistant",
        "Chat assistant grounded in tenant data",
        FeatureCategory::Ai,
    ),
    // ============================================================
    // Admin
    // ============================================================
    Feature::new(
        "platform-settings",
        "Platform Settings",
        "Global configuration for the whole deployment",
        FeatureCategory::Admin,
    ),
    Feature::new(
        "user-management",
        "User Management",
        "Invite users and assign roles",
        FeatureCategory::Admin,
    ),
    Feature::new(
        "role-visibility",
        "Role Visibility",
        "Choose which features each role can see",
        FeatureCategory::Admin,
    ),
    Feature::new(
        "tenant-management",
        "Tenant Management",
        "Create and suspend tenants",
        FeatureCategory::Admin,
    ),
    Feature::new(
        "integrations",
        "Integrations",
        "CRM and email connector credentials",
        FeatureCategory::Admin,
    ),
    Feature::new(
        "activity-log",
        "Activity Log",
        "Recent changes made by members of the tenant",
        FeatureCategory::Admin,
    ),
    // ============================================================
    // Initiatives
    // ============================================================
    Feature::new(
        "eos-traction",
        "EOS Traction",
        "Vision/Traction Organizer",
        FeatureCategory::Initiatives,
    )
    .requires_subscription(),
    Feature::new(
        "rocks",
        "Rocks",
        "Quarterly priorities and their owners",
        FeatureCategory::Initiatives,
    ),
    Feature::new(
        "scorecard",
        "Scorecard",
        "Weekly measurables",
        FeatureCategory::Initiatives,
    ),
    Feature::new(
        "issues",
        "Issues",
        "Identify, discuss, solve",
        FeatureCategory::Initiatives,
    ),
    Feature::new(
        "level-10-meetings",
        "Level 10 Meetings",
        "Weekly leadership meeting agenda",
        FeatureCategory::Initiatives,
    )
    .requires_subscription(),
];

pub const BUILTIN_ROLES: &[Role] = &[
    Role::new(
        SUPERADMIN,
        "Super Admin",
        "Operates the platform across all tenants",
        DefaultAccess::All,
    ),
    Role::new(
        ADMIN,
        "Admin",
        "Administers a single tenant",
        DefaultAccess::AllExcept {
            excluded: ADMIN_EXCLUDED,
        },
    ),
    Role::new(
        STAFF,
        "Staff",
        "Internal team member",
        DefaultAccess::AllOutsideCategory {
            category: FeatureCategory::Admin,
            except: STAFF_ADMIN_EXCEPTIONS,
        },
    ),
    Role::new(
        PARTNER,
        "Partner",
        "Teaming partner with limited access",
        DefaultAccess::Categories {
            categories: EXTERNAL_CATEGORIES,
            excluded: EXTERNAL_SENSITIVE,
        },
    ),
    Role::new(
        CLIENT,
        "Client",
        "Customer reviewing shared work",
        DefaultAccess::Categories {
            categories: EXTERNAL_CATEGORIES,
            excluded: EXTERNAL_SENSITIVE,
        },
    ),
    Role::new(
        VIEWER,
        "Viewer",
        "Read-only access to the dashboard",
        DefaultAccess::HomeAndCategories {
            home: HOME_FEATURE,
            categories: &[FeatureCategory::Main],
        },
    ),
];
