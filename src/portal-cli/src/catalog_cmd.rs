//! `portal catalog` - list features and roles.

use anyhow::Result;
use clap::Parser;

use portal_visibility::{Catalog, FeatureCategory};

/// Catalog CLI command.
#[derive(Debug, Parser)]
pub struct CatalogCli {
    #[command(subcommand)]
    pub subcommand: CatalogSubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum CatalogSubcommand {
    /// List gateable features
    #[command(visible_alias = "ls")]
    Features(FeaturesArgs),

    /// List roles and their default access policy
    Roles(RolesArgs),
}

#[derive(Debug, Parser)]
pub struct FeaturesArgs {
    /// Only features in this category
    #[arg(long)]
    pub category: Option<FeatureCategory>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct RolesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl CatalogCli {
    pub fn run(self) -> Result<()> {
        let catalog = Catalog::builtin();
        match self.subcommand {
            CatalogSubcommand::Features(args) => run_features(catalog, args),
            CatalogSubcommand::Roles(args) => run_roles(catalog, args),
        }
    }
}

fn run_features(catalog: &Catalog, args: FeaturesArgs) -> Result<()> {
    let features: Vec<_> = catalog
        .features()
        .iter()
        .filter(|f| args.category.is_none_or(|c| f.category == c))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&features)?);
        return Ok(());
    }

    for category in FeatureCategory::ALL {
        let section: Vec<_> = features.iter().filter(|f| f.category == category).collect();
        if section.is_empty() {
            continue;
        }
        println!("{}", category.label());
        for feature in section {
            let marker = if feature.requires_subscription { " *" } else { "" };
            println!("  {:<20} {}{}", feature.id, feature.name, marker);
        }
    }
    if features.iter().any(|f| f.requires_subscription) {
        println!("\n* requires subscription");
    }
    Ok(())
}

fn run_roles(catalog: &Catalog, args: RolesArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(catalog.roles())?);
        return Ok(());
    }

    for role in catalog.roles() {
        println!("  {:<12} {:<12} {}", role.id, role.name, role.description);
    }
    Ok(())
}
