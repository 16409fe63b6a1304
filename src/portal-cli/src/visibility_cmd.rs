//! `portal visibility` - view and edit the role visibility matrix.
//!
//! Every mutating subcommand is one edit session: load (merged with the
//! catalog defaults), apply the edit, save as the configured actor.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, warn};

use portal_storage::{FileDocumentStore, PortalPaths};
use portal_visibility::{
    Catalog, CategoryScope, CategoryState, FeatureCategory, LoadSource, MatrixEditor,
    VisibilityRepository, VisibilitySession,
};

use crate::config::PortalConfig;

/// Visibility CLI command.
#[derive(Debug, Parser)]
pub struct VisibilityCli {
    #[command(subcommand)]
    pub subcommand: VisibilitySubcommand,
}

#[derive(Debug, clap::Subcommand)]
pub enum VisibilitySubcommand {
    /// Show the matrix for one or all roles
    Show(ShowArgs),

    /// Print whether a role can see a feature
    Check(CheckArgs),

    /// Flip one feature for one role
    Toggle(ToggleArgs),

    /// Turn a whole category (or all features) on or off for a role
    SetCategory(SetCategoryArgs),

    /// Copy one role's settings onto another
    Copy(CopyArgs),

    /// Restore defaults for one role or every role
    Reset(ResetArgs),
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Only this role
    #[arg(long, short)]
    pub role: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    pub role: String,
    pub feature: String,
}

/// Flags shared by mutating subcommands.
#[derive(Debug, Clone, Copy, Parser)]
pub struct EditArgs {
    /// Apply the edit and print the result without saving
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Parser)]
pub struct ToggleArgs {
    pub role: String,
    pub feature: String,

    #[command(flatten)]
    pub edit: EditArgs,
}

#[derive(Debug, Parser)]
pub struct SetCategoryArgs {
    pub role: String,

    /// Category name, or `all`
    pub scope: CategoryScope,

    /// `on` or `off`
    #[arg(value_parser = parse_switch, action = clap::ArgAction::Set)]
    pub value: bool,

    #[command(flatten)]
    pub edit: EditArgs,
}

#[derive(Debug, Parser)]
pub struct CopyArgs {
    pub source: String,
    pub target: String,

    #[command(flatten)]
    pub edit: EditArgs,
}

#[derive(Debug, Parser)]
pub struct ResetArgs {
    /// Role to reset
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub role: Option<String>,

    /// Reset every role
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub edit: EditArgs,
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(format!("expected `on` or `off`, got `{s}`")),
    }
}

impl VisibilityCli {
    pub async fn run(self, config: &PortalConfig) -> Result<()> {
        let catalog = *Catalog::builtin();
        let repository = open_repository(config).await;
        let mut session = VisibilitySession::open(catalog, repository).await;

        if let LoadSource::Defaults { reason } = session.source() {
            eprintln!("warning: showing default visibility ({reason})");
        }

        match self.subcommand {
            VisibilitySubcommand::Show(args) => run_show(&session, args),
            VisibilitySubcommand::Check(args) => run_check(&session, args),
            VisibilitySubcommand::Toggle(args) => {
                let visible = session
                    .editor_mut()
                    .toggle_feature(&args.role, &args.feature)?;
                println!(
                    "{} is now {} for {}",
                    args.feature,
                    visibility_word(visible),
                    args.role
                );
                commit(&mut session, config, args.edit).await
            }
            VisibilitySubcommand::SetCategory(args) => {
                let count =
                    session
                        .editor_mut()
                        .toggle_category(&args.role, args.scope, args.value)?;
                println!(
                    "{} feature(s) in {} are now {} for {}",
                    count,
                    args.scope,
                    visibility_word(args.value),
                    args.role
                );
                commit(&mut session, config, args.edit).await
            }
            VisibilitySubcommand::Copy(args) => {
                session.editor_mut().copy_role(&args.source, &args.target)?;
                println!("Copied {} settings to {}", args.source, args.target);
                commit(&mut session, config, args.edit).await
            }
            VisibilitySubcommand::Reset(args) => {
                match &args.role {
                    Some(role) if !args.all => {
                        session.editor_mut().reset_role(role)?;
                        println!("Reset {role} to defaults");
                    }
                    _ => {
                        session.editor_mut().reset_all();
                        println!("Reset all roles to defaults");
                    }
                }
                commit(&mut session, config, args.edit).await
            }
        }
    }
}

/// Build the repository; a store that cannot be set up is reported as
/// unavailable rather than failing the command.
async fn open_repository(config: &PortalConfig) -> VisibilityRepository {
    let paths = match &config.data_dir {
        Some(dir) => Ok(PortalPaths::from_root(dir.clone())),
        None => PortalPaths::new(),
    };

    let store = match paths {
        Ok(paths) => FileDocumentStore::with_paths(paths),
        Err(e) => {
            warn!(error = %e, "Could not determine storage location");
            return VisibilityRepository::unavailable();
        }
    };

    if let Err(e) = store.init().await {
        warn!(error = %e, "Could not initialize document storage");
        return VisibilityRepository::unavailable();
    }
    debug!(data_dir = %store.paths().data_dir.display(), "Using document storage");

    let repository = VisibilityRepository::new(Arc::new(store));
    match &config.document_path {
        Some(path) => repository.with_document_path(path.clone()),
        None => repository,
    }
}

async fn commit(session: &mut VisibilitySession, config: &PortalConfig, edit: EditArgs) -> Result<()> {
    if edit.dry_run {
        println!("Dry run: changes not saved");
        return Ok(());
    }
    if let LoadSource::Defaults { reason } = session.source() {
        bail!(
            "Stored visibility could not be loaded ({reason}); refusing to overwrite it. \
             Nothing was saved."
        );
    }
    if !session.can_save() {
        return Ok(());
    }

    let actor = config
        .actor
        .as_deref()
        .context("No actor configured; pass --actor, set PORTAL_ACTOR, or set `actor` in config.toml")?;

    match session.save(actor).await {
        Ok(stored) => {
            debug!(updated_by = ?stored.updated_by, "Visibility saved");
            println!("Saved");
            Ok(())
        }
        Err(e) => bail!("{e}. Nothing was saved; re-run the command to retry."),
    }
}

fn run_show(session: &VisibilitySession, args: ShowArgs) -> Result<()> {
    let editor = session.editor();
    let matrix = editor.matrix();

    if let Some(role) = &args.role {
        editor.catalog().require_role(role)?;
    }

    if args.json {
        let json = match &args.role {
            Some(role) => serde_json::to_string_pretty(&matrix.role(role))?,
            None => serde_json::to_string_pretty(matrix)?,
        };
        println!("{json}");
        return Ok(());
    }

    match &args.role {
        Some(role) => print_role(editor, role)?,
        None => print_table(editor),
    }

    if let LoadSource::Stored {
        updated_at,
        updated_by,
    } = session.source()
    {
        let at = updated_at.map(|t| t.to_rfc3339()).unwrap_or_else(|| "unknown".to_string());
        let by = updated_by.as_deref().unwrap_or("unknown");
        println!("\nLast updated {at} by {by}");
    }
    Ok(())
}

fn print_role(editor: &MatrixEditor, role: &str) -> Result<()> {
    let catalog = editor.catalog();
    let matrix = editor.matrix();

    for category in FeatureCategory::ALL {
        let state = editor.category_state(role, category.into())?;
        let mark = match state {
            CategoryState::Enabled => "[x]",
            CategoryState::Disabled => "[ ]",
            CategoryState::Mixed => "[-]",
        };
        println!("{mark} {}", category.label());
        for feature in catalog.features_in(category) {
            let on = if matrix.is_feature_visible(role, feature.id) { "x" } else { " " };
            println!("    [{on}] {:<20} {}", feature.id, feature.name);
        }
    }
    println!(
        "\n{} of {} features visible",
        matrix.enabled_count(role),
        catalog.features().len()
    );
    Ok(())
}

fn print_table(editor: &MatrixEditor) {
    let catalog = editor.catalog();
    let matrix = editor.matrix();

    print!("{:<20}", "feature");
    for role in catalog.roles() {
        print!(" {:>10}", role.id);
    }
    println!();

    for feature in catalog.features() {
        print!("{:<20}", feature.id);
        for role in catalog.roles() {
            let cell = if matrix.is_feature_visible(role.id, feature.id) { "yes" } else { "-" };
            print!(" {cell:>10}");
        }
        println!();
    }
}

fn run_check(session: &VisibilitySession, args: CheckArgs) -> Result<()> {
    let catalog = session.editor().catalog();
    catalog.require_role(&args.role)?;
    catalog.require_feature(&args.feature)?;

    let visible = session
        .editor()
        .matrix()
        .is_feature_visible(&args.role, &args.feature);
    println!("{}", visibility_word(visible));
    Ok(())
}

fn visibility_word(visible: bool) -> &'static str {
    if visible { "visible" } else { "hidden" }
}
