//! Argument parsing and subcommand dispatch.

use anyhow::Result;
use clap::{Parser, Subcommand};

use livery_types::kinds::{Mode, ThemeKind};

use crate::commands::{self, Context};

#[derive(Debug, Parser)]
#[command(
    name = "livery",
    about = "Query installed desktop themes and apply style presets",
    version
)]
pub struct Cli {
    /// Route writes to an in-memory copy of the settings store and print
    /// what would change.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List installed themes, per category.
    List {
        /// Restrict to one category (gtk, icons, cursors, shell).
        kind: Option<ThemeKind>,

        /// Show the root directory each theme was found under.
        #[arg(long)]
        paths: bool,

        /// Show preview assets (thumbnails; sample icons for icon themes).
        #[arg(long)]
        previews: bool,

        /// Emit JSON instead of the human listing.
        #[arg(long)]
        json: bool,
    },

    /// Show the configured selection and the style it matches, if any.
    Status {
        /// Emit JSON instead of the human listing.
        #[arg(long)]
        json: bool,
    },

    /// List the indexed style presets with their modes and variants.
    Styles,

    /// Write one theme name.
    Set {
        /// Category to write (gtk, icons, cursors, shell).
        kind: ThemeKind,

        /// Theme name.
        name: String,

        /// Write the name even when no installed theme carries it.
        #[arg(long)]
        force: bool,
    },

    /// Apply a style preset.
    Apply {
        /// Style name, as listed by `livery styles`.
        style: String,

        /// Mode to apply (mixed, dark, light); the style default when omitted.
        #[arg(long)]
        mode: Option<Mode>,

        /// Variant to apply; chosen per the active selection when omitted.
        #[arg(long)]
        variant: Option<String>,
    },

    /// Switch the active style to another mode.
    Mode {
        /// Target mode (mixed, dark, light).
        mode: Mode,
    },
}

pub fn run_from_env() -> Result<()> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<()> {
    let mut ctx = Context::load(cli.dry_run)?;
    match cli.command {
        Commands::List {
            kind,
            paths,
            previews,
            json,
        } => commands::list(&ctx, kind, paths, previews, json),
        Commands::Status { json } => commands::status(&ctx, json),
        Commands::Styles => commands::styles(&ctx),
        Commands::Set { kind, name, force } => commands::set(&mut ctx, kind, &name, force),
        Commands::Apply {
            style,
            mode,
            variant,
        } => commands::apply(&mut ctx, &style, mode, variant.as_deref()),
        Commands::Mode { mode } => commands::mode(&mut ctx, mode),
    }
}
