//! Command-line front end for livery.
//!
//! Subcommands inspect the installed-theme catalog and the style index, and
//! write the appearance keys through `livery-settings`. `--dry-run` redirects
//! writes to an in-memory copy of the store and reports what would change.

mod cli;
mod commands;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    cli::run_from_env()
}
