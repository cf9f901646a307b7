//! Cursor inheritance link maintenance.
//!
//! Legacy X11 applications resolve the cursor theme through
//! `~/.icons/default/index.theme` instead of the settings store. Whenever the
//! cursor theme changes, a one-line `Inherits` link is rewritten under each
//! user icon root so both lookup paths agree.

use std::fs;
use std::path::{Path, PathBuf};

use livery_types::error::Result;

/// Rewrite `<root>/default/index.theme` to inherit `theme_name`.
///
/// Missing directories are created. An existing file (or symlink left behind
/// by a theme package) is removed before the new one is written.
pub fn write_link(root: &Path, theme_name: &str) -> Result<()> {
    let dir = root.join("default");
    fs::create_dir_all(&dir)?;
    let path = dir.join("index.theme");
    if path.symlink_metadata().is_ok() {
        fs::remove_file(&path)?;
    }
    fs::write(&path, format!("[icon theme]\nInherits={theme_name}\n"))?;
    log::debug!("cursor link {} -> {theme_name}", path.display());
    Ok(())
}

/// Rewrite the link under every root.
pub fn write_links(roots: &[PathBuf], theme_name: &str) -> Result<()> {
    for root in roots {
        write_link(root, theme_name)?;
    }
    Ok(())
}
