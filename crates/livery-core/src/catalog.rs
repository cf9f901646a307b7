//! Theme discovery for the four categories.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use livery_types::kinds::ThemeKind;

use crate::paths::SearchRoots;
use crate::walk::{FoundTheme, walk_themes};

/// Shell theme name that is always available even without a directory on
/// disk: the shell falls back to its built-in look when the key names it.
pub const BUILTIN_SHELL_THEME: &str = "cinnamon";

/// Themes shipped by toolkits and distributions that are hidden from
/// listings. Matched case-insensitively; does not apply to shell themes.
const BLACKLIST: [&str; 14] = [
    "gnome",
    "hicolor",
    "adwaita",
    "adwaita-dark",
    "adwaitalegacy",
    "highcontrast",
    "epapirus",
    "epapirus-dark",
    "ubuntu-mono",
    "ubuntu-mono-dark",
    "ubuntu-mono-light",
    "loginicons",
    "humanity",
    "humanity-dark",
];

// ---------------------------------------------------------------------------
// Category predicates
// ---------------------------------------------------------------------------

/// A GTK theme: some `gtk-3.*` subdirectory holds a `gtk.css`.
fn has_gtk3_css(dir: &Path) -> bool {
    let Ok(entries) = fs::read_dir(dir) else {
        return false;
    };
    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with("gtk-3.") && entry.path().join("gtk.css").is_file() {
            return true;
        }
    }
    false
}

/// A shell theme: a `cinnamon` subdirectory exists.
fn has_shell_dir(dir: &Path) -> bool {
    dir.join("cinnamon").is_dir()
}

/// A cursor theme: a `cursors` subdirectory exists.
fn has_cursor_dir(dir: &Path) -> bool {
    dir.join("cursors").is_dir()
}

/// An icon theme: `index.theme` declares at least one icon directory.
fn has_icon_index(dir: &Path) -> bool {
    let Ok(bytes) = fs::read(dir.join("index.theme")) else {
        return false;
    };
    String::from_utf8_lossy(&bytes)
        .lines()
        .any(|line| line.starts_with("Directories="))
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Everything installed, per category, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    gtk: Vec<FoundTheme>,
    icons: Vec<FoundTheme>,
    cursors: Vec<FoundTheme>,
    shell: Vec<FoundTheme>,
}

impl Catalog {
    /// Scan all roots and build the catalog.
    pub fn scan(roots: &SearchRoots, extra_blacklist: &[String]) -> Self {
        let blacklist: HashSet<String> = BLACKLIST
            .iter()
            .map(|s| s.to_string())
            .chain(extra_blacklist.iter().map(|s| s.to_lowercase()))
            .collect();
        let listed = |path: &Path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| !blacklist.contains(&n.to_lowercase()))
        };

        let catalog = Self {
            gtk: walk_themes(&roots.themes, |p| listed(p) && has_gtk3_css(p)),
            icons: walk_themes(&roots.icons, |p| listed(p) && has_icon_index(p)),
            cursors: walk_themes(&roots.icons, |p| listed(p) && has_cursor_dir(p)),
            // Shell themes are never blacklisted.
            shell: walk_themes(&roots.themes, has_shell_dir),
        };
        log::info!(
            "catalog: {} gtk, {} icon, {} cursor, {} shell themes",
            catalog.gtk.len(),
            catalog.icons.len(),
            catalog.cursors.len(),
            catalog.shell.len(),
        );
        catalog
    }

    /// Installed themes for one category, sorted for listing.
    pub fn themes(&self, kind: ThemeKind) -> &[FoundTheme] {
        match kind {
            ThemeKind::Gtk => &self.gtk,
            ThemeKind::Icons => &self.icons,
            ThemeKind::Cursors => &self.cursors,
            ThemeKind::Shell => &self.shell,
        }
    }

    /// Whether `name` is installed for `kind`. The built-in shell name
    /// counts as installed even when no directory exists.
    pub fn contains(&self, kind: ThemeKind, name: &str) -> bool {
        if kind == ThemeKind::Shell && name == BUILTIN_SHELL_THEME {
            return true;
        }
        self.themes(kind).iter().any(|t| t.name == name)
    }
}
