//! Typed access to the desktop appearance keys.

use std::path::PathBuf;

use livery_types::error::Result;
use livery_types::kinds::{Mode, Selection, ThemeKind};

use crate::cursor_link;
use crate::store::SettingsStore;

/// Schema holding the GTK, icon and cursor theme keys.
pub const INTERFACE_SCHEMA: &str = "org.cinnamon.desktop.interface";
/// Schema holding the shell theme key.
pub const SHELL_SCHEMA: &str = "org.cinnamon.theme";
/// Schema holding the color-scheme preference.
pub const PORTAL_SCHEMA: &str = "org.x.apps.portal";

/// (schema, key) pair backing one theme category.
fn theme_key(kind: ThemeKind) -> (&'static str, &'static str) {
    match kind {
        ThemeKind::Gtk => (INTERFACE_SCHEMA, "gtk-theme"),
        ThemeKind::Icons => (INTERFACE_SCHEMA, "icon-theme"),
        ThemeKind::Cursors => (INTERFACE_SCHEMA, "cursor-theme"),
        ThemeKind::Shell => (SHELL_SCHEMA, "name"),
    }
}

/// Typed facade over a [`SettingsStore`] for the appearance keys.
pub struct DesktopSettings {
    store: Box<dyn SettingsStore>,
    /// Roots that receive the cursor inheritance link on cursor writes.
    /// Empty for dry runs.
    link_roots: Vec<PathBuf>,
}

impl DesktopSettings {
    pub fn new(store: Box<dyn SettingsStore>, link_roots: Vec<PathBuf>) -> Self {
        Self { store, link_roots }
    }

    /// The configured name for one category.
    pub fn theme(&self, kind: ThemeKind) -> Result<String> {
        let (schema, key) = theme_key(kind);
        self.store.get(schema, key)
    }

    /// Snapshot of the four configured theme names.
    pub fn selection(&self) -> Result<Selection> {
        Ok(Selection {
            gtk: self.theme(ThemeKind::Gtk)?,
            icons: self.theme(ThemeKind::Icons)?,
            cursors: self.theme(ThemeKind::Cursors)?,
            shell: self.theme(ThemeKind::Shell)?,
        })
    }

    /// Write the name for one category. Cursor writes also refresh the
    /// inheritance link under every configured link root.
    pub fn set_theme(&mut self, kind: ThemeKind, name: &str) -> Result<()> {
        let (schema, key) = theme_key(kind);
        self.store.set(schema, key, name)?;
        if kind == ThemeKind::Cursors {
            cursor_link::write_links(&self.link_roots, name)?;
        }
        Ok(())
    }

    /// The stored color-scheme preference, when it maps to a known mode.
    pub fn color_scheme(&self) -> Result<Option<Mode>> {
        let nick = self.store.get(PORTAL_SCHEMA, "color-scheme")?;
        Ok(Mode::from_color_scheme(&nick))
    }

    pub fn set_color_scheme(&mut self, mode: Mode) -> Result<()> {
        self.store.set(PORTAL_SCHEMA, "color-scheme", mode.color_scheme())
    }

    /// Apply a full selection: the four theme keys, then the color scheme.
    pub fn apply(&mut self, selection: &Selection, mode: Mode) -> Result<()> {
        for kind in ThemeKind::ALL {
            self.set_theme(kind, selection.get(kind))?;
        }
        self.set_color_scheme(mode)
    }
}
