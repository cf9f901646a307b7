//! Theme categories, style modes, and the raw selection snapshot.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LiveryError;

/// The four theme categories livery manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    /// Application (GTK) themes.
    Gtk,
    /// Icon themes.
    Icons,
    /// Mouse cursor themes.
    Cursors,
    /// Desktop shell themes.
    Shell,
}

impl ThemeKind {
    /// All categories, in display order.
    pub const ALL: [ThemeKind; 4] = [
        ThemeKind::Gtk,
        ThemeKind::Icons,
        ThemeKind::Cursors,
        ThemeKind::Shell,
    ];

    /// Lowercase name used on the command line and in JSON output.
    pub fn label(self) -> &'static str {
        match self {
            ThemeKind::Gtk => "gtk",
            ThemeKind::Icons => "icons",
            ThemeKind::Cursors => "cursors",
            ThemeKind::Shell => "shell",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ThemeKind {
    type Err = LiveryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gtk" => Ok(ThemeKind::Gtk),
            "icons" => Ok(ThemeKind::Icons),
            "cursors" => Ok(ThemeKind::Cursors),
            "shell" => Ok(ThemeKind::Shell),
            other => Err(LiveryError::Theme(format!(
                "unknown theme category '{other}' (expected gtk, icons, cursors or shell)"
            ))),
        }
    }
}

/// A style mode. Every mode carries its own set of color variants, and
/// applying one also sets the desktop-wide color-scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Mixed,
    Dark,
    Light,
}

impl Mode {
    /// All modes, in definition order. Style files list variants under these
    /// keys, and the first populated mode becomes a style's fallback default.
    pub const ALL: [Mode; 3] = [Mode::Mixed, Mode::Dark, Mode::Light];

    /// Lowercase name used in style files and on the command line.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Mixed => "mixed",
            Mode::Dark => "dark",
            Mode::Light => "light",
        }
    }

    /// The `color-scheme` preference value written alongside this mode.
    pub fn color_scheme(self) -> &'static str {
        match self {
            Mode::Mixed => "default",
            Mode::Dark => "prefer-dark",
            Mode::Light => "prefer-light",
        }
    }

    /// Map a stored `color-scheme` value back to its mode, if recognized.
    pub fn from_color_scheme(nick: &str) -> Option<Mode> {
        match nick {
            "default" => Some(Mode::Mixed),
            "prefer-dark" => Some(Mode::Dark),
            "prefer-light" => Some(Mode::Light),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = LiveryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "mixed" => Ok(Mode::Mixed),
            "dark" => Ok(Mode::Dark),
            "light" => Ok(Mode::Light),
            other => Err(LiveryError::Style(format!(
                "unknown mode '{other}' (expected mixed, dark or light)"
            ))),
        }
    }
}

/// The four theme names currently configured in the settings store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub gtk: String,
    pub icons: String,
    pub cursors: String,
    pub shell: String,
}

impl Selection {
    /// The configured name for one category.
    pub fn get(&self, kind: ThemeKind) -> &str {
        match kind {
            ThemeKind::Gtk => &self.gtk,
            ThemeKind::Icons => &self.icons,
            ThemeKind::Cursors => &self.cursors,
            ThemeKind::Shell => &self.shell,
        }
    }

    /// Replace the name for one category.
    pub fn set(&mut self, kind: ThemeKind, name: impl Into<String>) {
        let name = name.into();
        match kind {
            ThemeKind::Gtk => self.gtk = name,
            ThemeKind::Icons => self.icons = name,
            ThemeKind::Cursors => self.cursors = name,
            ThemeKind::Shell => self.shell = name,
        }
    }
}
