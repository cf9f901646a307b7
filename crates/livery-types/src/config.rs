//! Tool configuration loaded from `livery.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{LiveryError, Result};

/// Optional user configuration, read from `$XDG_CONFIG_HOME/livery/livery.toml`.
///
/// Every field defaults to empty and a missing file is not an error, so a
/// fresh install runs without any configuration at all.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LiveryConfig {
    /// Prepended to the theme search roots, highest precedence first.
    pub extra_theme_dirs: Vec<PathBuf>,
    /// Prepended to the icon search roots.
    pub extra_icon_dirs: Vec<PathBuf>,
    /// Prepended to the style-definition roots.
    pub extra_style_dirs: Vec<PathBuf>,
    /// Extra theme names to hide from listings, matched case-insensitively.
    pub extra_blacklist: Vec<String>,
}

impl LiveryConfig {
    /// Default on-disk location (`~/.config/livery/livery.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("livery").join("livery.toml"))
    }

    /// Load from `path`. A missing file yields the default configuration; a
    /// malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config file at {} -- using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|err| LiveryError::Config(format!("{}: {err}", path.display())))
    }

    /// Load from the default location, or defaults when no config directory
    /// can be determined.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}
