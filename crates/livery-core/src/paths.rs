//! Search-root computation.
//!
//! Theme packages are looked up across a precedence-ordered list of roots:
//! the user's home directories first, then each system data directory. The
//! same ordering drives the override semantics everywhere else, so this is
//! the only place the lists are assembled.

use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use livery_types::config::LiveryConfig;

/// Fallback for an unset `XDG_DATA_DIRS`.
const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// The precedence-ordered directory lists everything else searches.
///
/// Earlier entries shadow later ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoots {
    /// Roots holding GTK and shell themes (`<root>/<name>/...`).
    pub themes: Vec<PathBuf>,
    /// Roots holding icon and cursor themes.
    pub icons: Vec<PathBuf>,
    /// Roots holding `.styles` preset files.
    pub styles: Vec<PathBuf>,
    /// The user-writable icon roots. These receive the cursor inheritance
    /// link and are never extended by configuration.
    pub user_icons: Vec<PathBuf>,
}

impl SearchRoots {
    /// Compute the roots from the process environment and `config`.
    pub fn from_env(config: &LiveryConfig) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        let (data_home, system) = normalize_xdg(
            &home,
            env::var_os("XDG_DATA_HOME"),
            env::var_os("XDG_DATA_DIRS"),
        );
        Self::compute(&home, &data_home, &system, config)
    }

    /// Pure constructor; `from_env` feeds it and tests call it directly.
    pub fn compute(
        home: &Path,
        data_home: &Path,
        system_data_dirs: &[PathBuf],
        config: &LiveryConfig,
    ) -> Self {
        let user_icons = vec![home.join(".icons"), data_home.join("icons")];

        let mut themes = config.extra_theme_dirs.clone();
        themes.push(home.join(".themes"));
        themes.push(data_home.join("themes"));
        themes.extend(system_data_dirs.iter().map(|d| d.join("themes")));

        let mut icons = config.extra_icon_dirs.clone();
        icons.extend(user_icons.iter().cloned());
        icons.extend(system_data_dirs.iter().map(|d| d.join("icons")));

        let mut styles = config.extra_style_dirs.clone();
        styles.push(data_home.join("livery/styles.d"));
        styles.extend(system_data_dirs.iter().map(|d| d.join("livery/styles.d")));

        Self {
            themes: dedup_keep_first(themes),
            icons: dedup_keep_first(icons),
            styles: dedup_keep_first(styles),
            user_icons,
        }
    }
}

/// Resolve raw `XDG_DATA_HOME`/`XDG_DATA_DIRS` values against `home`.
/// Relative entries are ignored; unset or empty variables fall back to the
/// defaults.
fn normalize_xdg(
    home: &Path,
    data_home: Option<OsString>,
    data_dirs: Option<OsString>,
) -> (PathBuf, Vec<PathBuf>) {
    let data_home = data_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
        .unwrap_or_else(|| home.join(".local/share"));
    let data_dirs = data_dirs
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| OsString::from(DEFAULT_DATA_DIRS));
    let system = env::split_paths(&data_dirs)
        .filter(|p| p.is_absolute())
        .collect();
    (data_home, system)
}

/// Drop repeated directories, keeping the earliest occurrence.
fn dedup_keep_first(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    dirs.into_iter().filter(|d| seen.insert(d.clone())).collect()
}
