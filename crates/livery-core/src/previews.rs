//! Preview-asset resolution: theme thumbnails and sample icons.
//!
//! Pure path lookup; nothing here decodes an image. Icon themes are the slow
//! case (finding a representative icon means walking the theme's declared
//! directories), so the chosen sample is memoized in a small flat-file cache.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use livery_types::error::Result;
use livery_types::kinds::ThemeKind;

use crate::paths::SearchRoots;
use crate::walk::FoundTheme;

/// Shipped asset directory on a real install.
pub const SHIPPED_DATA_DIR: &str = "/usr/share/livery";

/// Default user cache file for icon samples (`~/.cache/livery/icons`).
pub fn default_icon_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("livery").join("icons"))
}

// ---------------------------------------------------------------------------
// Thumbnails
// ---------------------------------------------------------------------------

/// Locates thumbnails for the non-icon categories.
pub struct Previews {
    data_dir: PathBuf,
}

impl Previews {
    pub fn new() -> Self {
        Self::with_data_dir(PathBuf::from(SHIPPED_DATA_DIR))
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve a thumbnail for `theme`, probing in order: the theme's own
    /// `thumbnail.png`, the shipped per-theme thumbnail, the category's
    /// `unknown.png`. `None` when nothing exists, and always `None` for the
    /// icon category, which uses [`IconSampleCache`] instead.
    pub fn thumbnail(&self, kind: ThemeKind, theme: &FoundTheme) -> Option<PathBuf> {
        let subdir = match kind {
            ThemeKind::Gtk => "gtk-3.0",
            ThemeKind::Shell => "cinnamon",
            ThemeKind::Cursors => "cursors",
            ThemeKind::Icons => return None,
        };
        let own = theme.path().join(subdir).join("thumbnail.png");
        if own.is_file() {
            return Some(own);
        }
        let shipped_dir = self.data_dir.join("thumbnails").join(kind.label());
        let shipped = shipped_dir.join(format!("{}.png", theme.name));
        if shipped.is_file() {
            return Some(shipped);
        }
        let unknown = shipped_dir.join("unknown.png");
        unknown.is_file().then_some(unknown)
    }

    /// The sample-cache seed shipped alongside the thumbnails.
    pub fn icon_seed(&self) -> PathBuf {
        self.data_dir.join("icons.seed")
    }
}

impl Default for Previews {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Icon sample cache
// ---------------------------------------------------------------------------

/// Memoizes the sample icon chosen for each icon theme.
///
/// One line per entry, `theme-name:relative/path`. Paths are stored relative
/// to their containing icon root so the cache stays valid when a theme is
/// found under a different root later. Unparsable lines are ignored.
pub struct IconSampleCache {
    path: PathBuf,
    entries: HashMap<String, String>,
    dirty: bool,
}

impl IconSampleCache {
    /// Load from `path`, falling back to the `seed` file while no user cache
    /// exists yet. Writes always go to `path`.
    pub fn load(path: PathBuf, seed: &Path) -> Self {
        let source = if path.exists() { path.as_path() } else { seed };
        let mut entries = HashMap::new();
        if let Ok(text) = fs::read_to_string(source) {
            for line in text.lines() {
                if let Some((name, rel)) = line.split_once(':') {
                    entries.insert(name.to_string(), rel.to_string());
                }
            }
        }
        Self {
            path,
            entries,
            dirty: false,
        }
    }

    /// The sample icon for the theme `name`, discovering and recording it on
    /// a cache miss. Call [`IconSampleCache::save`] afterwards to persist any
    /// discoveries.
    pub fn sample(&mut self, roots: &SearchRoots, name: &str) -> Option<PathBuf> {
        if let Some(rel) = self.entries.get(name)
            && let Some(path) = resolve_relative(roots, rel)
        {
            return Some(path);
        }
        let (root, rel) = discover_sample(roots, name)?;
        let path = root.join(&rel);
        self.entries.insert(name.to_string(), rel);
        self.dirty = true;
        Some(path)
    }

    /// Write the cache back when any lookup missed.
    pub fn save(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut lines: Vec<String> = self
            .entries
            .iter()
            .map(|(name, rel)| format!("{name}:{rel}"))
            .collect();
        lines.sort();
        fs::write(&self.path, lines.join("\n") + "\n")?;
        self.dirty = false;
        log::debug!("icon sample cache written to {}", self.path.display());
        Ok(())
    }
}

/// Join `rel` onto each icon root until a file exists; user roots first.
fn resolve_relative(roots: &SearchRoots, rel: &str) -> Option<PathBuf> {
    roots.icons.iter().map(|r| r.join(rel)).find(|p| p.is_file())
}

/// Pick a `folder` icon from the theme's own `index.theme` directory list.
fn discover_sample(roots: &SearchRoots, name: &str) -> Option<(PathBuf, String)> {
    for root in &roots.icons {
        let theme_dir = root.join(name);
        let Ok(bytes) = fs::read(theme_dir.join("index.theme")) else {
            continue;
        };
        let text = String::from_utf8_lossy(&bytes);
        let Some(listed) = text.lines().find_map(|l| l.strip_prefix("Directories=")) else {
            continue;
        };
        for sub in listed.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            for file in ["folder.svg", "folder.png"] {
                let candidate = theme_dir.join(sub).join(file);
                if candidate.is_file() {
                    return Some((root.clone(), format!("{name}/{sub}/{file}")));
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ThemeTree;

    fn found(root: &Path, name: &str) -> FoundTheme {
        FoundTheme {
            name: name.into(),
            root: root.to_path_buf(),
        }
    }

    #[test]
    fn own_thumbnail_wins() {
        let tree = ThemeTree::new();
        tree.gtk_theme(&tree.user_themes, "Mint-Y");
        let own = tree.user_themes.join("Mint-Y/gtk-3.0/thumbnail.png");
        fs::write(&own, "png").unwrap();
        let previews = Previews::with_data_dir(tree.styles_dir.clone());
        let hit = previews.thumbnail(ThemeKind::Gtk, &found(&tree.user_themes, "Mint-Y"));
        assert_eq!(hit, Some(own));
    }

    #[test]
    fn shipped_thumbnail_then_unknown() {
        let tree = ThemeTree::new();
        tree.cursor_theme(&tree.user_icons, "Bibata");
        let data = tree.styles_dir.join("data");
        let dir = data.join("thumbnails/cursors");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Bibata.png"), "png").unwrap();
        fs::write(dir.join("unknown.png"), "png").unwrap();
        let previews = Previews::with_data_dir(data);

        let named = previews.thumbnail(ThemeKind::Cursors, &found(&tree.user_icons, "Bibata"));
        assert_eq!(named.unwrap(), dir.join("Bibata.png"));

        let other = previews.thumbnail(ThemeKind::Cursors, &found(&tree.user_icons, "Other"));
        assert_eq!(other.unwrap(), dir.join("unknown.png"));
    }

    #[test]
    fn nothing_found_is_none() {
        let tree = ThemeTree::new();
        let previews = Previews::with_data_dir(tree.styles_dir.join("empty"));
        assert!(
            previews
                .thumbnail(ThemeKind::Shell, &found(&tree.user_themes, "X"))
                .is_none()
        );
    }

    #[test]
    fn icon_category_has_no_thumbnail() {
        let tree = ThemeTree::new();
        tree.icon_theme(&tree.user_icons, "Papirus");
        let previews = Previews::with_data_dir(tree.styles_dir.clone());
        assert!(
            previews
                .thumbnail(ThemeKind::Icons, &found(&tree.user_icons, "Papirus"))
                .is_none()
        );
    }

    // ---- icon sample cache ----

    fn add_folder_icon(tree: &ThemeTree, name: &str) -> PathBuf {
        tree.icon_theme(&tree.user_icons, name);
        let icon = tree.user_icons.join(name).join("48x48/places/folder.svg");
        fs::write(&icon, "<svg/>").unwrap();
        icon
    }

    #[test]
    fn miss_discovers_and_records_sample() {
        let tree = ThemeTree::new();
        let icon = add_folder_icon(&tree, "Papirus");
        let roots = tree.roots();
        let cache_path = tree.styles_dir.join("cache/icons");
        let mut cache = IconSampleCache::load(cache_path.clone(), Path::new("/nonexistent"));

        assert_eq!(cache.sample(&roots, "Papirus"), Some(icon));
        cache.save().unwrap();
        let text = fs::read_to_string(&cache_path).unwrap();
        assert_eq!(text, "Papirus:Papirus/48x48/places/folder.svg\n");
    }

    #[test]
    fn hit_resolves_against_roots_without_rescan() {
        let tree = ThemeTree::new();
        let icon = add_folder_icon(&tree, "Papirus");
        let roots = tree.roots();
        let cache_path = tree.styles_dir.join("icons");
        fs::write(&cache_path, "Papirus:Papirus/48x48/places/folder.svg\n").unwrap();
        let mut cache = IconSampleCache::load(cache_path.clone(), Path::new("/nonexistent"));

        assert_eq!(cache.sample(&roots, "Papirus"), Some(icon));
        // No discovery happened, so nothing to write.
        cache.save().unwrap();
        assert_eq!(
            fs::read_to_string(&cache_path).unwrap(),
            "Papirus:Papirus/48x48/places/folder.svg\n"
        );
    }

    #[test]
    fn seed_used_until_user_cache_exists() {
        let tree = ThemeTree::new();
        let icon = add_folder_icon(&tree, "Papirus");
        let roots = tree.roots();
        let seed = tree.styles_dir.join("icons.seed");
        fs::write(&seed, "Papirus:Papirus/48x48/places/folder.svg\n").unwrap();
        let user_cache = tree.styles_dir.join("cache/icons");
        let mut cache = IconSampleCache::load(user_cache.clone(), &seed);

        assert_eq!(cache.sample(&roots, "Papirus"), Some(icon));
        assert!(!user_cache.exists());
    }

    #[test]
    fn stale_entry_rediscovered() {
        let tree = ThemeTree::new();
        let icon = add_folder_icon(&tree, "Papirus");
        let roots = tree.roots();
        let cache_path = tree.styles_dir.join("icons");
        fs::write(&cache_path, "Papirus:Papirus/gone/folder.svg\n").unwrap();
        let mut cache = IconSampleCache::load(cache_path.clone(), Path::new("/nonexistent"));

        assert_eq!(cache.sample(&roots, "Papirus"), Some(icon));
        cache.save().unwrap();
        assert!(
            fs::read_to_string(&cache_path)
                .unwrap()
                .contains("Papirus:Papirus/48x48/places/folder.svg")
        );
    }

    #[test]
    fn unparsable_lines_ignored() {
        let tree = ThemeTree::new();
        let cache_path = tree.styles_dir.join("icons");
        fs::write(&cache_path, "garbage line without separator\nA:a/b.svg\n").unwrap();
        let cache = IconSampleCache::load(cache_path, Path::new("/nonexistent"));
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn unknown_theme_yields_none() {
        let tree = ThemeTree::new();
        let roots = tree.roots();
        let mut cache =
            IconSampleCache::load(tree.styles_dir.join("icons"), Path::new("/nonexistent"));
        assert_eq!(cache.sample(&roots, "Nope"), None);
        cache.save().unwrap();
        assert!(!tree.styles_dir.join("icons").exists());
    }

    #[test]
    fn later_directory_entries_tried() {
        let tree = ThemeTree::new();
        let d = tree.user_icons.join("Multi");
        fs::create_dir_all(d.join("16x16/apps")).unwrap();
        fs::create_dir_all(d.join("48x48/places")).unwrap();
        fs::write(
            d.join("index.theme"),
            "[Icon Theme]\nName=Multi\nDirectories=16x16/apps,48x48/places\n",
        )
        .unwrap();
        fs::write(d.join("48x48/places/folder.png"), "png").unwrap();
        let roots = tree.roots();
        let mut cache =
            IconSampleCache::load(tree.styles_dir.join("icons"), Path::new("/nonexistent"));
        let hit = cache.sample(&roots, "Multi").unwrap();
        assert_eq!(hit, d.join("48x48/places/folder.png"));
    }
}
