//! Shared test fixtures: on-disk theme trees.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::Catalog;
use crate::paths::SearchRoots;

/// A temporary data layout with a user and a system root pair, plus one
/// style-definition directory.
pub(crate) struct ThemeTree {
    _dir: tempfile::TempDir,
    pub user_themes: PathBuf,
    pub user_icons: PathBuf,
    pub system_themes: PathBuf,
    pub system_icons: PathBuf,
    pub styles_dir: PathBuf,
}

impl ThemeTree {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let tree = Self {
            user_themes: dir.path().join("user/themes"),
            user_icons: dir.path().join("user/icons"),
            system_themes: dir.path().join("system/themes"),
            system_icons: dir.path().join("system/icons"),
            styles_dir: dir.path().join("styles.d"),
            _dir: dir,
        };
        for d in [
            &tree.user_themes,
            &tree.user_icons,
            &tree.system_themes,
            &tree.system_icons,
            &tree.styles_dir,
        ] {
            fs::create_dir_all(d).unwrap();
        }
        tree
    }

    pub fn roots(&self) -> SearchRoots {
        SearchRoots {
            themes: vec![self.user_themes.clone(), self.system_themes.clone()],
            icons: vec![self.user_icons.clone(), self.system_icons.clone()],
            styles: vec![self.styles_dir.clone()],
            user_icons: vec![self.user_icons.clone()],
        }
    }

    pub fn gtk_theme(&self, root: &Path, name: &str) -> &Self {
        let d = root.join(name).join("gtk-3.0");
        fs::create_dir_all(&d).unwrap();
        fs::write(d.join("gtk.css"), "/* */").unwrap();
        self
    }

    pub fn shell_theme(&self, root: &Path, name: &str) -> &Self {
        fs::create_dir_all(root.join(name).join("cinnamon")).unwrap();
        self
    }

    pub fn icon_theme(&self, root: &Path, name: &str) -> &Self {
        let d = root.join(name);
        fs::create_dir_all(d.join("48x48/places")).unwrap();
        fs::write(
            d.join("index.theme"),
            format!("[Icon Theme]\nName={name}\nDirectories=48x48/places\n"),
        )
        .unwrap();
        self
    }

    pub fn cursor_theme(&self, root: &Path, name: &str) -> &Self {
        fs::create_dir_all(root.join(name).join("cursors")).unwrap();
        self
    }

    /// Install everything a style variant needs under the user roots, all
    /// sharing `name`.
    pub fn full_theme(&self, name: &str) -> &Self {
        self.gtk_theme(&self.user_themes, name)
            .shell_theme(&self.user_themes, name)
            .icon_theme(&self.user_icons, name)
            .cursor_theme(&self.user_icons, name)
    }

    pub fn style_file(&self, file_name: &str, json: &str) -> &Self {
        fs::write(self.styles_dir.join(file_name), json).unwrap();
        self
    }

    pub fn scan(&self) -> Catalog {
        Catalog::scan(&self.roots(), &[])
    }
}
