//! Directory walker shared by every theme category.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One discovered theme directory: its name and the root it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundTheme {
    pub name: String,
    pub root: PathBuf,
}

impl FoundTheme {
    /// Full path to the theme directory.
    pub fn path(&self) -> PathBuf {
        self.root.join(&self.name)
    }
}

/// Walk `roots` in precedence order and collect the child directories that
/// `accept` approves of.
///
/// The first root contributing a name claims it; the same name under a later
/// root is ignored, which is what lets a user copy of a theme shadow the
/// system one. Missing or unreadable roots are skipped. The result is sorted
/// by name, case-insensitively.
pub fn walk_themes<F>(roots: &[PathBuf], accept: F) -> Vec<FoundTheme>
where
    F: Fn(&Path) -> bool,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut found: Vec<FoundTheme> = Vec::new();

    for root in roots {
        let Ok(entries) = fs::read_dir(root) else {
            continue;
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();

        for name in names {
            if seen.contains(&name) {
                log::debug!("'{name}' under {} shadowed by an earlier root", root.display());
                continue;
            }
            let path = root.join(&name);
            if !path.is_dir() || !accept(&path) {
                continue;
            }
            seen.insert(name.clone());
            found.push(FoundTheme {
                name,
                root: root.clone(),
            });
        }
    }

    found.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    found
}
