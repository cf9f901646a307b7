//! The style/preset index.
//!
//! Styles are read from `.styles` JSON files in the style roots. Each style
//! groups up to three modes (mixed, dark, light), and each mode holds color
//! variants naming one theme per category. Variants referencing themes that
//! are not installed are dropped here, so consumers only ever see selections
//! that can actually be applied.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use livery_types::error::Result;
use livery_types::kinds::{Mode, Selection, ThemeKind};

use crate::catalog::Catalog;

// ---------------------------------------------------------------------------
// File format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StylesFile {
    styles: Vec<StyleDef>,
}

#[derive(Debug, Deserialize)]
struct StyleDef {
    name: String,
    /// Name of the default mode, overriding the first populated one.
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    mixed: Vec<VariantDef>,
    #[serde(default)]
    dark: Vec<VariantDef>,
    #[serde(default)]
    light: Vec<VariantDef>,
}

/// One variant as written in a `.styles` file. `themes` seeds all four
/// categories at once; the per-category keys override it.
#[derive(Debug, Deserialize)]
struct VariantDef {
    name: String,
    #[serde(default)]
    themes: Option<String>,
    #[serde(default)]
    gtk: Option<String>,
    #[serde(default)]
    icons: Option<String>,
    #[serde(rename = "cinnamon", default)]
    shell: Option<String>,
    #[serde(default)]
    cursor: Option<String>,
    color: String,
    #[serde(default)]
    color2: Option<String>,
    #[serde(default)]
    default: Flag,
}

/// Style files written by hand carry `"default": "true"`; accept a real
/// boolean as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s == "true",
        }
    }
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

// ---------------------------------------------------------------------------
// Index types
// ---------------------------------------------------------------------------

/// A validated variant: four installed theme names plus swatch colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: String,
    pub selection: Selection,
    /// Primary swatch color, as written in the style file.
    pub color: String,
    /// Secondary swatch color; defaults to `color`.
    pub color2: String,
}

/// One populated mode of a style.
#[derive(Debug, Clone, Serialize)]
pub struct StyleMode {
    pub mode: Mode,
    pub variants: Vec<Variant>,
    /// Index of the default variant within `variants`.
    default_index: usize,
}

impl StyleMode {
    /// The variant applied when none is named.
    pub fn default_variant(&self) -> &Variant {
        &self.variants[self.default_index]
    }

    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// A named style preset.
#[derive(Debug, Clone, Serialize)]
pub struct Style {
    pub name: String,
    pub default_mode: Mode,
    /// Populated modes only, in mixed/dark/light order.
    pub modes: Vec<StyleMode>,
}

impl Style {
    pub fn mode(&self, mode: Mode) -> Option<&StyleMode> {
        self.modes.iter().find(|m| m.mode == mode)
    }
}

/// Every style indexed from the style roots, sorted by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StyleIndex {
    pub styles: Vec<Style>,
}

impl StyleIndex {
    /// Read every `.styles` file under `roots`, in root precedence order and
    /// alphabetically within each root, validating against `catalog`.
    ///
    /// The first definition of a style name claims it; variants referencing
    /// missing themes and styles left with no valid variant are dropped with
    /// a logged reason.
    pub fn load(roots: &[PathBuf], catalog: &Catalog) -> Self {
        let mut styles: Vec<Style> = Vec::new();
        let mut claimed: HashSet<String> = HashSet::new();
        let mut file_count = 0usize;

        for root in roots {
            let Ok(entries) = fs::read_dir(root) else {
                continue;
            };
            let mut files: Vec<PathBuf> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "styles"))
                .collect();
            files.sort();

            for file in files {
                match read_styles_file(&file) {
                    Ok(parsed) => {
                        file_count += 1;
                        for def in parsed.styles {
                            if claimed.contains(&def.name) {
                                log::warn!(
                                    "style '{}' redefined in {} -- keeping the first definition",
                                    def.name,
                                    file.display()
                                );
                                continue;
                            }
                            if let Some(style) = build_style(def, catalog) {
                                claimed.insert(style.name.clone());
                                styles.push(style);
                            }
                        }
                    }
                    Err(err) => {
                        log::warn!("failed to parse {}: {err} -- skipping file", file.display());
                    }
                }
            }
        }

        styles.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        log::info!("indexed {} styles from {file_count} files", styles.len());
        Self { styles }
    }

    pub fn style(&self, name: &str) -> Option<&Style> {
        self.styles.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn read_styles_file(path: &Path) -> Result<StylesFile> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn build_style(def: StyleDef, catalog: &Catalog) -> Option<Style> {
    let StyleDef {
        name,
        default: declared_default,
        mixed,
        dark,
        light,
    } = def;

    let mut modes: Vec<StyleMode> = Vec::new();
    for (mode, defs) in [(Mode::Mixed, mixed), (Mode::Dark, dark), (Mode::Light, light)] {
        let mut variants: Vec<Variant> = Vec::new();
        let mut default_index: Option<usize> = None;
        for vdef in defs {
            let Some((variant, flagged)) = validate_variant(&name, mode, vdef, catalog) else {
                continue;
            };
            if flagged || default_index.is_none() {
                default_index = Some(variants.len());
            }
            variants.push(variant);
        }
        // A mode exists only once it holds a valid variant.
        if let Some(default_index) = default_index {
            modes.push(StyleMode {
                mode,
                variants,
                default_index,
            });
        }
    }

    if modes.is_empty() {
        log::warn!("style '{name}' has no valid variants -- dropping");
        return None;
    }

    let fallback = modes[0].mode;
    let default_mode = match declared_default {
        Some(declared) => match declared.parse::<Mode>() {
            Ok(mode) if modes.iter().any(|m| m.mode == mode) => mode,
            _ => {
                log::warn!(
                    "style '{name}': default mode '{declared}' not populated -- using {fallback}"
                );
                fallback
            }
        },
        None => fallback,
    };

    Some(Style {
        name,
        default_mode,
        modes,
    })
}

fn validate_variant(
    style: &str,
    mode: Mode,
    def: VariantDef,
    catalog: &Catalog,
) -> Option<(Variant, bool)> {
    let base = def.themes;
    let gtk = def.gtk.or_else(|| base.clone());
    let icons = def.icons.or_else(|| base.clone());
    let shell = def.shell.or_else(|| base.clone());
    let cursor = def.cursor.or(base);

    let name = def.name;
    let (Some(gtk), Some(icons), Some(shell), Some(cursor)) = (gtk, icons, shell, cursor) else {
        log::warn!("style '{style}' {mode}: variant '{name}' is missing a theme name -- dropping");
        return None;
    };
    let selection = Selection {
        gtk,
        icons,
        cursors: cursor,
        shell,
    };

    for kind in ThemeKind::ALL {
        let theme = selection.get(kind);
        if !catalog.contains(kind, theme) {
            log::warn!(
                "style '{style}' {mode}: variant '{name}' wants {kind} theme '{theme}' \
                 which is not installed -- dropping"
            );
            return None;
        }
    }

    let color2 = def.color2.unwrap_or_else(|| def.color.clone());
    let variant = Variant {
        name,
        selection,
        color: def.color,
        color2,
    };
    Some((variant, def.default.is_set()))
}
