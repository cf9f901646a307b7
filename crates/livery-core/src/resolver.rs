//! Matching the configured selection against the style index.

use livery_types::error::{LiveryError, Result};
use livery_types::kinds::{Mode, Selection};

use crate::styles::{Style, StyleIndex, StyleMode, Variant};

/// Where a selection falls within the index.
#[derive(Debug, Clone, Copy)]
pub struct ActiveStyle<'a> {
    pub style: &'a Style,
    pub mode: &'a StyleMode,
    pub variant: &'a Variant,
}

/// Find the (style, mode, variant) whose four theme names exactly equal
/// `selection`. `None` means the combination is custom. The first match in
/// index order is reported.
pub fn find_active<'a>(index: &'a StyleIndex, selection: &Selection) -> Option<ActiveStyle<'a>> {
    for style in &index.styles {
        for mode in &style.modes {
            for variant in &mode.variants {
                if variant.selection == *selection {
                    return Some(ActiveStyle {
                        style,
                        mode,
                        variant,
                    });
                }
            }
        }
    }
    None
}

/// The variant to apply within `mode`: one sharing the currently active
/// variant's name when there is one, so the accent choice survives mode
/// switches, otherwise the mode's default.
pub fn variant_for_mode<'a>(mode: &'a StyleMode, current: Option<&str>) -> &'a Variant {
    if let Some(current) = current
        && let Some(variant) = mode.variant(current)
    {
        return variant;
    }
    mode.default_variant()
}

/// Resolve what `apply` should write: the style by name, the requested mode
/// (the style's default when unspecified), and the variant per
/// [`variant_for_mode`] unless one is named explicitly.
pub fn plan_apply<'a>(
    index: &'a StyleIndex,
    selection: &Selection,
    style_name: &str,
    mode: Option<Mode>,
    variant_name: Option<&str>,
) -> Result<ActiveStyle<'a>> {
    let style = index
        .style(style_name)
        .ok_or_else(|| LiveryError::Style(format!("no such style '{style_name}'")))?;
    let mode = mode.unwrap_or(style.default_mode);
    let style_mode = style
        .mode(mode)
        .ok_or_else(|| LiveryError::Style(format!("style '{style_name}' has no {mode} mode")))?;

    let variant = match variant_name {
        Some(want) => style_mode.variant(want).ok_or_else(|| {
            LiveryError::Style(format!("style '{style_name}' {mode} has no variant '{want}'"))
        })?,
        None => {
            let current = find_active(index, selection).map(|a| a.variant.name.clone());
            variant_for_mode(style_mode, current.as_deref())
        }
    };

    Ok(ActiveStyle {
        style,
        mode: style_mode,
        variant,
    })
}

/// Resolve what `mode` should write: the active style switched to `mode`.
/// An error when the current selection matches no style.
pub fn plan_mode<'a>(
    index: &'a StyleIndex,
    selection: &Selection,
    mode: Mode,
) -> Result<ActiveStyle<'a>> {
    let active = find_active(index, selection).ok_or_else(|| {
        LiveryError::Style("current selection matches no style -- use apply instead".into())
    })?;
    let style_mode = active.style.mode(mode).ok_or_else(|| {
        LiveryError::Style(format!("style '{}' has no {mode} mode", active.style.name))
    })?;
    let variant = variant_for_mode(style_mode, Some(&active.variant.name));
    Ok(ActiveStyle {
        style: active.style,
        mode: style_mode,
        variant,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::StyleIndex;
    use crate::test_utils::ThemeTree;

    /// Index with one two-mode style ("Mint": mixed Green/Aqua, dark Green)
    /// and one single-mode style ("Solo": mixed Plain).
    fn fixture() -> (ThemeTree, StyleIndex) {
        let tree = ThemeTree::new();
        for name in ["Mint-Y", "Mint-Y-Aqua", "Mint-Y-Dark", "Solo-Theme"] {
            tree.full_theme(name);
        }
        tree.style_file(
            "mint.styles",
            r##"{"styles": [
                {"name": "Mint", "mixed": [
                    {"name": "Green", "themes": "Mint-Y", "color": "#8fa876"},
                    {"name": "Aqua", "themes": "Mint-Y-Aqua", "color": "#6cabcd"}
                ], "dark": [
                    {"name": "Green", "themes": "Mint-Y-Dark", "color": "#8fa876"}
                ]},
                {"name": "Solo", "mixed": [
                    {"name": "Plain", "themes": "Solo-Theme", "color": "#aaa"}
                ]}
            ]}"##,
        );
        let index = StyleIndex::load(&tree.roots().styles, &tree.scan());
        (tree, index)
    }

    fn selection_of(name: &str) -> Selection {
        Selection {
            gtk: name.into(),
            icons: name.into(),
            cursors: name.into(),
            shell: name.into(),
        }
    }

    #[test]
    fn exact_tuple_matches() {
        let (_tree, index) = fixture();
        let active = find_active(&index, &selection_of("Mint-Y-Aqua")).unwrap();
        assert_eq!(active.style.name, "Mint");
        assert_eq!(active.mode.mode, Mode::Mixed);
        assert_eq!(active.variant.name, "Aqua");
    }

    #[test]
    fn one_differing_name_is_custom() {
        let (_tree, index) = fixture();
        let mut selection = selection_of("Mint-Y");
        selection.cursors = "Bibata".into();
        assert!(find_active(&index, &selection).is_none());
    }

    #[test]
    fn first_style_in_index_order_wins_shared_tuple() {
        let tree = ThemeTree::new();
        tree.full_theme("Mint-Y");
        // Beta is written first but the index sorts by name, so Alpha is
        // reported for the tuple both styles carry.
        tree.style_file(
            "both.styles",
            r##"{"styles": [
                {"name": "Beta", "mixed": [{"name": "B", "themes": "Mint-Y", "color": "#1"}]},
                {"name": "Alpha", "mixed": [{"name": "A", "themes": "Mint-Y", "color": "#2"}]}
            ]}"##,
        );
        let index = StyleIndex::load(&tree.roots().styles, &tree.scan());
        let active = find_active(&index, &selection_of("Mint-Y")).unwrap();
        assert_eq!(active.style.name, "Alpha");
        assert_eq!(active.variant.name, "A");
    }

    #[test]
    fn mode_switch_keeps_variant_name() {
        let (_tree, index) = fixture();
        // Green is active in mixed; dark also has a Green.
        let plan = plan_mode(&index, &selection_of("Mint-Y"), Mode::Dark).unwrap();
        assert_eq!(plan.variant.name, "Green");
        assert_eq!(plan.variant.selection.gtk, "Mint-Y-Dark");
    }

    #[test]
    fn mode_switch_falls_back_to_mode_default() {
        let (_tree, index) = fixture();
        // Aqua is active in mixed; dark has no Aqua, so its default applies.
        let plan = plan_mode(&index, &selection_of("Mint-Y-Aqua"), Mode::Dark).unwrap();
        assert_eq!(plan.variant.name, "Green");
    }

    #[test]
    fn mode_switch_from_custom_selection_fails() {
        let (_tree, index) = fixture();
        let err = plan_mode(&index, &selection_of("Unrelated"), Mode::Dark).unwrap_err();
        assert!(format!("{err}").contains("no style"));
    }

    #[test]
    fn mode_switch_to_unpopulated_mode_fails() {
        let (_tree, index) = fixture();
        let err = plan_mode(&index, &selection_of("Solo-Theme"), Mode::Dark).unwrap_err();
        assert!(format!("{err}").contains("has no dark mode"));
    }

    #[test]
    fn apply_defaults_to_style_default_mode_and_variant() {
        let (_tree, index) = fixture();
        let plan = plan_apply(&index, &selection_of("Unrelated"), "Mint", None, None).unwrap();
        assert_eq!(plan.mode.mode, Mode::Mixed);
        assert_eq!(plan.variant.name, "Green");
    }

    #[test]
    fn apply_preserves_active_variant_name_across_styles() {
        let (tree, _) = fixture();
        // Give Solo a Green variant too, then switch styles while Green is
        // active in Mint.
        tree.style_file(
            "solo2.styles",
            r##"{"styles": [{"name": "Solo2", "mixed": [
                {"name": "Plain", "themes": "Solo-Theme", "color": "#aaa"},
                {"name": "Green", "themes": "Mint-Y-Dark", "color": "#8fa876"}
            ]}]}"##,
        );
        let index = StyleIndex::load(&tree.roots().styles, &tree.scan());
        let plan = plan_apply(&index, &selection_of("Mint-Y"), "Solo2", None, None).unwrap();
        assert_eq!(plan.variant.name, "Green");
    }

    #[test]
    fn apply_with_explicit_mode_and_variant() {
        let (_tree, index) = fixture();
        let plan = plan_apply(
            &index,
            &selection_of("Unrelated"),
            "Mint",
            Some(Mode::Mixed),
            Some("Aqua"),
        )
        .unwrap();
        assert_eq!(plan.variant.selection.gtk, "Mint-Y-Aqua");
    }

    #[test]
    fn apply_unknown_style_fails() {
        let (_tree, index) = fixture();
        assert!(plan_apply(&index, &selection_of("x"), "Nope", None, None).is_err());
    }

    #[test]
    fn apply_unknown_variant_fails() {
        let (_tree, index) = fixture();
        let err = plan_apply(
            &index,
            &selection_of("x"),
            "Mint",
            None,
            Some("Crimson"),
        )
        .unwrap_err();
        assert!(format!("{err}").contains("Crimson"));
    }
}
