//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use serde_json::{Value, json};

use livery_core::catalog::Catalog;
use livery_core::paths::SearchRoots;
use livery_core::previews::{IconSampleCache, Previews, default_icon_cache_path};
use livery_core::resolver::{self, ActiveStyle};
use livery_core::styles::StyleIndex;
use livery_settings::desktop::{DesktopSettings, INTERFACE_SCHEMA, PORTAL_SCHEMA, SHELL_SCHEMA};
use livery_settings::store::{GsettingsStore, MemoryStore, SettingsStore};
use livery_types::config::LiveryConfig;
use livery_types::kinds::{Mode, Selection, ThemeKind};

// ---------------------------------------------------------------------------
// Shared command context
// ---------------------------------------------------------------------------

/// Everything a subcommand needs, assembled once per invocation.
pub struct Context {
    roots: SearchRoots,
    catalog: Catalog,
    index: StyleIndex,
    settings: DesktopSettings,
    dry_run: bool,
}

impl Context {
    pub fn load(dry_run: bool) -> Result<Self> {
        let config = LiveryConfig::load_default().context("loading configuration")?;
        let roots = SearchRoots::from_env(&config);
        let catalog = Catalog::scan(&roots, &config.extra_blacklist);
        let index = StyleIndex::load(&roots.styles, &catalog);
        let settings = if dry_run {
            DesktopSettings::new(Box::new(seeded_memory()), vec![])
        } else {
            DesktopSettings::new(Box::new(GsettingsStore::new()), roots.user_icons.clone())
        };
        Ok(Self {
            roots,
            catalog,
            index,
            settings,
            dry_run,
        })
    }
}

/// Copy of the live appearance keys for `--dry-run`. Keys the live store
/// cannot read stay unset.
fn seeded_memory() -> MemoryStore {
    let live = GsettingsStore::new();
    let mut mem = MemoryStore::new();
    for (schema, key) in [
        (INTERFACE_SCHEMA, "gtk-theme"),
        (INTERFACE_SCHEMA, "icon-theme"),
        (INTERFACE_SCHEMA, "cursor-theme"),
        (SHELL_SCHEMA, "name"),
        (PORTAL_SCHEMA, "color-scheme"),
    ] {
        match live.get(schema, key) {
            Ok(value) => mem = mem.with(schema, key, &value),
            Err(err) => log::debug!("dry-run seed: {schema} {key} unreadable -- {err}"),
        }
    }
    mem
}

// ---------------------------------------------------------------------------
// list
// ---------------------------------------------------------------------------

struct ListEntry {
    name: String,
    root: PathBuf,
    preview: Option<PathBuf>,
}

pub fn list(
    ctx: &Context,
    kind: Option<ThemeKind>,
    paths: bool,
    previews: bool,
    json: bool,
) -> Result<()> {
    let kinds: Vec<ThemeKind> = match kind {
        Some(kind) => vec![kind],
        None => ThemeKind::ALL.to_vec(),
    };
    let assets = Previews::new();
    let mut cache = previews
        .then(|| {
            default_icon_cache_path().map(|path| IconSampleCache::load(path, &assets.icon_seed()))
        })
        .flatten();

    let mut sections = Vec::new();
    for kind in kinds {
        let entries: Vec<ListEntry> = ctx
            .catalog
            .themes(kind)
            .iter()
            .map(|theme| {
                let preview = match kind {
                    _ if !previews => None,
                    ThemeKind::Icons => cache
                        .as_mut()
                        .and_then(|c| c.sample(&ctx.roots, &theme.name)),
                    _ => assets.thumbnail(kind, theme),
                };
                ListEntry {
                    name: theme.name.clone(),
                    root: theme.root.clone(),
                    preview,
                }
            })
            .collect();
        sections.push((kind, entries));
    }

    if let Some(cache) = cache.as_mut()
        && let Err(err) = cache.save()
    {
        log::warn!("could not write the icon sample cache -- {err}");
    }

    if json {
        println!("{}", list_json(&sections));
    } else {
        println!("{}", render_list(&sections, paths));
    }
    Ok(())
}

fn list_json(sections: &[(ThemeKind, Vec<ListEntry>)]) -> Value {
    let mut doc = serde_json::Map::new();
    for (kind, entries) in sections {
        let items: Vec<Value> = entries
            .iter()
            .map(|entry| {
                let mut item = json!({
                    "name": entry.name,
                    "root": entry.root.display().to_string(),
                });
                if let Some(preview) = &entry.preview {
                    item["preview"] = json!(preview.display().to_string());
                }
                item
            })
            .collect();
        doc.insert(kind.to_string(), Value::Array(items));
    }
    Value::Object(doc)
}

fn render_list(sections: &[(ThemeKind, Vec<ListEntry>)], paths: bool) -> String {
    let mut lines = Vec::new();
    for (kind, entries) in sections {
        lines.push(format!("{kind}:"));
        for entry in entries {
            let mut line = format!("  {}", entry.name);
            if paths {
                line.push_str(&format!("  {}", entry.root.display()));
            }
            if let Some(preview) = &entry.preview {
                line.push_str(&format!("  {}", preview.display()));
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// status / styles
// ---------------------------------------------------------------------------

pub fn status(ctx: &Context, json: bool) -> Result<()> {
    let selection = ctx
        .settings
        .selection()
        .context("reading the current selection")?;
    let active = resolver::find_active(&ctx.index, &selection);

    if json {
        println!("{}", status_json(&selection, active.as_ref()));
        return Ok(());
    }
    for kind in ThemeKind::ALL {
        println!("{:<9} {}", format!("{kind}:"), selection.get(kind));
    }
    match active {
        Some(active) => println!(
            "{:<9} {} / {} / {}",
            "style:", active.style.name, active.mode.mode, active.variant.name
        ),
        None => println!("{:<9} custom", "style:"),
    }
    Ok(())
}

fn status_json(selection: &Selection, active: Option<&ActiveStyle<'_>>) -> Value {
    json!({
        "selection": selection,
        "style": active.map(|active| json!({
            "name": active.style.name,
            "mode": active.mode.mode.to_string(),
            "variant": active.variant.name,
        })),
    })
}

pub fn styles(ctx: &Context) -> Result<()> {
    if ctx.index.is_empty() {
        println!("no styles indexed");
        return Ok(());
    }
    // Marking the active entry is best-effort; listing styles should not
    // require a reachable settings store.
    let selection = ctx.settings.selection().ok();
    let active = selection
        .as_ref()
        .and_then(|s| resolver::find_active(&ctx.index, s));
    println!("{}", render_styles(&ctx.index, active.as_ref()));
    Ok(())
}

fn render_styles(index: &StyleIndex, active: Option<&ActiveStyle<'_>>) -> String {
    let mut lines = Vec::new();
    for style in &index.styles {
        let marker = if active.is_some_and(|a| a.style.name == style.name) {
            "* "
        } else {
            "  "
        };
        lines.push(format!(
            "{marker}{}  (default mode: {})",
            style.name, style.default_mode
        ));
        for mode in &style.modes {
            let variants: Vec<String> = mode
                .variants
                .iter()
                .map(|variant| {
                    let mut out = format!("{} {}", variant.name, variant.color);
                    if variant.color2 != variant.color {
                        out.push_str(&format!("/{}", variant.color2));
                    }
                    let is_active = active.is_some_and(|a| {
                        a.style.name == style.name
                            && a.mode.mode == mode.mode
                            && a.variant.name == variant.name
                    });
                    if is_active {
                        out.push_str(" (active)");
                    }
                    out
                })
                .collect();
            lines.push(format!("    {}: {}", mode.mode, variants.join(", ")));
        }
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// set / apply / mode
// ---------------------------------------------------------------------------

pub fn set(ctx: &mut Context, kind: ThemeKind, name: &str, force: bool) -> Result<()> {
    if !force && !ctx.catalog.contains(kind, name) {
        bail!("no installed {kind} theme named '{name}' -- use --force to write it anyway");
    }
    let before = ctx.settings.theme(kind).ok();
    ctx.settings
        .set_theme(kind, name)
        .with_context(|| format!("writing the {kind} theme"))?;
    if ctx.dry_run {
        let old = before.as_deref().unwrap_or("(unset)");
        if old == name {
            println!("dry-run: {kind} already {name}");
        } else {
            println!("dry-run: {kind}: {old} -> {name}");
        }
    } else {
        println!("{kind} theme set to {name}");
    }
    Ok(())
}

/// Owned copy of a resolved plan, detached from the index borrow so the
/// settings half of the context can be written afterwards.
struct PlannedWrite {
    style: String,
    mode: Mode,
    variant: String,
    target: Selection,
}

impl From<ActiveStyle<'_>> for PlannedWrite {
    fn from(plan: ActiveStyle<'_>) -> Self {
        Self {
            style: plan.style.name.clone(),
            mode: plan.mode.mode,
            variant: plan.variant.name.clone(),
            target: plan.variant.selection.clone(),
        }
    }
}

pub fn apply(
    ctx: &mut Context,
    style: &str,
    mode: Option<Mode>,
    variant: Option<&str>,
) -> Result<()> {
    let before = ctx
        .settings
        .selection()
        .context("reading the current selection")?;
    let before_scheme = ctx.settings.color_scheme().ok().flatten();
    let plan = PlannedWrite::from(resolver::plan_apply(
        &ctx.index, &before, style, mode, variant,
    )?);
    commit(ctx, &before, before_scheme, &plan)
}

pub fn mode(ctx: &mut Context, mode: Mode) -> Result<()> {
    let before = ctx
        .settings
        .selection()
        .context("reading the current selection")?;
    let before_scheme = ctx.settings.color_scheme().ok().flatten();
    let plan = PlannedWrite::from(resolver::plan_mode(&ctx.index, &before, mode)?);
    commit(ctx, &before, before_scheme, &plan)
}

fn commit(
    ctx: &mut Context,
    before: &Selection,
    before_scheme: Option<Mode>,
    plan: &PlannedWrite,
) -> Result<()> {
    ctx.settings
        .apply(&plan.target, plan.mode)
        .context("writing the selection")?;
    if ctx.dry_run {
        let lines = selection_diff(before, &plan.target, before_scheme, plan.mode);
        if lines.is_empty() {
            println!("dry-run: no changes");
        } else {
            for line in lines {
                println!("dry-run: {line}");
            }
        }
    } else {
        println!("applied {} ({}, {})", plan.style, plan.mode, plan.variant);
    }
    Ok(())
}

/// Human diff between the selection before a write and the one written.
fn selection_diff(
    before: &Selection,
    after: &Selection,
    before_scheme: Option<Mode>,
    after_scheme: Mode,
) -> Vec<String> {
    let mut lines = Vec::new();
    for kind in ThemeKind::ALL {
        let (old, new) = (before.get(kind), after.get(kind));
        if old != new {
            lines.push(format!("{kind}: {old} -> {new}"));
        }
    }
    if before_scheme != Some(after_scheme) {
        let old = before_scheme.map_or_else(|| "(unset)".to_string(), |m| m.to_string());
        lines.push(format!("color scheme: {old} -> {after_scheme}"));
    }
    lines
}
