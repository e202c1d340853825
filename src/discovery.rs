//! Item discovery in the shared repo.
//!
//! Walks the four typed subtrees of the shared repo concurrently and
//! enumerates installable items with kind-specific detection rules:
//!
//! - **skills** — recursive; a directory containing a file literally named
//!   `SKILL.md` is an item and is not descended further
//! - **prompts** — recursive; every `.md` file is an item
//! - **extensions / tools** — one level only; `.ts`/`.js` files, directories
//!   containing `index.ts`/`index.js`, else directories whose `package.json`
//!   carries a truthy `pi` field
//!
//! Missing kind roots yield an empty list, not an error. Every discovered
//! path is repo-relative with forward slashes and each kind's list is sorted
//! lexicographically once its walk completes.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context as _, Result};
use rayon::prelude::*;

use crate::item::{DiscoveredItem, ItemKind};

/// Marker file that makes a directory a skill item.
const SKILL_MARKER: &str = "SKILL.md";

/// Discovered items grouped by kind, in display order.
pub type ItemsByKind = BTreeMap<ItemKind, Vec<DiscoveredItem>>;

/// Enumerate all installable items under the shared repo.
///
/// The four kind walks run concurrently; results are sorted per kind after
/// all walks complete.
///
/// # Errors
///
/// Returns an error if a directory that exists cannot be read (permissions,
/// I/O failure). A missing kind root is not an error.
pub fn discover_items(repo: &Path) -> Result<ItemsByKind> {
    let per_kind: Vec<(ItemKind, Vec<DiscoveredItem>)> = ItemKind::ALL
        .into_par_iter()
        .map(|kind| discover_kind(repo, kind).map(|items| (kind, items)))
        .collect::<Result<_>>()?;
    Ok(per_kind.into_iter().collect())
}

/// Enumerate the items of a single kind, sorted by repo-relative path.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be read.
pub fn discover_kind(repo: &Path, kind: ItemKind) -> Result<Vec<DiscoveredItem>> {
    let root = repo.join(kind.dir_name());
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let mut items = Vec::new();
    match kind {
        ItemKind::Skills => walk_skills(&root, kind.dir_name(), &mut items)?,
        ItemKind::Prompts => walk_prompts(&root, kind.dir_name(), &mut items)?,
        ItemKind::Extensions | ItemKind::Tools => scan_modules(&root, kind, &mut items)?,
    }
    items.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(items)
}

/// Recursive skill walk: a directory holding `SKILL.md` is an item and its
/// children are not inspected; other directories are descended into.
fn walk_skills(dir: &Path, rel: &str, out: &mut Vec<DiscoveredItem>) -> Result<()> {
    if dir.join(SKILL_MARKER).is_file() {
        out.push(DiscoveredItem {
            path: rel.to_string(),
            absolute_path: dir.to_path_buf(),
            kind: ItemKind::Skills,
        });
        return Ok(());
    }
    for (name, path) in read_dir(dir)? {
        if path.is_dir() {
            walk_skills(&path, &format!("{rel}/{name}"), out)?;
        }
    }
    Ok(())
}

/// Recursive prompt walk: every file ending in `.md`, at any depth.
fn walk_prompts(dir: &Path, rel: &str, out: &mut Vec<DiscoveredItem>) -> Result<()> {
    for (name, path) in read_dir(dir)? {
        let entry_rel = format!("{rel}/{name}");
        if path.is_dir() {
            walk_prompts(&path, &entry_rel, out)?;
        } else if name.ends_with(".md") {
            out.push(DiscoveredItem {
                path: entry_rel,
                absolute_path: path,
                kind: ItemKind::Prompts,
            });
        }
    }
    Ok(())
}

/// One-level module scan used by extensions and tools: `.ts`/`.js` files,
/// directories with an `index.ts`/`index.js` entry point, else directories
/// whose `package.json` registers a plugin. Anything else is skipped without
/// descending.
fn scan_modules(root: &Path, kind: ItemKind, out: &mut Vec<DiscoveredItem>) -> Result<()> {
    for (name, path) in read_dir(root)? {
        let is_module = if path.is_dir() {
            path.join("index.ts").is_file()
                || path.join("index.js").is_file()
                || has_plugin_manifest(&path)
        } else {
            name.ends_with(".ts") || name.ends_with(".js")
        };
        if is_module {
            out.push(DiscoveredItem {
                path: format!("{}/{name}", kind.dir_name()),
                absolute_path: path,
                kind,
            });
        }
    }
    Ok(())
}

/// Whether `dir` holds a `package.json` with a truthy `pi` field.
///
/// Unreadable or malformed `package.json` files disqualify the directory
/// rather than failing discovery.
fn has_plugin_manifest(dir: &Path) -> bool {
    let Ok(raw) = std::fs::read_to_string(dir.join("package.json")) else {
        return false;
    };
    let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
        return false;
    };
    is_truthy(value.get("pi"))
}

/// JSON truthiness: present and not `null`, `false`, `0`, or `""`.
fn is_truthy(value: Option<&serde_json::Value>) -> bool {
    use serde_json::Value;
    match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Read a directory into `(lossy file name, full path)` pairs.
fn read_dir(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("reading directory {}", dir.display()))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        out.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    Ok(out)
}
