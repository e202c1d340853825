//! Scanner for symlinks installed under the local `.pi` root.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::item::ItemKind;
use crate::resolve;

/// Installed symlink paths per kind, relative to the local root with forward
/// slashes, sorted lexicographically.
pub type InstalledByKind = BTreeMap<ItemKind, Vec<String>>;

/// Report every symlink under the project's typed install directories.
///
/// Regular directories are descended into at any depth; regular files are
/// ignored — only symlinks are reported. A missing typed directory yields an
/// empty list for that kind.
///
/// # Errors
///
/// Returns an error if an existing directory cannot be read.
pub fn list_installed(cwd: &Path) -> Result<InstalledByKind> {
    let root = resolve::local_root(cwd);
    let mut by_kind = InstalledByKind::new();
    for kind in ItemKind::ALL {
        let dir = root.join(kind.dir_name());
        let mut found = Vec::new();
        if dir.is_dir() {
            walk_links(&dir, kind.dir_name(), &mut found)?;
        }
        found.sort();
        by_kind.insert(kind, found);
    }
    Ok(by_kind)
}

/// Collect symlink paths below `dir`, recursing into regular directories.
fn walk_links(dir: &Path, rel: &str, out: &mut Vec<String>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let path = entry.path();
        let entry_rel = format!("{rel}/{name}");
        let meta = std::fs::symlink_metadata(&path)
            .with_context(|| format!("reading metadata: {}", path.display()))?;
        if meta.is_symlink() {
            out.push(entry_rel);
        } else if meta.is_dir() {
            walk_links(&path, &entry_rel, out)?;
        }
    }
    Ok(())
}
