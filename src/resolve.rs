//! Path resolution for install and remove operations.
//!
//! Turns a user-supplied item path plus an [`ItemKind`] into concrete source
//! and target filesystem locations. Three input shapes are accepted:
//!
//! - **repo-relative** (default): `skills/foo` or bare `foo` — the kind
//!   prefix is optional on input and normalized away internally
//! - **home-relative**: `~` or `~/...`, expanded against the user's home
//! - **absolute**: used as-is
//!
//! For home-relative and absolute ("external") paths only the final path
//! segment is preserved locally; repo-relative paths mirror their relative
//! structure under `<local-root>/<kind>/...`.
//!
//! Resolution is pure: no filesystem access, deterministic for identical
//! inputs. Ambient state (cwd, home) is passed in explicitly.

use std::path::{Path, PathBuf};

use crate::error::PathError;
use crate::item::ItemKind;

/// Directory under the project's working directory that holds installed
/// symlinks.
pub const LOCAL_ROOT_DIR: &str = ".pi";

/// Resolved source/target pair for an install operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstall {
    /// Absolute path of the item in the shared repo (or external location).
    pub source: PathBuf,
    /// Absolute path where the symlink will be created.
    pub target: PathBuf,
    /// Path relative to the local install root, forward slashes.
    pub display: String,
}

/// Resolved target for a remove operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveTarget {
    /// Absolute path of the symlink to remove.
    pub target: PathBuf,
    /// Path relative to the local install root, forward slashes.
    pub display: String,
}

/// A classified item path: repo-relative (normalized) or external.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ItemPath {
    /// Normalized relative path with the kind prefix stripped.
    Repo(String),
    /// Expanded absolute path outside the shared repo.
    External(PathBuf),
}

/// The local install root for a project working directory.
#[must_use]
pub fn local_root(cwd: &Path) -> PathBuf {
    cwd.join(LOCAL_ROOT_DIR)
}

/// Resolve source, target, and display paths for installing an item.
///
/// # Errors
///
/// Returns [`PathError::Empty`] when the logical path is empty after
/// normalization, or [`PathError::NoFileName`] when an external path has no
/// final segment.
pub fn resolve_install(
    kind: ItemKind,
    raw: &str,
    repo: &Path,
    cwd: &Path,
    home: &Path,
) -> Result<ResolvedInstall, PathError> {
    let kind_root = local_root(cwd).join(kind.dir_name());
    match classify(kind, raw, home)? {
        ItemPath::Repo(rel) => Ok(ResolvedInstall {
            source: join_slash(&repo.join(kind.dir_name()), &rel),
            target: join_slash(&kind_root, &rel),
            display: format!("{}/{rel}", kind.dir_name()),
        }),
        ItemPath::External(source) => {
            let name = source
                .file_name()
                .ok_or_else(|| PathError::NoFileName(source.display().to_string()))?
                .to_os_string();
            let display = format!("{}/{}", kind.dir_name(), name.to_string_lossy());
            Ok(ResolvedInstall {
                target: kind_root.join(&name),
                source,
                display,
            })
        }
    }
}

/// Resolve the target symlink path for removing an item.
///
/// Accepts the same three input shapes as [`resolve_install`]; only the
/// target side is computed, so the shared repo location is not needed.
///
/// # Errors
///
/// Returns [`PathError::Empty`] or [`PathError::NoFileName`] as
/// [`resolve_install`] does.
pub fn resolve_remove(
    kind: ItemKind,
    raw: &str,
    cwd: &Path,
    home: &Path,
) -> Result<RemoveTarget, PathError> {
    let kind_root = local_root(cwd).join(kind.dir_name());
    match classify(kind, raw, home)? {
        ItemPath::Repo(rel) => Ok(RemoveTarget {
            target: join_slash(&kind_root, &rel),
            display: format!("{}/{rel}", kind.dir_name()),
        }),
        ItemPath::External(source) => {
            let name = source
                .file_name()
                .ok_or_else(|| PathError::NoFileName(source.display().to_string()))?
                .to_os_string();
            let display = format!("{}/{}", kind.dir_name(), name.to_string_lossy());
            Ok(RemoveTarget {
                target: kind_root.join(&name),
                display,
            })
        }
    }
}

/// Normalize a path for set membership: repo-relative only, stored with the
/// kind-directory prefix (the same shape discovery reports).
///
/// # Errors
///
/// Returns [`PathError::External`] for absolute or `~`-relative input, and
/// [`PathError::Empty`] when nothing remains after normalization.
pub fn normalize_set_path(kind: ItemKind, raw: &str) -> Result<String, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if trimmed.starts_with('~') || Path::new(trimmed).is_absolute() {
        return Err(PathError::External(trimmed.to_string()));
    }
    let rel = normalize_relative(kind, trimmed)?;
    Ok(format!("{}/{rel}", kind.dir_name()))
}

/// Classify a raw item path as repo-relative or external, expanding `~`.
fn classify(kind: ItemKind, raw: &str, home: &Path) -> Result<ItemPath, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if let Some(rest) = trimmed.strip_prefix('~') {
        let rest = rest.trim_start_matches(['/', '\\']);
        let expanded = if rest.is_empty() {
            home.to_path_buf()
        } else {
            home.join(rest)
        };
        return Ok(ItemPath::External(expanded));
    }
    if Path::new(trimmed).is_absolute() {
        return Ok(ItemPath::External(PathBuf::from(trimmed)));
    }
    Ok(ItemPath::Repo(normalize_relative(kind, trimmed)?))
}

/// Normalize a repo-relative path: forward slashes, no leading `./`, no
/// redundant kind prefix, no stray leading/trailing separators.
fn normalize_relative(kind: ItemKind, raw: &str) -> Result<String, PathError> {
    let mut rel = raw.replace('\\', "/");
    while let Some(rest) = rel.strip_prefix("./") {
        rel = rest.to_string();
    }
    rel = rel.trim_matches('/').to_string();
    if let Some(rest) = rel.strip_prefix(kind.dir_name()) {
        // Only a whole leading segment counts as the kind prefix:
        // "skills/foo" strips, "skillset/foo" does not.
        if rest.is_empty() {
            rel.clear();
        } else if let Some(rest) = rest.strip_prefix('/') {
            rel = rest.trim_start_matches('/').to_string();
        }
    }
    if rel.trim().is_empty() {
        return Err(PathError::Empty);
    }
    Ok(rel)
}

/// Join a forward-slash relative path onto a base, one segment at a time, so
/// the result uses native separators on every platform.
fn join_slash(base: &Path, rel: &str) -> PathBuf {
    rel.split('/')
        .filter(|seg| !seg.is_empty())
        .fold(base.to_path_buf(), |p, seg| p.join(seg))
}
