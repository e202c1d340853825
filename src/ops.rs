//! Set-level install and remove drivers.
//!
//! Each item of a set is resolved and applied independently: a failure for
//! one item — malformed path, missing source, occupied target, even an I/O
//! error — becomes a `Failed` entry in the returned report and the remaining
//! items continue. Only pre-loop failures (absent manifest, unknown set
//! name) abort the whole operation.

use std::path::Path;

use anyhow::Result;

use crate::error::ManifestError;
use crate::item::ItemKind;
use crate::linker::{self, LinkOutcome};
use crate::manifest::Manifest;
use crate::resolve;

/// One line of an itemized install/remove report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// Path relative to the local install root, forward slashes.
    pub display: String,
    /// What happened to this item.
    pub outcome: LinkOutcome,
}

/// Install every item of a named set, returning a per-item report.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] when no manifest exists and
/// [`ManifestError::UnknownSet`] when the set is absent. Per-item failures
/// do not abort the loop.
pub fn install_set(
    repo: &Path,
    sets_file: &str,
    name: &str,
    cwd: &Path,
    home: &Path,
) -> Result<Vec<ItemReport>> {
    let manifest = Manifest::load_required(repo, sets_file)?;
    let set = manifest
        .set(name)
        .ok_or_else(|| ManifestError::UnknownSet(name.trim().to_string()))?;

    let mut reports = Vec::with_capacity(set.items.len());
    for kind in ItemKind::ALL {
        for path in set.items.get(kind) {
            reports.push(apply_install(kind, path, repo, cwd, home));
        }
    }
    Ok(reports)
}

/// Remove every item of a named set, returning a per-item report.
///
/// # Errors
///
/// As [`install_set`]: only manifest-level failures abort.
pub fn remove_set(
    repo: &Path,
    sets_file: &str,
    name: &str,
    cwd: &Path,
    home: &Path,
) -> Result<Vec<ItemReport>> {
    let manifest = Manifest::load_required(repo, sets_file)?;
    let set = manifest
        .set(name)
        .ok_or_else(|| ManifestError::UnknownSet(name.trim().to_string()))?;

    let mut reports = Vec::with_capacity(set.items.len());
    for kind in ItemKind::ALL {
        for path in set.items.get(kind) {
            reports.push(apply_remove(kind, path, cwd, home));
        }
    }
    Ok(reports)
}

/// Resolve and link a single set item, converting any error into a `Failed`
/// report entry.
fn apply_install(kind: ItemKind, path: &str, repo: &Path, cwd: &Path, home: &Path) -> ItemReport {
    match resolve::resolve_install(kind, path, repo, cwd, home) {
        Ok(resolved) => {
            let outcome = linker::link_item(&resolved.source, &resolved.target)
                .unwrap_or_else(|e| LinkOutcome::Failed {
                    reason: format!("{e:#}"),
                });
            ItemReport {
                display: resolved.display,
                outcome,
            }
        }
        Err(e) => ItemReport {
            display: path.to_string(),
            outcome: LinkOutcome::Failed {
                reason: e.to_string(),
            },
        },
    }
}

/// Resolve and unlink a single set item, converting any error into a
/// `Failed` report entry.
fn apply_remove(kind: ItemKind, path: &str, cwd: &Path, home: &Path) -> ItemReport {
    match resolve::resolve_remove(kind, path, cwd, home) {
        Ok(resolved) => {
            let outcome = linker::remove_item(&resolved.target).unwrap_or_else(|e| {
                LinkOutcome::Failed {
                    reason: format!("{e:#}"),
                }
            });
            ItemReport {
                display: resolved.display,
                outcome,
            }
        }
        Err(e) => ItemReport {
            display: path.to_string(),
            outcome: LinkOutcome::Failed {
                reason: e.to_string(),
            },
        },
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::manifest::{DEFAULT_SETS_FILE, add_to_set};

    #[test]
    fn install_set_requires_a_manifest() {
        let repo = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        let err = install_set(
            repo.path(),
            DEFAULT_SETS_FILE,
            "writer",
            cwd.path(),
            Path::new("/home/user"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no manifest found"));
    }

    #[test]
    fn install_set_rejects_unknown_set() {
        let repo = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        add_to_set(repo.path(), DEFAULT_SETS_FILE, "other", ItemKind::Skills, "a").unwrap();

        let err = install_set(
            repo.path(),
            DEFAULT_SETS_FILE,
            "writer",
            cwd.path(),
            Path::new("/home/user"),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no set named 'writer'"));
    }

    #[test]
    fn item_failures_do_not_abort_the_loop() {
        let repo = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        // Neither source exists, so both items fail — and both are reported.
        add_to_set(repo.path(), DEFAULT_SETS_FILE, "s", ItemKind::Skills, "a").unwrap();
        add_to_set(repo.path(), DEFAULT_SETS_FILE, "s", ItemKind::Prompts, "p.md").unwrap();

        let reports = install_set(
            repo.path(),
            DEFAULT_SETS_FILE,
            "s",
            cwd.path(),
            Path::new("/home/user"),
        )
        .unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.outcome.is_failure()));
    }

    #[test]
    fn remove_set_is_idempotent_per_item() {
        let repo = tempfile::tempdir().unwrap();
        let cwd = tempfile::tempdir().unwrap();
        add_to_set(repo.path(), DEFAULT_SETS_FILE, "s", ItemKind::Prompts, "p.md").unwrap();

        let reports = remove_set(
            repo.path(),
            DEFAULT_SETS_FILE,
            "s",
            cwd.path(),
            Path::new("/home/user"),
        )
        .unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, LinkOutcome::Missing);
    }
}
