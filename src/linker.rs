//! Symlink state transitions for install and removal.
//!
//! Each target path is in one of the [`LinkState`]s below; install and
//! remove are transitions over that small state machine. Expected conditions
//! (source missing, target occupied, already linked) are modelled as
//! [`LinkOutcome`] variants, not errors — `Err` is reserved for unexpected
//! I/O failures (permissions, disk errors), which propagate unchanged.
//!
//! Install never overwrites a real file or directory and never repoints a
//! symlink that leads elsewhere; removal deletes only symlinks and never
//! touches the shared source.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};

/// Observed state of a target path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing exists at the target.
    Absent,
    /// A symlink whose destination resolves to the expected source.
    LinkedToExpected,
    /// A symlink that resolves somewhere else.
    LinkedElsewhere(PathBuf),
    /// A regular file or directory occupies the target.
    Occupied,
}

/// Tagged result of a single install or remove transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new symlink was created.
    Linked,
    /// The target already links to the expected source; nothing was done.
    AlreadyLinked,
    /// An existing symlink was deleted.
    Removed,
    /// Nothing existed at the target; nothing was done.
    Missing,
    /// The transition was refused.
    Failed {
        /// Human-readable refusal reason.
        reason: String,
    },
}

impl LinkOutcome {
    /// Whether this outcome reports a refused transition.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Short status label for report columns.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Linked => "linked",
            Self::AlreadyLinked => "already linked",
            Self::Removed => "removed",
            Self::Missing => "missing",
            Self::Failed { .. } => "failed",
        }
    }
}

impl fmt::Display for LinkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed { reason } => write!(f, "failed: {reason}"),
            other => f.write_str(other.label()),
        }
    }
}

/// Observe the current [`LinkState`] of `target` with respect to `source`.
///
/// # Errors
///
/// Returns an error for I/O failures other than "not found".
pub fn probe(target: &Path, source: &Path) -> Result<LinkState> {
    let meta = match std::fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkState::Absent),
        Err(e) => {
            return Err(e).with_context(|| format!("reading metadata: {}", target.display()));
        }
    };
    if !meta.is_symlink() {
        return Ok(LinkState::Occupied);
    }
    let dest = std::fs::read_link(target)
        .with_context(|| format!("reading link: {}", target.display()))?;
    if destinations_match(&dest, target, source) {
        Ok(LinkState::LinkedToExpected)
    } else {
        Ok(LinkState::LinkedElsewhere(dest))
    }
}

/// Install transition: create a symlink at `target` pointing to `source`.
///
/// Idempotent: a target already linked to `source` reports
/// [`LinkOutcome::AlreadyLinked`]. A missing source, an occupied target, or
/// a symlink leading elsewhere reports [`LinkOutcome::Failed`].
///
/// # Errors
///
/// Returns an error for unexpected I/O failures only.
pub fn link_item(source: &Path, target: &Path) -> Result<LinkOutcome> {
    match std::fs::symlink_metadata(source) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(LinkOutcome::Failed {
                reason: format!("source not found: {}", source.display()),
            });
        }
        Err(e) => {
            return Err(e).with_context(|| format!("reading metadata: {}", source.display()));
        }
        Ok(_) => {}
    }
    match probe(target, source)? {
        LinkState::LinkedToExpected => Ok(LinkOutcome::AlreadyLinked),
        LinkState::Occupied => Ok(LinkOutcome::Failed {
            reason: format!("target exists and is not a symlink: {}", target.display()),
        }),
        LinkState::LinkedElsewhere(dest) => Ok(LinkOutcome::Failed {
            reason: format!("target already links elsewhere: {}", dest.display()),
        }),
        LinkState::Absent => {
            ensure_parent_dir(target)?;
            create_symlink(source, target)
                .with_context(|| format!("create link: {}", target.display()))?;
            Ok(LinkOutcome::Linked)
        }
    }
}

/// Remove transition: delete the symlink at `target`.
///
/// Idempotent: an absent target reports [`LinkOutcome::Missing`]. A target
/// that exists but is not a symlink is refused so real content is never
/// deleted.
///
/// # Errors
///
/// Returns an error for unexpected I/O failures only.
pub fn remove_item(target: &Path) -> Result<LinkOutcome> {
    let meta = match std::fs::symlink_metadata(target) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(LinkOutcome::Missing),
        Err(e) => {
            return Err(e).with_context(|| format!("reading metadata: {}", target.display()));
        }
    };
    if !meta.is_symlink() {
        return Ok(LinkOutcome::Failed {
            reason: format!("target exists and is not a symlink: {}", target.display()),
        });
    }
    remove_symlink(target, &meta)
        .with_context(|| format!("removing link: {}", target.display()))?;
    Ok(LinkOutcome::Removed)
}

/// Whether a symlink destination resolves to the expected source.
///
/// Compares the raw link value first, then falls back to canonicalizing both
/// sides (resolving a relative destination against the link's parent).
fn destinations_match(dest: &Path, target: &Path, source: &Path) -> bool {
    if dest == source {
        return true;
    }
    let resolved = if dest.is_absolute() {
        dest.to_path_buf()
    } else {
        target
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(dest)
    };
    match (dunce::canonicalize(&resolved), dunce::canonicalize(source)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Ensure the parent directory of `path` exists, creating ancestors as
/// needed.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target` (platform-specific).
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}

/// Remove a symlink, handling platform differences.
///
/// On Windows, directory symlinks must go through `remove_dir`; the raw
/// `FILE_ATTRIBUTE_DIRECTORY` bit is checked because `symlink_metadata()
/// .is_dir()` reports `false` for symlinks.
fn remove_symlink(path: &Path, meta: &std::fs::Metadata) -> io::Result<()> {
    if is_dir_like(meta) {
        std::fs::remove_dir(path)
    } else {
        std::fs::remove_file(path)
    }
}

#[cfg(windows)]
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    meta.file_attributes() & 0x10 != 0 // FILE_ATTRIBUTE_DIRECTORY
}

#[cfg(not(windows))]
fn is_dir_like(meta: &std::fs::Metadata) -> bool {
    meta.is_dir()
}
