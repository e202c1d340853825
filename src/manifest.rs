//! The JSON sets manifest (`quartermaster_sets.json`).
//!
//! A manifest maps set names to [`SetDefinition`]s. It is read lazily on
//! demand and rewritten wholesale (never patched in place) on each successful
//! mutation. No locking is taken — the last writer wins, and concurrent
//! external edits are not merged.
//!
//! Normalization is applied on every read *and* every write: set names and
//! descriptions are trimmed (an empty description becomes absent), item
//! entries are trimmed with empties dropped, and each per-kind list is
//! deduplicated and sorted. All four kind keys are always present so callers
//! never observe a missing key.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

use crate::error::ManifestError;
use crate::item::ItemKind;
use crate::resolve;

/// Default manifest filename inside the shared repo.
pub const DEFAULT_SETS_FILE: &str = "quartermaster_sets.json";

/// Per-kind item lists of a set. Every kind key is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetItems {
    /// Skill paths (repo-relative, `skills/...`).
    #[serde(default)]
    pub skills: Vec<String>,
    /// Extension paths (repo-relative, `extensions/...`).
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Tool paths (repo-relative, `tools/...`).
    #[serde(default)]
    pub tools: Vec<String>,
    /// Prompt paths (repo-relative, `prompts/...`).
    #[serde(default)]
    pub prompts: Vec<String>,
}

impl SetItems {
    /// The item list for one kind.
    #[must_use]
    pub const fn get(&self, kind: ItemKind) -> &Vec<String> {
        match kind {
            ItemKind::Skills => &self.skills,
            ItemKind::Extensions => &self.extensions,
            ItemKind::Tools => &self.tools,
            ItemKind::Prompts => &self.prompts,
        }
    }

    /// Mutable item list for one kind.
    pub fn get_mut(&mut self, kind: ItemKind) -> &mut Vec<String> {
        match kind {
            ItemKind::Skills => &mut self.skills,
            ItemKind::Extensions => &mut self.extensions,
            ItemKind::Tools => &mut self.tools,
            ItemKind::Prompts => &mut self.prompts,
        }
    }

    /// Total number of items across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        ItemKind::ALL.iter().map(|k| self.get(*k).len()).sum()
    }

    /// Whether every kind list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trim entries, drop empties, sort, and deduplicate every kind list.
    fn normalize(&mut self) {
        for kind in ItemKind::ALL {
            let list = self.get_mut(kind);
            list.iter_mut().for_each(|p| *p = p.trim().to_string());
            list.retain(|p| !p.is_empty());
            list.sort();
            list.dedup();
        }
    }
}

/// A named grouping of items. The set name is the manifest map key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDefinition {
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Items of this set, by kind.
    #[serde(default)]
    pub items: SetItems,
}

/// The sets manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Format version; must be a positive integer.
    pub version: i64,
    /// Sets by name. `BTreeMap` keeps names sorted on every write.
    #[serde(default)]
    pub sets: BTreeMap<String, SetDefinition>,
}

/// Outcome of [`add_to_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The path was not yet a member and has been added.
    Added,
    /// The normalized path was already a member; the manifest was still
    /// rewritten to keep normalization consistent.
    AlreadyPresent,
}

/// Outcome of [`remove_from_set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The path was a member and has been removed.
    Removed,
    /// The normalized path was not a member (or the set does not exist);
    /// the manifest was still rewritten.
    NotPresent,
}

/// Full path of the manifest file inside the shared repo.
#[must_use]
pub fn manifest_path(repo: &Path, sets_file: &str) -> PathBuf {
    repo.join(sets_file)
}

impl Manifest {
    /// An empty manifest at version 1.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: 1,
            sets: BTreeMap::new(),
        }
    }

    /// Read the manifest, returning `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] for malformed JSON,
    /// [`ManifestError::InvalidVersion`] for a non-positive version, and the
    /// underlying I/O error for anything other than a missing file.
    pub fn load(repo: &Path, sets_file: &str) -> Result<Option<Self>> {
        let path = manifest_path(repo, sets_file);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("reading manifest {}", path.display()));
            }
        };
        let mut manifest: Self = serde_json::from_str(&raw)
            .map_err(|source| ManifestError::Parse { path, source })?;
        if manifest.version <= 0 {
            return Err(ManifestError::InvalidVersion(manifest.version).into());
        }
        manifest.normalize();
        Ok(Some(manifest))
    }

    /// Read the manifest, failing when the file does not exist.
    ///
    /// Used by lookup-oriented operations (install set, remove set,
    /// remove-from-set) that cannot proceed without one.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotFound`] for a missing file, plus every
    /// error [`Manifest::load`] can produce.
    pub fn load_required(repo: &Path, sets_file: &str) -> Result<Self> {
        Self::load(repo, sets_file)?.ok_or_else(|| {
            anyhow::Error::from(ManifestError::NotFound(manifest_path(repo, sets_file)))
        })
    }

    /// Read the manifest, treating a missing file as an empty manifest at
    /// version 1. Used by mutation entry points that may create the file.
    ///
    /// # Errors
    ///
    /// Returns every error [`Manifest::load`] can produce.
    pub fn load_or_default(repo: &Path, sets_file: &str) -> Result<Self> {
        Ok(Self::load(repo, sets_file)?.unwrap_or_else(Self::empty))
    }

    /// Rewrite the whole manifest file: normalized, sets in name order,
    /// 2-space-indented JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn save(&mut self, repo: &Path, sets_file: &str) -> Result<()> {
        self.normalize();
        let path = manifest_path(repo, sets_file);
        let json = serde_json::to_string_pretty(self).context("serializing sets manifest")?;
        std::fs::write(&path, json + "\n")
            .with_context(|| format!("writing manifest {}", path.display()))
    }

    /// Look up a set by (trimmed) name.
    #[must_use]
    pub fn set(&self, name: &str) -> Option<&SetDefinition> {
        self.sets.get(name.trim())
    }

    /// Trim set names and descriptions and normalize every item list.
    fn normalize(&mut self) {
        let sets = std::mem::take(&mut self.sets);
        for (name, mut set) in sets {
            set.description = set
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            set.items.normalize();
            self.sets.insert(name.trim().to_string(), set);
        }
    }
}

/// Add an item path to a set, creating the manifest and the set as needed.
///
/// The manifest file is rewritten unconditionally, even when the path is
/// already present, so normalization stays consistent.
///
/// # Errors
///
/// Returns [`PathError`](crate::error::PathError) for empty or external
/// paths, [`ManifestError::EmptySetName`] for a blank set name, and manifest
/// read/write errors.
pub fn add_to_set(
    repo: &Path,
    sets_file: &str,
    set_name: &str,
    kind: ItemKind,
    raw_path: &str,
) -> Result<AddOutcome> {
    let path = resolve::normalize_set_path(kind, raw_path)?;
    let name = set_name.trim();
    if name.is_empty() {
        return Err(ManifestError::EmptySetName.into());
    }
    let mut manifest = Manifest::load_or_default(repo, sets_file)?;
    let list = manifest
        .sets
        .entry(name.to_string())
        .or_default()
        .items
        .get_mut(kind);
    let outcome = if list.contains(&path) {
        AddOutcome::AlreadyPresent
    } else {
        list.push(path);
        AddOutcome::Added
    };
    manifest.save(repo, sets_file)?;
    Ok(outcome)
}

/// Remove an item path from a set.
///
/// A path (or set) that is not present reports [`RemoveOutcome::NotPresent`]
/// rather than an error; the manifest file is rewritten unconditionally
/// either way.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] when no manifest file exists, plus
/// path validation and read/write errors as [`add_to_set`].
pub fn remove_from_set(
    repo: &Path,
    sets_file: &str,
    set_name: &str,
    kind: ItemKind,
    raw_path: &str,
) -> Result<RemoveOutcome> {
    let path = resolve::normalize_set_path(kind, raw_path)?;
    let name = set_name.trim();
    if name.is_empty() {
        return Err(ManifestError::EmptySetName.into());
    }
    let mut manifest = Manifest::load_required(repo, sets_file)?;
    let outcome = match manifest.sets.get_mut(name) {
        Some(set) => {
            let list = set.items.get_mut(kind);
            match list.iter().position(|p| *p == path) {
                Some(pos) => {
                    list.remove(pos);
                    RemoveOutcome::Removed
                }
                None => RemoveOutcome::NotPresent,
            }
        }
        None => RemoveOutcome::NotPresent,
    };
    manifest.save(repo, sets_file)?;
    Ok(outcome)
}
