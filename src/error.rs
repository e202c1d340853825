//! Typed errors for path resolution and the sets manifest.
//!
//! Core modules return these [`thiserror`] types; command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//! Expected per-item conditions (source missing, target occupied) are *not*
//! errors — they are modelled as [`LinkOutcome`](crate::linker::LinkOutcome)
//! variants instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while interpreting a user-supplied item path.
#[derive(Error, Debug)]
pub enum PathError {
    /// The path was empty (or only whitespace) after normalization.
    #[error("item path is empty")]
    Empty,

    /// An external path ends in a way that yields no usable file name
    /// (e.g. a filesystem root).
    #[error("cannot determine a file name for '{0}'")]
    NoFileName(String),

    /// An absolute or `~`-relative path was given where only repo-relative
    /// paths are accepted (set membership).
    #[error("set items must be repo-relative: '{0}'")]
    External(String),
}

/// Errors produced while reading or mutating the sets manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The manifest file does not exist and the operation requires one.
    #[error("no manifest found at {}", .0.display())]
    NotFound(PathBuf),

    /// The manifest file exists but is not valid manifest JSON.
    #[error("malformed manifest {}: {source}", path.display())]
    Parse {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// The `version` field parsed but is not a positive integer.
    #[error("manifest version must be a positive integer, got {0}")]
    InvalidVersion(i64),

    /// The named set does not exist in the manifest.
    #[error("no set named '{0}'")]
    UnknownSet(String),

    /// A set name was empty (or only whitespace).
    #[error("set name is empty")]
    EmptySetName,
}
