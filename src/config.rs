//! Configuration provider: shared repo location and manifest filename.
//!
//! The repo path is resolved from, in order: the `--repo` flag, the
//! `QUARTERMASTER_REPO` environment variable, then the `repo` key of
//! `~/.config/quartermaster/config.toml`. The manifest filename defaults to
//! `quartermaster_sets.json` and may be overridden in the config file.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use serde::Deserialize;

use crate::manifest::DEFAULT_SETS_FILE;

/// Environment variable naming the shared repo directory.
pub const REPO_ENV_VAR: &str = "QUARTERMASTER_REPO";

/// Resolved configuration handed to every command.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Shared repo directory (validated to exist).
    pub repo: PathBuf,
    /// Manifest filename, relative to the repo.
    pub sets_file: String,
}

/// Shape of `~/.config/quartermaster/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    /// Shared repo directory.
    pub repo: Option<PathBuf>,
    /// Manifest filename override.
    pub sets_file: Option<String>,
}

impl Settings {
    /// Resolve settings from the CLI flag, environment, and config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no repo is configured anywhere, the configured
    /// repo is not an existing directory, or the config file is malformed.
    pub fn load(cli_repo: Option<&Path>) -> Result<Self> {
        let env_repo = std::env::var_os(REPO_ENV_VAR).map(PathBuf::from);
        let file = read_config_file()?;
        Self::from_sources(cli_repo.map(Path::to_path_buf), env_repo, file)
    }

    /// Pure resolution from already-gathered sources, highest priority first.
    ///
    /// # Errors
    ///
    /// Returns an error if no source supplies a repo or the repo is not an
    /// existing directory.
    pub fn from_sources(
        cli_repo: Option<PathBuf>,
        env_repo: Option<PathBuf>,
        file: ConfigFile,
    ) -> Result<Self> {
        let repo = cli_repo
            .or(env_repo)
            .or(file.repo)
            .with_context(|| {
                format!("no shared repo configured; use --repo, {REPO_ENV_VAR}, or a config file")
            })?;
        if !repo.is_dir() {
            anyhow::bail!("shared repo is not a directory: {}", repo.display());
        }
        Ok(Self {
            repo,
            sets_file: file
                .sets_file
                .unwrap_or_else(|| DEFAULT_SETS_FILE.to_string()),
        })
    }
}

/// Location of the user config file, when a config directory exists.
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("quartermaster").join("config.toml"))
}

/// Read and parse the user config file; absence yields defaults.
fn read_config_file() -> Result<ConfigFile> {
    let Some(path) = config_file_path() else {
        return Ok(ConfigFile::default());
    };
    match std::fs::read_to_string(&path) {
        Ok(raw) => {
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}
