//! Item kinds managed by the installer.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;

/// The closed set of installable item kinds.
///
/// Declaration order is the display order used by listings, reports, and the
/// manifest's per-kind item arrays.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemKind {
    /// Skill directories (marked by a `SKILL.md` file).
    Skills,
    /// Extension modules (`.ts`/`.js` files or module directories).
    Extensions,
    /// Tool modules (same detection rules as extensions).
    Tools,
    /// Prompt templates (`.md` files).
    Prompts,
}

impl ItemKind {
    /// All kinds, in display order.
    pub const ALL: [Self; 4] = [Self::Skills, Self::Extensions, Self::Tools, Self::Prompts];

    /// Directory name for this kind, both under the shared repo and under
    /// the local `.pi` root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Extensions => "extensions",
            Self::Tools => "tools",
            Self::Prompts => "prompts",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Error returned when a string does not name an [`ItemKind`].
#[derive(Debug, thiserror::Error)]
#[error("unknown item type '{0}' (expected one of: skills, extensions, tools, prompts)")]
pub struct UnknownKind(String);

impl FromStr for ItemKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skills" => Ok(Self::Skills),
            "extensions" => Ok(Self::Extensions),
            "tools" => Ok(Self::Tools),
            "prompts" => Ok(Self::Prompts),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// A single installable item found in the shared repo.
///
/// Produced fresh on every discovery call and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredItem {
    /// Repo-relative path with forward slashes (e.g. `skills/foo`).
    pub path: String,
    /// Absolute filesystem path of the item.
    pub absolute_path: PathBuf,
    /// The kind this item was discovered as.
    pub kind: ItemKind,
}
