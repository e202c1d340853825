use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::item::ItemKind;

/// Version string: release tag when available, Cargo version otherwise.
const VERSION: &str = match option_env!("QUARTERMASTER_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "quartermaster",
    about = "Symlink-based installer for shared skills, extensions, tools, and prompts",
    version = VERSION
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the shared repo directory
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List shared items, sets, or installed symlinks
    List(ListOpts),
    /// Install an item or a whole set into ./.pi
    Install(TargetOpts),
    /// Remove installed symlinks for an item or a whole set
    Remove(TargetOpts),
    /// Manage set membership in the sets manifest
    Set(SetOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
}

/// Options for the `list` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// List sets from the manifest instead of shared items
    #[arg(long, conflicts_with = "installed")]
    pub sets: bool,

    /// List symlinks installed under ./.pi instead of shared items
    #[arg(long)]
    pub installed: bool,
}

/// Target of an `install` or `remove` invocation.
///
/// The first positional is an item type (`skills`, `extensions`, `tools`,
/// `prompts`) or the literal `set`; the second is the item path or set name.
#[derive(Parser, Debug, Clone)]
pub struct TargetOpts {
    /// Item type, or "set" to address a whole set
    pub kind: String,

    /// Item path (repo-relative, ~-relative, or absolute), or the set name
    pub name: String,
}

/// Options for the `set` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SetOpts {
    #[command(subcommand)]
    pub action: SetAction,
}

/// Set membership actions.
#[derive(Subcommand, Debug, Clone)]
pub enum SetAction {
    /// Add an item to a set, creating the manifest and set as needed
    Add {
        /// Set name
        set: String,
        /// Item type
        kind: ItemKind,
        /// Repo-relative item path
        path: String,
    },
    /// Remove an item from a set
    Remove {
        /// Set name
        set: String,
        /// Item type
        kind: ItemKind,
        /// Repo-relative item path
        path: String,
    },
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
