//! Quartermaster — symlink-based installer for shared prompt-engineering assets.
//!
//! Discovers typed items (skills, extensions, tools, prompts) in a shared
//! source directory, tracks named groupings ("sets") of those items in a JSON
//! manifest, and installs/removes them into a project's `.pi` directory via
//! filesystem symlinks.
//!
//! The public API is organised into three layers:
//!
//! - core engine — [`resolve`], [`discovery`], [`manifest`], [`linker`],
//!   [`installed`], and the set-level driver in [`ops`]
//! - **[`config`]** — resolve the shared repo location and manifest filename
//! - **[`commands`]** — top-level subcommand orchestration (`list`,
//!   `install`, `remove`, `set`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod error;
pub mod installed;
pub mod item;
pub mod linker;
pub mod logging;
pub mod manifest;
pub mod ops;
pub mod resolve;
