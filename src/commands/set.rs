use anyhow::Result;

use crate::cli::{GlobalOpts, SetAction, SetOpts};
use crate::config::Settings;
use crate::logging::Logger;
use crate::manifest::{self, AddOutcome, RemoveOutcome};

/// Run the set command: add or remove a manifest set member.
///
/// Both actions rewrite the manifest even on a no-op, so its normalization
/// stays consistent.
///
/// # Errors
///
/// Returns an error for configuration problems, invalid (external or empty)
/// paths, a blank set name, or (for `remove`) an absent manifest.
pub fn run(global: &GlobalOpts, opts: &SetOpts, log: &Logger) -> Result<()> {
    let settings = Settings::load(global.repo.as_deref())?;

    match &opts.action {
        SetAction::Add { set, kind, path } => {
            let outcome =
                manifest::add_to_set(&settings.repo, &settings.sets_file, set, *kind, path)?;
            match outcome {
                AddOutcome::Added => {
                    log.info(&format!("added {kind} item '{path}' to set '{set}'"));
                }
                AddOutcome::AlreadyPresent => {
                    log.info(&format!("{kind} item '{path}' already in set '{set}'"));
                }
            }
        }
        SetAction::Remove { set, kind, path } => {
            let outcome =
                manifest::remove_from_set(&settings.repo, &settings.sets_file, set, *kind, path)?;
            match outcome {
                RemoveOutcome::Removed => {
                    log.info(&format!("removed {kind} item '{path}' from set '{set}'"));
                }
                RemoveOutcome::NotPresent => {
                    log.info(&format!("{kind} item '{path}' not in set '{set}'"));
                }
            }
        }
    }
    Ok(())
}
