use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, TargetOpts};
use crate::config::Settings;
use crate::item::ItemKind;
use crate::linker;
use crate::logging::Logger;
use crate::ops::{self, ItemReport};
use crate::resolve;

/// Run the remove command for a single item or a whole set.
///
/// Removal is idempotent: absent targets report `missing`, not an error.
///
/// # Errors
///
/// Returns an error for invalid input paths, an absent manifest, or an
/// unknown set name. Refused per-item removals (target is not a symlink) are
/// reported in the itemized output.
pub fn run(global: &GlobalOpts, opts: &TargetOpts, log: &Logger) -> Result<()> {
    let cwd = std::env::current_dir().context("resolving current directory")?;
    let home = dirs::home_dir().context("resolving home directory")?;

    let reports = if opts.kind == "set" {
        let settings = Settings::load(global.repo.as_deref())?;
        log.stage(&format!("Removing set '{}'", opts.name));
        ops::remove_set(&settings.repo, &settings.sets_file, &opts.name, &cwd, &home)?
    } else {
        let kind: ItemKind = opts.kind.parse()?;
        let resolved = resolve::resolve_remove(kind, &opts.name, &cwd, &home)?;
        log.debug(&format!("removing {}", resolved.target.display()));
        let outcome = linker::remove_item(&resolved.target)?;
        vec![ItemReport {
            display: resolved.display,
            outcome,
        }]
    };

    super::print_report(&reports);
    log.info(&super::summarize(&reports));
    Ok(())
}
