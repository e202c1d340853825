use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, TargetOpts};
use crate::config::Settings;
use crate::item::ItemKind;
use crate::linker;
use crate::logging::Logger;
use crate::ops::{self, ItemReport};
use crate::resolve;

/// Run the install command for a single item or a whole set.
///
/// # Errors
///
/// Returns an error for configuration problems, invalid input paths, an
/// absent manifest, or an unknown set name. Per-item link conflicts are
/// reported in the itemized output, not as command errors.
pub fn run(global: &GlobalOpts, opts: &TargetOpts, log: &Logger) -> Result<()> {
    let settings = Settings::load(global.repo.as_deref())?;
    let cwd = std::env::current_dir().context("resolving current directory")?;
    let home = dirs::home_dir().context("resolving home directory")?;

    let reports = if opts.kind == "set" {
        log.stage(&format!("Installing set '{}'", opts.name));
        ops::install_set(&settings.repo, &settings.sets_file, &opts.name, &cwd, &home)?
    } else {
        let kind: ItemKind = opts.kind.parse()?;
        let resolved = resolve::resolve_install(kind, &opts.name, &settings.repo, &cwd, &home)?;
        log.debug(&format!(
            "linking {} -> {}",
            resolved.target.display(),
            resolved.source.display()
        ));
        let outcome = linker::link_item(&resolved.source, &resolved.target)?;
        vec![ItemReport {
            display: resolved.display,
            outcome,
        }]
    };

    super::print_report(&reports);
    log.info(&super::summarize(&reports));
    Ok(())
}
