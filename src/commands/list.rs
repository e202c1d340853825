use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, ListOpts};
use crate::config::Settings;
use crate::discovery;
use crate::installed;
use crate::item::ItemKind;
use crate::logging::Logger;
use crate::manifest::Manifest;

/// Run the list command: shared items (default), `--sets`, or `--installed`.
///
/// # Errors
///
/// Returns an error for configuration problems or filesystem failures while
/// walking. An absent manifest is reported, not an error.
pub fn run(global: &GlobalOpts, opts: &ListOpts, log: &Logger) -> Result<()> {
    if opts.installed {
        let cwd = std::env::current_dir().context("resolving current directory")?;
        let by_kind = installed::list_installed(&cwd)?;
        for kind in ItemKind::ALL {
            println!("{kind}:");
            for path in by_kind.get(&kind).into_iter().flatten() {
                println!("  {path}");
            }
        }
        return Ok(());
    }

    let settings = Settings::load(global.repo.as_deref())?;

    if opts.sets {
        match Manifest::load(&settings.repo, &settings.sets_file)? {
            None => log.info("no sets manifest found"),
            Some(manifest) => {
                for (name, set) in &manifest.sets {
                    match &set.description {
                        Some(description) => {
                            println!("{name} ({} items) - {description}", set.items.len());
                        }
                        None => println!("{name} ({} items)", set.items.len()),
                    }
                }
            }
        }
        return Ok(());
    }

    log.debug(&format!("discovering items in {}", settings.repo.display()));
    let by_kind = discovery::discover_items(&settings.repo)?;
    for kind in ItemKind::ALL {
        println!("{kind}:");
        for item in by_kind.get(&kind).into_iter().flatten() {
            println!("  {}", item.path);
        }
    }
    Ok(())
}
