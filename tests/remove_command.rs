#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the remove flow and the installed-set scanner.

mod common;

use common::Fixture;

use quartermaster_cli::installed;
use quartermaster_cli::item::ItemKind;
use quartermaster_cli::linker::{self, LinkOutcome};
use quartermaster_cli::manifest::{DEFAULT_SETS_FILE, add_to_set};
use quartermaster_cli::ops;
use quartermaster_cli::resolve;

/// Install then remove a prompt: the symlink disappears, the shared source
/// survives, and a second removal reports `missing`.
#[cfg(unix)]
#[test]
fn remove_single_item_is_idempotent() {
    let fx = Fixture::new();
    let prompt = fx.add_prompt("p.md");

    let install = resolve::resolve_install(
        ItemKind::Prompts,
        "p.md",
        fx.repo_path(),
        fx.cwd(),
        fx.home_path(),
    )
    .unwrap();
    linker::link_item(&install.source, &install.target).unwrap();

    let remove =
        resolve::resolve_remove(ItemKind::Prompts, "p.md", fx.cwd(), fx.home_path()).unwrap();
    assert_eq!(remove.target, install.target);

    assert_eq!(linker::remove_item(&remove.target).unwrap(), LinkOutcome::Removed);
    assert!(remove.target.symlink_metadata().is_err());
    assert!(prompt.is_file(), "shared source must never be touched");

    assert_eq!(linker::remove_item(&remove.target).unwrap(), LinkOutcome::Missing);
}

/// Removing a set unlinks every member and is idempotent across runs.
#[cfg(unix)]
#[test]
fn remove_set_end_to_end() {
    let fx = Fixture::new();
    fx.add_skill("writing-helper");
    fx.add_prompt("brief.md");
    add_to_set(
        fx.repo_path(),
        DEFAULT_SETS_FILE,
        "writer",
        ItemKind::Skills,
        "writing-helper",
    )
    .unwrap();
    add_to_set(
        fx.repo_path(),
        DEFAULT_SETS_FILE,
        "writer",
        ItemKind::Prompts,
        "brief.md",
    )
    .unwrap();

    ops::install_set(fx.repo_path(), DEFAULT_SETS_FILE, "writer", fx.cwd(), fx.home_path())
        .unwrap();

    let reports =
        ops::remove_set(fx.repo_path(), DEFAULT_SETS_FILE, "writer", fx.cwd(), fx.home_path())
            .unwrap();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.outcome == LinkOutcome::Removed));

    let again =
        ops::remove_set(fx.repo_path(), DEFAULT_SETS_FILE, "writer", fx.cwd(), fx.home_path())
            .unwrap();
    assert!(again.iter().all(|r| r.outcome == LinkOutcome::Missing));
}

/// Removal refuses to delete a real file sitting where a symlink was
/// expected, and the refusal does not abort the rest of the set.
#[cfg(unix)]
#[test]
fn remove_set_refuses_real_files_but_continues() {
    let fx = Fixture::new();
    fx.add_prompt("real.md");
    fx.add_prompt("linked.md");
    add_to_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", ItemKind::Prompts, "real.md").unwrap();
    add_to_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", ItemKind::Prompts, "linked.md").unwrap();

    // One target is a real file, the other a proper symlink.
    let prompts = fx.local_root().join("prompts");
    std::fs::create_dir_all(&prompts).unwrap();
    std::fs::write(prompts.join("real.md"), b"local data").unwrap();
    std::os::unix::fs::symlink(
        fx.repo_path().join("prompts").join("linked.md"),
        prompts.join("linked.md"),
    )
    .unwrap();

    let reports =
        ops::remove_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", fx.cwd(), fx.home_path()).unwrap();

    let real = reports.iter().find(|r| r.display == "prompts/real.md").unwrap();
    let linked = reports.iter().find(|r| r.display == "prompts/linked.md").unwrap();
    assert!(real.outcome.is_failure());
    assert_eq!(linked.outcome, LinkOutcome::Removed);
    assert_eq!(std::fs::read(prompts.join("real.md")).unwrap(), b"local data");
}

/// The scanner reports exactly the symlinks the install flow created.
#[cfg(unix)]
#[test]
fn scanner_matches_installed_state() {
    let fx = Fixture::new();
    fx.add_skill("helper");
    fx.add_prompt("deep/note.md");
    add_to_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", ItemKind::Skills, "helper").unwrap();
    add_to_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", ItemKind::Prompts, "deep/note.md").unwrap();

    ops::install_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", fx.cwd(), fx.home_path()).unwrap();

    let by_kind = installed::list_installed(fx.cwd()).unwrap();
    assert_eq!(by_kind[&ItemKind::Skills], vec!["skills/helper"]);
    assert_eq!(by_kind[&ItemKind::Prompts], vec!["prompts/deep/note.md"]);
    assert!(by_kind[&ItemKind::Extensions].is_empty());
    assert!(by_kind[&ItemKind::Tools].is_empty());

    ops::remove_set(fx.repo_path(), DEFAULT_SETS_FILE, "s", fx.cwd(), fx.home_path()).unwrap();
    let after = installed::list_installed(fx.cwd()).unwrap();
    assert!(after.values().all(Vec::is_empty));
}
