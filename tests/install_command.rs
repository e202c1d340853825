#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the install flow: discovery, resolution, set
//! membership, and symlink creation working together against real
//! directories.

mod common;

use common::Fixture;

use quartermaster_cli::discovery;
use quartermaster_cli::item::ItemKind;
use quartermaster_cli::linker::{self, LinkOutcome};
use quartermaster_cli::manifest::{DEFAULT_SETS_FILE, add_to_set};
use quartermaster_cli::ops;
use quartermaster_cli::resolve;

// ---------------------------------------------------------------------------
// Single items
// ---------------------------------------------------------------------------

/// Installing a discovered skill creates a symlink under `.pi/skills/` whose
/// destination is the shared repo directory; a second install is a no-op.
#[cfg(unix)]
#[test]
fn install_single_skill_end_to_end() {
    let fx = Fixture::new();
    let skill_dir = fx.add_skill("writing-helper");

    let resolved = resolve::resolve_install(
        ItemKind::Skills,
        "writing-helper",
        fx.repo_path(),
        fx.cwd(),
        fx.home_path(),
    )
    .unwrap();
    assert_eq!(resolved.source, skill_dir);

    assert_eq!(
        linker::link_item(&resolved.source, &resolved.target).unwrap(),
        LinkOutcome::Linked
    );
    assert_eq!(std::fs::read_link(&resolved.target).unwrap(), skill_dir);

    assert_eq!(
        linker::link_item(&resolved.source, &resolved.target).unwrap(),
        LinkOutcome::AlreadyLinked
    );
}

/// An external absolute path installs under the kind directory using only
/// its basename.
#[cfg(unix)]
#[test]
fn install_external_path_collapses_to_basename() {
    let fx = Fixture::new();
    let external = tempfile::tempdir().unwrap();
    let source = external.path().join("deep").join("thing.ts");
    std::fs::create_dir_all(source.parent().unwrap()).unwrap();
    std::fs::write(&source, "export {};\n").unwrap();

    let resolved = resolve::resolve_install(
        ItemKind::Extensions,
        source.to_str().unwrap(),
        fx.repo_path(),
        fx.cwd(),
        fx.home_path(),
    )
    .unwrap();
    assert_eq!(resolved.target, fx.local_root().join("extensions").join("thing.ts"));

    assert_eq!(
        linker::link_item(&resolved.source, &resolved.target).unwrap(),
        LinkOutcome::Linked
    );
    assert_eq!(std::fs::read_link(&resolved.target).unwrap(), source);
}

/// A pre-existing regular file at the target is left untouched.
#[test]
fn install_never_overwrites_real_files() {
    let fx = Fixture::new();
    fx.add_prompt("p.md");

    let resolved = resolve::resolve_install(
        ItemKind::Prompts,
        "p.md",
        fx.repo_path(),
        fx.cwd(),
        fx.home_path(),
    )
    .unwrap();
    std::fs::create_dir_all(resolved.target.parent().unwrap()).unwrap();
    std::fs::write(&resolved.target, b"precious local edits").unwrap();

    let outcome = linker::link_item(&resolved.source, &resolved.target).unwrap();
    assert!(outcome.is_failure());
    assert_eq!(
        std::fs::read(&resolved.target).unwrap(),
        b"precious local edits"
    );
}

// ---------------------------------------------------------------------------
// Sets
// ---------------------------------------------------------------------------

/// The `writer` set scenario: one skill plus one prompt install as exactly
/// two symlinks whose destinations are the shared repo's absolute paths.
#[cfg(unix)]
#[test]
fn install_set_writer_end_to_end() {
    let fx = Fixture::new();
    let skill_dir = fx.add_skill("writing-helper");
    let prompt = fx.add_prompt("summaries/brief.md");

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
        "summaries/brief.md",
    )
    .unwrap();

    let reports = ops::install_set(
        fx.repo_path(),
        DEFAULT_SETS_FILE,
        "writer",
        fx.cwd(),
        fx.home_path(),
    )
    .unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.outcome == LinkOutcome::Linked));

    let skill_link = fx.local_root().join("skills").join("writing-helper");
    let prompt_link = fx
        .local_root()
        .join("prompts")
        .join("summaries")
        .join("brief.md");
    assert_eq!(std::fs::read_link(&skill_link).unwrap(), skill_dir);
    assert_eq!(std::fs::read_link(&prompt_link).unwrap(), prompt);
}

/// One broken item does not stop the rest of the set from installing.
#[cfg(unix)]
#[test]
fn install_set_isolates_item_failures() {
    let fx = Fixture::new();
    fx.add_skill("good");
    add_to_set(fx.repo_path(), DEFAULT_SETS_FILE, "mixed", ItemKind::Skills, "good").unwrap();
    add_to_set(fx.repo_path(), DEFAULT_SETS_FILE, "mixed", ItemKind::Skills, "gone").unwrap();

    let reports = ops::install_set(
        fx.repo_path(),
        DEFAULT_SETS_FILE,
        "mixed",
        fx.cwd(),
        fx.home_path(),
    )
    .unwrap();

    assert_eq!(reports.len(), 2);
    let good = reports.iter().find(|r| r.display == "skills/good").unwrap();
    let gone = reports.iter().find(|r| r.display == "skills/gone").unwrap();
    assert_eq!(good.outcome, LinkOutcome::Linked);
    assert!(matches!(gone.outcome, LinkOutcome::Failed { ref reason } if reason.contains("source not found")));
    assert!(
        fx.local_root().join("skills").join("good").symlink_metadata().is_ok(),
        "healthy item must still be installed"
    );
}

// ---------------------------------------------------------------------------
// Discovery against a realistic repo
// ---------------------------------------------------------------------------

/// Discovery over a populated repo reports each kind's items sorted, with
/// repo-relative forward-slash paths.
#[test]
fn discovery_lists_are_sorted_and_relative() {
    let fx = Fixture::new();
    fx.add_skill("b/c");
    fx.add_skill("a");
    fx.add_extension_file("x.ts");
    let bundled = fx.repo_path().join("extensions").join("y");
    std::fs::create_dir_all(&bundled).unwrap();
    std::fs::write(bundled.join("index.ts"), "export {};\n").unwrap();
    fx.add_prompt("p/q.md");

    let items = discovery::discover_items(fx.repo_path()).unwrap();
    let listing: Vec<String> = ItemKind::ALL
        .iter()
        .flat_map(|kind| items[kind].iter().map(|i| i.path.clone()))
        .collect();
    insta::assert_snapshot!(listing.join("\n"), @r"
    skills/a
    skills/b/c
    extensions/x.ts
    extensions/y
    prompts/p/q.md
    ");
}
