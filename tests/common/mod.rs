//! Shared fixtures for integration tests.
#![allow(dead_code, clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use quartermaster_cli::manifest::DEFAULT_SETS_FILE;

/// A scratch shared repo, project working directory, and home directory.
pub struct Fixture {
    pub repo: TempDir,
    pub project: TempDir,
    pub home: TempDir,
}

impl Fixture {
    /// Create empty scratch directories.
    pub fn new() -> Self {
        Self {
            repo: TempDir::new().expect("create repo dir"),
            project: TempDir::new().expect("create project dir"),
            home: TempDir::new().expect("create home dir"),
        }
    }

    pub fn repo_path(&self) -> &Path {
        self.repo.path()
    }

    pub fn cwd(&self) -> &Path {
        self.project.path()
    }

    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// The project's local install root (`<cwd>/.pi`).
    pub fn local_root(&self) -> PathBuf {
        self.project.path().join(".pi")
    }

    /// Add a skill directory `skills/<name>` with its `SKILL.md` marker.
    pub fn add_skill(&self, name: &str) -> PathBuf {
        let dir = self.repo.path().join("skills").join(name);
        std::fs::create_dir_all(&dir).expect("create skill dir");
        std::fs::write(dir.join("SKILL.md"), format!("# {name}\n")).expect("write marker");
        dir
    }

    /// Add a prompt file at `prompts/<rel>` (forward-slash relative path).
    pub fn add_prompt(&self, rel: &str) -> PathBuf {
        let mut path = self.repo.path().join("prompts");
        for seg in rel.split('/') {
            path = path.join(seg);
        }
        std::fs::create_dir_all(path.parent().unwrap()).expect("create prompt parent");
        std::fs::write(&path, "prompt body\n").expect("write prompt");
        path
    }

    /// Add an extension file `extensions/<name>`.
    pub fn add_extension_file(&self, name: &str) -> PathBuf {
        let dir = self.repo.path().join("extensions");
        std::fs::create_dir_all(&dir).expect("create extensions dir");
        let path = dir.join(name);
        std::fs::write(&path, "export {};\n").expect("write extension");
        path
    }

    /// Write a raw manifest body into the repo under the default filename.
    pub fn write_manifest(&self, body: &str) {
        std::fs::write(self.repo.path().join(DEFAULT_SETS_FILE), body)
            .expect("write manifest");
    }

    /// Read the manifest file back as text.
    pub fn read_manifest(&self) -> String {
        std::fs::read_to_string(self.repo.path().join(DEFAULT_SETS_FILE))
            .expect("read manifest")
    }
}
