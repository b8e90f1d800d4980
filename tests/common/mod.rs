//! Shared testing utilities for trekplan CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads an API key from.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Testing harness providing an isolated working directory for CLI runs.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Directory the CLI runs in; `trekplan.toml` is looked up here.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for the compiled `trekplan` binary with no API key in its environment.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("trekplan").expect("Failed to locate trekplan binary");
        cmd.current_dir(&self.work_dir).env("HOME", self.home()).env_remove("RUST_LOG");
        for var in API_KEY_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Write `trekplan.toml` into the work directory.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.work_dir.join("trekplan.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Files in `dir`, sorted by name.
    pub fn files_in(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .expect("Failed to read directory")
            .map(|entry| entry.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
