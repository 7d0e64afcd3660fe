//! Common test utilities for asa integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch
//! the user's `~/.config/asa/` directory.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
pub use tempfile::TempDir;

/// A sample configuration with every default set.
pub const SAMPLE_CONFIG: &str = "\
[defaults]
DefaultWorkspace = 100
DefaultTeam = platform
DefaultBoard = sprint

[team.platform]
Id = 200

[board.sprint]
Id = 300
Columns = 11,12
";

/// A test environment with an isolated config directory.
///
/// The `asa()` method returns a `Command` that sets `ASA_CONFIG_DIR`
/// per-invocation and clears `ASANA_TOKEN`, making tests parallel-safe
/// and independent of the caller's shell.
pub struct TestEnv {
    pub config_dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment without a config file.
    pub fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a new test environment holding `text` as config.ini.
    pub fn with_config(text: &str) -> Self {
        let env = Self::new();
        fs::write(env.config_path(), text).unwrap();
        env
    }

    /// Get a Command for the asa binary with an isolated config directory.
    pub fn asa(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_asa"));
        cmd.env("ASA_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("ASANA_TOKEN");
        cmd.env_remove("RUST_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Path of config.ini inside the test directory.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.ini")
    }

    pub fn config_dir_path(&self) -> &Path {
        self.config_dir.path()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
