//! asa - browse Asana workspaces, teams, boards and tasks from the terminal.
//!
//! This library provides the core functionality for the `asa` CLI tool:
//! resolving human-friendly names to Asana identifiers through a persisted
//! configuration file, assembling that file interactively, and grouping
//! task lists into board columns.

pub mod asana;
pub mod cli;
pub mod commands;
pub mod config;
pub mod grouping;
pub mod models;
pub mod render;
pub mod wizard;

/// Test utilities for isolated config directories.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    use crate::config::{CONFIG_FILE_NAME, ConfigRecord, ConfigStore};

    /// A temporary configuration directory.
    ///
    /// Tests write config files here and open a [`ConfigStore`] on them
    /// directly, so nothing touches the user's real `~/.config/asa/`.
    pub struct TestConfig {
        pub dir: TempDir,
    }

    impl TestConfig {
        pub fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        /// Path of the config file inside the temp directory.
        pub fn path(&self) -> PathBuf {
            self.dir.path().join(CONFIG_FILE_NAME)
        }

        /// Write raw text to the config file.
        pub fn write_raw(&self, text: &str) {
            std::fs::write(self.path(), text).unwrap();
        }

        /// Persist a record and load a store on top of it.
        pub fn store_with(&self, record: &ConfigRecord) -> ConfigStore {
            crate::config::write(record, &self.path()).unwrap();
            ConfigStore::load(self.path()).unwrap()
        }

        /// Load a store on whatever is currently at the config path.
        pub fn store(&self) -> ConfigStore {
            ConfigStore::load(self.path()).unwrap()
        }

        pub fn dir_path(&self) -> &Path {
            self.dir.path()
        }
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Library-level error type for asa operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file {path} (line {line}): {message}")]
    ConfigParse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error(transparent)]
    Api(#[from] asana::ApiError),

    #[error("No Asana token: pass --token or set the ASANA_TOKEN environment variable")]
    MissingToken,

    #[error("No {what} given and no default configured: pass {flag} or run `asa config --init`")]
    MissingDefault { what: &'static str, flag: &'static str },

    #[error("Configuration aborted: {0}")]
    WizardAborted(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Failed to open browser: {0}")]
    Browser(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for asa operations.
pub type Result<T> = std::result::Result<T, Error>;
