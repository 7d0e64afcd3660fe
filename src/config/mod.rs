//! Configuration for asa.
//!
//! ## config.ini - persisted defaults and the name directory
//!
//! Located at `~/.config/asa/config.ini` (the platform config directory as
//! reported by `dirs::config_dir()`), or under `$ASA_CONFIG_DIR` when set.
//!
//! Contains:
//! - `[defaults]` - default workspace gid, default team key, default board key
//! - `[team.<slug>]` - the gid of each configured team
//! - `[board.<slug>]` - the gid and visible columns of each configured board
//!
//! The file is written in full by `asa config --init` and is read-only for
//! every other command.
//!
//! ## Precedence
//!
//! For tokens: `--token` flag > `ASANA_TOKEN` env var
//! For workspace/team/board: CLI flag > config.ini default
//!
//! Use the [`resolver`] module for name-to-gid mapping and precedence resolution.

pub mod resolver;
pub mod schema;
pub mod store;

use std::path::PathBuf;

use crate::{Error, Result};

pub use resolver::{
    ASANA_TOKEN_ENV, ConfigOverrides, Resolved, ResolvedBoard, ResourceKind, ValueSource,
    resolve_board, resolve_id, resolve_team, resolve_token, resolve_workspace,
};
pub use schema::{BoardConfig, ConfigRecord, Defaults, TeamConfig, config_key, is_numeric_id};
pub use store::{ConfigStore, write};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "ASA_CONFIG_DIR";

/// File name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Directory holding config.ini.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        let trimmed = dir.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir()
        .map(|d| d.join("asa"))
        .ok_or(Error::NoConfigDir)
}

/// Full path of config.ini.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        previous: Option<std::ffi::OsString>,
    }

    impl EnvGuard {
        fn set(value: &str) -> Self {
            let previous = std::env::var_os(CONFIG_DIR_ENV);
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::set_var(CONFIG_DIR_ENV, value) };
            Self { previous }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            // SAFETY: tests touching the environment are serialized.
            unsafe {
                match self.previous.take() {
                    Some(value) => std::env::set_var(CONFIG_DIR_ENV, value),
                    None => std::env::remove_var(CONFIG_DIR_ENV),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_config_path_honors_env_override() {
        let _guard = EnvGuard::set("/tmp/asa-test-config");
        assert_eq!(
            config_path().unwrap(),
            PathBuf::from("/tmp/asa-test-config/config.ini")
        );
    }

    #[test]
    #[serial]
    fn test_blank_env_override_is_ignored() {
        let _guard = EnvGuard::set("   ");
        let path = config_path();
        if let Ok(path) = path {
            assert!(path.ends_with("asa/config.ini"));
        }
    }
}
