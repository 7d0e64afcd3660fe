//! Loading, querying and persisting config.ini.
//!
//! A [`ConfigStore`] owns the parsed configuration and the path it came from.
//! It is loaded explicitly, handed by reference to whatever needs defaults,
//! and reloaded explicitly after the wizard rewrites the file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::{self, BoardConfig, ConfigRecord, TeamConfig, is_numeric_id};
use crate::{Error, Result};

/// Parsed configuration bound to its backing file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    record: ConfigRecord,
}

/// Read and parse a config file. A missing file is an empty record.
fn read_record(path: &Path) -> Result<ConfigRecord> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using empty configuration");
            return Ok(ConfigRecord::new());
        }
        Err(e) => return Err(e.into()),
    };

    ConfigRecord::parse(&text).map_err(|e| Error::ConfigParse {
        path: path.display().to_string(),
        line: e.line,
        message: e.message,
    })
}

/// Write a record to `path`, replacing the whole file.
///
/// Parent directories are created as needed. Nothing from an existing file
/// survives: the caller must pass the complete record.
pub fn write(record: &ConfigRecord, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    record
        .to_ini()
        .write_to_file_opt(path, schema::write_option())?;
    tracing::info!(
        path = %path.display(),
        teams = record.teams.len(),
        boards = record.boards.len(),
        "wrote configuration"
    );
    Ok(())
}

impl ConfigStore {
    /// Load the config file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let record = read_record(&path)?;
        Ok(Self { path, record })
    }

    /// Load the config file from its default location.
    pub fn load_default() -> Result<Self> {
        Self::load(crate::config::config_path()?)
    }

    /// Build a store from an in-memory record without touching disk.
    pub fn from_record(path: impl Into<PathBuf>, record: ConfigRecord) -> Self {
        Self {
            path: path.into(),
            record,
        }
    }

    /// Re-read the backing file, replacing the in-memory state.
    ///
    /// On error the previous state is kept.
    pub fn reload(&mut self) -> Result<()> {
        self.record = read_record(&self.path)?;
        Ok(())
    }

    /// Overwrite the backing file with `record` and reload from it.
    pub fn replace(&mut self, record: &ConfigRecord) -> Result<()> {
        write(record, &self.path)?;
        self.reload()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn record(&self) -> &ConfigRecord {
        &self.record
    }

    pub fn default_workspace(&self) -> Option<&str> {
        self.record.defaults.workspace_id.as_deref()
    }

    pub fn default_team_key(&self) -> Option<&str> {
        self.record.defaults.team_key.as_deref()
    }

    pub fn default_board_key(&self) -> Option<&str> {
        self.record.defaults.board_key.as_deref()
    }

    /// Look up a team by slug, or by gid when `key` is numeric.
    pub fn team_config(&self, key: &str) -> Option<&TeamConfig> {
        if is_numeric_id(key) {
            self.record.teams.values().find(|team| team.id == key)
        } else {
            self.record.teams.get(key)
        }
    }

    /// Look up a board by slug, or by gid when `key` is numeric.
    pub fn board_config(&self, key: &str) -> Option<&BoardConfig> {
        if is_numeric_id(key) {
            self.record.boards.values().find(|board| board.id == key)
        } else {
            self.record.boards.get(key)
        }
    }

    /// Configured team slugs in file order.
    pub fn team_keys(&self) -> Vec<&str> {
        self.record.teams.keys().map(String::as_str).collect()
    }

    /// Configured board slugs in file order.
    pub fn board_keys(&self) -> Vec<&str> {
        self.record.boards.keys().map(String::as_str).collect()
    }
}
