//! Schema definitions for config.ini.
//!
//! This module provides:
//! - Rust structs representing the persisted configuration
//! - Parsing and serialization of the layered `[section]` / `key = value` format
//! - Slug derivation for team and board keys
//!
//! # Format
//!
//! ```ini
//! [defaults]
//! DefaultWorkspace = 1200000000000001
//! DefaultTeam = engineering
//! DefaultBoard = sprint_board
//!
//! [team.engineering]
//! Id = 1200000000000002
//!
//! [board.sprint_board]
//! Id = 1200000000000003
//! Columns = 1200000000000010,1200000000000011
//! ```

use indexmap::IndexMap;
use ini::{Ini, ParseOption, WriteOption};
use serde::Serialize;

pub const DEFAULTS_SECTION: &str = "defaults";
pub const TEAM_SECTION_PREFIX: &str = "team.";
pub const BOARD_SECTION_PREFIX: &str = "board.";

pub const KEY_DEFAULT_WORKSPACE: &str = "DefaultWorkspace";
pub const KEY_DEFAULT_TEAM: &str = "DefaultTeam";
pub const KEY_DEFAULT_BOARD: &str = "DefaultBoard";
pub const KEY_ID: &str = "Id";
pub const KEY_COLUMNS: &str = "Columns";

/// Values under `[defaults]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Defaults {
    /// Workspace gid used when `--workspace` is not given
    pub workspace_id: Option<String>,

    /// Key of a `[team.*]` section used when `--team` is not given
    pub team_key: Option<String>,

    /// Key of a `[board.*]` section used when `--board` is not given
    pub board_key: Option<String>,
}

impl Defaults {
    pub fn is_empty(&self) -> bool {
        self.workspace_id.is_none() && self.team_key.is_none() && self.board_key.is_none()
    }
}

/// A `[team.<slug>]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamConfig {
    pub id: String,
}

/// A `[board.<slug>]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    pub id: String,

    /// Section gids shown for this board, left to right
    pub columns: Vec<String>,
}

/// The whole persisted configuration.
///
/// Team and board sections keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConfigRecord {
    pub defaults: Defaults,
    pub teams: IndexMap<String, TeamConfig>,
    pub boards: IndexMap<String, BoardConfig>,
}

/// A syntax error in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl ParseError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Derive a config key from a display name.
///
/// Lowercases, turns spaces into underscores, then drops everything that is
/// not an ASCII lowercase letter or underscore: `"Q3 Roadmap!"` becomes `"q_roadmap"`.
pub fn config_key(display_name: &str) -> String {
    display_name
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || *c == '_')
        .collect()
}

/// True when `s` is non-empty and made only of ASCII digits, i.e. an Asana gid.
pub fn is_numeric_id(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Section name to lowercased key/value pairs, in file order.
type Sections = IndexMap<String, IndexMap<String, String>>;

/// Options for reading config.ini: indented lines continue the previous value.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_indented_mutiline_value: true,
        ..ParseOption::default()
    }
}

/// Options for writing config.ini.
pub fn write_option() -> WriteOption {
    WriteOption {
        kv_separator: " = ",
        ..WriteOption::default()
    }
}

/// Line of the first key that sits before any section header.
fn first_content_line(text: &str) -> usize {
    text.lines()
        .position(|l| {
            let l = l.trim();
            !l.is_empty() && !l.starts_with('#') && !l.starts_with(';')
        })
        .map_or(1, |i| i + 1)
}

/// Merge repeated sections and keys, later values winning.
fn merged_sections(doc: &Ini) -> Sections {
    let mut sections = Sections::new();
    for (name, props) in doc.iter() {
        let Some(name) = name else { continue };
        let section = sections.entry(name.trim().to_lowercase()).or_default();
        for (key, value) in props.iter() {
            section.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }
    sections
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

impl ConfigRecord {
    /// Create an empty record: no defaults, no teams, no boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config file text.
    ///
    /// Keys before the first section header are an error, reported at the
    /// line of the first such key.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let doc = Ini::load_from_str_opt(text, parse_option())
            .map_err(|e| ParseError::new(e.line, e.msg.to_string()))?;

        if doc.general_section().iter().next().is_some() {
            return Err(ParseError::new(
                first_content_line(text),
                "key/value pair outside of any section",
            ));
        }

        Ok(Self::from_ini(&doc))
    }

    /// Build a record from a parsed INI document.
    ///
    /// Section names and keys are case-insensitive. Unknown sections and keys
    /// are ignored; team and board sections without an `Id` are skipped.
    pub fn from_ini(doc: &Ini) -> Self {
        let mut record = Self::new();
        let id_key = KEY_ID.to_lowercase();

        for (name, values) in &merged_sections(doc) {
            if name == DEFAULTS_SECTION {
                record.defaults = Defaults {
                    workspace_id: non_empty(values.get(&KEY_DEFAULT_WORKSPACE.to_lowercase())),
                    team_key: non_empty(values.get(&KEY_DEFAULT_TEAM.to_lowercase())),
                    board_key: non_empty(values.get(&KEY_DEFAULT_BOARD.to_lowercase())),
                };
            } else if let Some(key) = name.strip_prefix(TEAM_SECTION_PREFIX) {
                match non_empty(values.get(&id_key)) {
                    Some(id) => {
                        record.teams.insert(key.to_string(), TeamConfig { id });
                    }
                    None => tracing::warn!(section = %name, "skipping team section without Id"),
                }
            } else if let Some(key) = name.strip_prefix(BOARD_SECTION_PREFIX) {
                match non_empty(values.get(&id_key)) {
                    Some(id) => {
                        let columns = values
                            .get(&KEY_COLUMNS.to_lowercase())
                            .map(|v| parse_columns(v))
                            .unwrap_or_default();
                        record
                            .boards
                            .insert(key.to_string(), BoardConfig { id, columns });
                    }
                    None => tracing::warn!(section = %name, "skipping board section without Id"),
                }
            }
        }

        record
    }

    /// Convert the record to an INI document.
    ///
    /// `[defaults]` comes first, then teams and boards in record order.
    pub fn to_ini(&self) -> Ini {
        let mut doc = Ini::new();

        if !self.defaults.is_empty() {
            let mut defaults = doc.with_section(Some(DEFAULTS_SECTION));
            let entries = [
                (KEY_DEFAULT_WORKSPACE, &self.defaults.workspace_id),
                (KEY_DEFAULT_TEAM, &self.defaults.team_key),
                (KEY_DEFAULT_BOARD, &self.defaults.board_key),
            ];
            for (key, value) in entries {
                if let Some(value) = value {
                    defaults.set(key, value.as_str());
                }
            }
        }

        for (key, team) in &self.teams {
            doc.with_section(Some(format!("{TEAM_SECTION_PREFIX}{key}")))
                .set(KEY_ID, team.id.as_str());
        }

        for (key, board) in &self.boards {
            doc.with_section(Some(format!("{BOARD_SECTION_PREFIX}{key}")))
                .set(KEY_ID, board.id.as_str())
                .set(KEY_COLUMNS, board.columns.join(","));
        }

        doc
    }
}

/// Split a `Columns` value on commas and line breaks.
fn parse_columns(value: &str) -> Vec<String> {
    value
        .split([',', '\n'])
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}
