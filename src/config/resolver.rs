//! Name-to-gid mapping and precedence resolution.
//!
//! ## Identifier resolution
//!
//! Teams and boards can be named on the command line either by their Asana
//! gid or by the slug they were given in config.ini:
//!
//! 1. A string made only of digits is a gid and is returned as is
//! 2. A configured slug is replaced by its `Id`
//! 3. Anything else is passed through unchanged and left for the API to reject
//!
//! ## Token Precedence (highest to lowest)
//!
//! 1. `--token` CLI flag
//! 2. `ASANA_TOKEN` environment variable
//!
//! ## Default Precedence (highest to lowest)
//!
//! 1. CLI flags (`--workspace`, `--team`, `--board`)
//! 2. `[defaults]` in config.ini

use crate::config::schema::is_numeric_id;
use crate::config::store::ConfigStore;
use crate::{Error, Result};
use serde::Serialize;

/// Environment variable name for the Asana personal access token.
pub const ASANA_TOKEN_ENV: &str = "ASANA_TOKEN";

/// The kinds of resource that config.ini keeps a name directory for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Team,
    Board,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Team => write!(f, "team"),
            ResourceKind::Board => write!(f, "board"),
        }
    }
}

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.ini `[defaults]`
    Config,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::Config => write!(f, "config"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// A resolved board gid plus the column layout configured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBoard {
    pub id: Resolved<String>,

    /// Section gids from `Columns`, empty when the board is not configured
    pub columns: Vec<String>,
}

/// CLI overrides for default resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Workspace gid from `--workspace`
    pub workspace: Option<String>,
    /// Team slug or gid from `--team`
    pub team: Option<String>,
    /// Board slug or gid from `--board`
    pub board: Option<String>,
}

impl ConfigOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set workspace override.
    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = Some(workspace.into());
        self
    }

    /// Set team override.
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// Set board override.
    pub fn with_board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }
}

/// Map a slug or gid to a gid.
///
/// Digit-only input is always treated as a gid. A slug found in config.ini
/// maps to its `Id`; an unknown name comes back unchanged.
pub fn resolve_id(store: &ConfigStore, kind: ResourceKind, name_or_id: &str) -> String {
    if is_numeric_id(name_or_id) {
        return name_or_id.to_string();
    }

    let configured = match kind {
        ResourceKind::Team => store.team_config(name_or_id).map(|t| t.id.as_str()),
        ResourceKind::Board => store.board_config(name_or_id).map(|b| b.id.as_str()),
    };

    match configured {
        Some(id) => id.to_string(),
        None => {
            tracing::debug!(%kind, name = name_or_id, "not a configured key, passing through");
            name_or_id.to_string()
        }
    }
}

/// Resolve a default key from `[defaults]`, warning when it names no section.
fn resolve_default_key(store: &ConfigStore, kind: ResourceKind, key: &str) -> String {
    let known = match kind {
        ResourceKind::Team => store.team_config(key).is_some(),
        ResourceKind::Board => store.board_config(key).is_some(),
    };
    if !known && !is_numeric_id(key) {
        tracing::warn!(
            %kind,
            key,
            "default {kind} has no [{kind}.{key}] section, using it as an id"
        );
    }
    resolve_id(store, kind, key)
}

/// Resolve the workspace gid: `--workspace` > `DefaultWorkspace`.
pub fn resolve_workspace(
    store: &ConfigStore,
    overrides: &ConfigOverrides,
) -> Result<Resolved<String>> {
    if let Some(ref workspace) = overrides.workspace {
        return Ok(Resolved::new(workspace.clone(), ValueSource::CliFlag));
    }
    if let Some(workspace) = store.default_workspace() {
        return Ok(Resolved::new(workspace.to_string(), ValueSource::Config));
    }
    Err(Error::MissingDefault {
        what: "workspace",
        flag: "--workspace",
    })
}

/// Resolve the team gid: `--team` > `DefaultTeam`.
pub fn resolve_team(store: &ConfigStore, overrides: &ConfigOverrides) -> Result<Resolved<String>> {
    if let Some(ref team) = overrides.team {
        let id = resolve_id(store, ResourceKind::Team, team);
        return Ok(Resolved::new(id, ValueSource::CliFlag));
    }
    if let Some(key) = store.default_team_key() {
        let id = resolve_default_key(store, ResourceKind::Team, key);
        return Ok(Resolved::new(id, ValueSource::Config));
    }
    Err(Error::MissingDefault {
        what: "team",
        flag: "--team",
    })
}

/// Resolve the board gid and its configured columns: `--board` > `DefaultBoard`.
pub fn resolve_board(store: &ConfigStore, overrides: &ConfigOverrides) -> Result<ResolvedBoard> {
    let (key, id) = if let Some(ref board) = overrides.board {
        let id = resolve_id(store, ResourceKind::Board, board);
        (board.as_str(), Resolved::new(id, ValueSource::CliFlag))
    } else if let Some(key) = store.default_board_key() {
        let id = resolve_default_key(store, ResourceKind::Board, key);
        (key, Resolved::new(id, ValueSource::Config))
    } else {
        return Err(Error::MissingDefault {
            what: "board",
            flag: "--board",
        });
    };

    let columns = store
        .board_config(key)
        .or_else(|| store.board_config(&id.value))
        .map(|b| b.columns.clone())
        .unwrap_or_default();

    Ok(ResolvedBoard { id, columns })
}

/// Resolve the API token: `--token` > `ASANA_TOKEN`.
pub fn resolve_token(flag: Option<&str>) -> Result<Resolved<String>> {
    resolve_token_with_env(flag, std::env::var(ASANA_TOKEN_ENV).ok())
}

fn resolve_token_with_env(flag: Option<&str>, env: Option<String>) -> Result<Resolved<String>> {
    if let Some(token) = flag.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(Resolved::new(token.to_string(), ValueSource::CliFlag));
    }
    if let Some(token) = env.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        return Ok(Resolved::new(
            token,
            ValueSource::EnvVar(ASANA_TOKEN_ENV.to_string()),
        ));
    }
    Err(Error::MissingToken)
}

/// Mask a token for display, keeping only the first and last 4 characters.
///
/// Tokens of 12 characters or fewer are masked completely.
pub fn masked_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        "****".to_string()
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
