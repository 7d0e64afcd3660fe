//! Interactive configuration: turning a series of choices into a config file.
//!
//! The wizard walks workspace → teams → default team → boards per team →
//! default board → columns per board. Data comes from [`RemoteData`]; the
//! choices come from a [`Selector`], which the binary backs with a terminal
//! prompt and tests back with a script.
//!
//! Nothing is written here. [`assemble_config`] returns the complete record
//! and the caller persists it in one go, so an aborted run leaves the
//! existing config file untouched.

use indexmap::IndexMap;

use crate::asana::RemoteData;
use crate::config::schema::{BoardConfig, ConfigRecord, Defaults, TeamConfig, config_key};
use crate::models::{NamedRef, ProjectRef, TeamRef};
use crate::{Error, Result};

/// Source of the user's choices.
pub trait Selector {
    /// Pick one of `options`. `None` means the user gave up.
    fn choose_one(&mut self, prompt: &str, options: &[NamedRef]) -> Option<NamedRef>;

    /// Pick any number of `options`, in the order given by the user.
    fn choose_many(&mut self, prompt: &str, options: &[NamedRef]) -> Vec<NamedRef>;
}

/// Insert under a derived slug, warning when an earlier entry gets replaced.
fn insert_slugged<V>(
    map: &mut IndexMap<String, V>,
    kind: &str,
    item: &NamedRef,
    value: V,
) -> Result<String> {
    let key = config_key(&item.name);
    if key.is_empty() {
        return Err(Error::InvalidSelection(format!(
            "{kind} \"{}\" has no letters to build a config key from",
            item.name
        )));
    }
    if map.insert(key.clone(), value).is_some() {
        tracing::warn!(
            %kind,
            key = %key,
            name = %item.name,
            "config key collision, keeping the later {kind}"
        );
    }
    Ok(key)
}

fn require_one(
    selector: &mut dyn Selector,
    prompt: &str,
    options: &[NamedRef],
    what: &str,
) -> Result<NamedRef> {
    let choice = selector
        .choose_one(prompt, options)
        .ok_or_else(|| Error::WizardAborted(format!("no {what} selected")))?;
    if !options.contains(&choice) {
        return Err(Error::InvalidSelection(format!(
            "{what} \"{}\" is not one of the offered options",
            choice.name
        )));
    }
    Ok(choice)
}

fn require_many(
    selector: &mut dyn Selector,
    prompt: &str,
    options: &[NamedRef],
    what: &str,
) -> Result<Vec<NamedRef>> {
    let chosen = selector.choose_many(prompt, options);
    if chosen.is_empty() {
        return Err(Error::WizardAborted(format!("no {what} selected")));
    }
    if let Some(stray) = chosen.iter().find(|c| !options.contains(c)) {
        return Err(Error::InvalidSelection(format!(
            "{what} \"{}\" is not one of the offered options",
            stray.name
        )));
    }
    Ok(chosen)
}

/// Run the selection sequence and build the config record.
pub fn assemble_config(
    remote: &dyn RemoteData,
    selector: &mut dyn Selector,
    user_id: &str,
) -> Result<ConfigRecord> {
    let mut record = ConfigRecord::new();

    // Workspace
    let workspaces: Vec<NamedRef> = remote
        .workspace_memberships(user_id)?
        .into_iter()
        .map(|m| m.workspace)
        .collect();
    if workspaces.is_empty() {
        return Err(Error::WizardAborted(
            "the user does not belong to any workspace".to_string(),
        ));
    }
    let workspace = require_one(selector, "Default workspace", &workspaces, "workspace")?;

    // Teams, then the default among them
    let teams = remote.teams(&workspace.gid, user_id)?;
    if teams.is_empty() {
        return Err(Error::WizardAborted(format!(
            "no teams found in workspace \"{}\"",
            workspace.name
        )));
    }
    let chosen_teams = require_many(selector, "Teams to configure", &teams, "team")?;
    let default_team = require_one(selector, "Default team", &chosen_teams, "default team")?;

    let mut default_team_key = None;
    for team in &chosen_teams {
        let key = insert_slugged(
            &mut record.teams,
            "team",
            team,
            TeamConfig {
                id: team.gid.clone(),
            },
        )?;
        if *team == default_team {
            default_team_key = Some(key);
        }
    }

    // Boards of every chosen team form one pool
    let mut board_pool: Vec<ProjectRef> = Vec::new();
    for team in &chosen_teams {
        let boards = remote.projects_by_team(&team.gid)?;
        if boards.is_empty() {
            tracing::debug!(team = %team.name, "team has no boards, skipping");
            continue;
        }
        let chosen = selector.choose_many(&board_prompt(team), &boards);
        if let Some(stray) = chosen.iter().find(|c| !boards.contains(c)) {
            return Err(Error::InvalidSelection(format!(
                "board \"{}\" is not one of the offered options",
                stray.name
            )));
        }
        for board in chosen {
            if !board_pool.contains(&board) {
                board_pool.push(board);
            }
        }
    }
    if board_pool.is_empty() {
        return Err(Error::WizardAborted("no boards selected".to_string()));
    }
    let default_board = require_one(selector, "Default board", &board_pool, "default board")?;

    // Columns per board
    let mut default_board_key = None;
    for board in &board_pool {
        let sections = remote.sections_by_project(&board.gid)?;
        let columns = if sections.is_empty() {
            Vec::new()
        } else {
            let prompt = format!("Columns to show for {}", board.name);
            let chosen = selector.choose_many(&prompt, &sections);
            if let Some(stray) = chosen.iter().find(|c| !sections.contains(c)) {
                return Err(Error::InvalidSelection(format!(
                    "column \"{}\" is not a section of {}",
                    stray.name, board.name
                )));
            }
            chosen.into_iter().map(|s| s.gid).collect()
        };

        let key = insert_slugged(
            &mut record.boards,
            "board",
            board,
            BoardConfig {
                id: board.gid.clone(),
                columns,
            },
        )?;
        if *board == default_board {
            default_board_key = Some(key);
        }
    }

    record.defaults = Defaults {
        workspace_id: Some(workspace.gid),
        team_key: default_team_key,
        board_key: default_board_key,
    };

    Ok(record)
}

fn board_prompt(team: &TeamRef) -> String {
    format!("Boards to configure from {}", team.name)
}
