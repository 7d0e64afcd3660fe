//! Command implementations for the asa CLI.
//!
//! Each command resolves its arguments against the config store, performs a
//! few reads through [`RemoteData`] and returns a result value that can be
//! printed as JSON or as human-readable text.

use serde::Serialize;

use crate::asana::RemoteData;
use crate::config::resolver::masked_token;
use crate::config::{
    ConfigOverrides, ConfigRecord, ConfigStore, Resolved, ResourceKind, resolve_board,
    resolve_id, resolve_team, resolve_token, resolve_workspace,
};
use crate::grouping::{self, Grouped};
use crate::models::{NamedRef, SectionRef, Task, User, UserRef};
use crate::render::{self, Cell, LINE_SEPARATOR, Table};
use crate::wizard::{self, Selector};
use crate::Result;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
}

fn task_table<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Table {
    let mut table = Table::new(["Task", "Assignee"]);
    for task in tasks {
        table.push(vec![
            Cell::linked(task.name.clone(), task.permalink_url.as_deref()),
            Cell::new(task.assignee_name().unwrap_or("-")),
        ]);
    }
    table
}

// ==================== who ====================

/// Details of one user.
#[derive(Debug, Serialize)]
pub struct WhoResult {
    #[serde(flatten)]
    pub user: User,
}

impl Output for WhoResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let user = &self.user;
        let mut lines = vec![
            LINE_SEPARATOR.to_string(),
            format!("{} {}", render::label("Name: "), user.name),
            format!("{} {}", render::label("Id:   "), user.gid),
        ];
        if let Some(ref email) = user.email {
            lines.push(format!("{} {}", render::label("Email:"), email));
        }
        if let Some(photo) = user.photo.as_ref().and_then(|p| p.image_128x128.as_ref()) {
            lines.push(format!("{} {}", render::label("Photo:"), photo));
        }
        lines.push(LINE_SEPARATOR.to_string());
        lines.join("\n")
    }
}

/// Show a user (`"me"` for the authenticated one).
pub fn who(remote: &dyn RemoteData, user_id: &str) -> Result<WhoResult> {
    Ok(WhoResult {
        user: remote.user(user_id)?,
    })
}

// ==================== teams / boards listings ====================

/// A listed team or board, with its config key when it is configured.
#[derive(Debug, Clone, Serialize)]
pub struct ListedRef {
    #[serde(flatten)]
    pub item: NamedRef,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_key: Option<String>,
}

fn listing_table(items: &[ListedRef]) -> Table {
    let mut table = Table::new(["Name", "Id", "Key"]);
    for listed in items {
        table.push(vec![
            Cell::linked(listed.item.name.clone(), listed.item.permalink_url.as_deref()),
            Cell::new(listed.item.gid.clone()),
            Cell::new(listed.config_key.clone().unwrap_or_default()),
        ]);
    }
    table
}

fn configured_key(store: &ConfigStore, kind: ResourceKind, gid: &str) -> Option<String> {
    let record = store.record();
    match kind {
        ResourceKind::Team => record
            .teams
            .iter()
            .find(|(_, team)| team.id == gid)
            .map(|(key, _)| key.clone()),
        ResourceKind::Board => record
            .boards
            .iter()
            .find(|(_, board)| board.id == gid)
            .map(|(key, _)| key.clone()),
    }
}

/// Teams of a user in a workspace.
#[derive(Debug, Serialize)]
pub struct TeamsResult {
    pub workspace: Resolved<String>,
    pub teams: Vec<ListedRef>,
}

impl Output for TeamsResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.teams.is_empty() {
            return format!("No teams in workspace {}", self.workspace.value);
        }
        listing_table(&self.teams).render(render::links_enabled())
    }
}

/// List the teams `user_id` belongs to in the resolved workspace.
pub fn teams(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
    user_id: &str,
) -> Result<TeamsResult> {
    let workspace = resolve_workspace(store, overrides)?;
    let teams = remote
        .teams(&workspace.value, user_id)?
        .into_iter()
        .map(|team| ListedRef {
            config_key: configured_key(store, ResourceKind::Team, &team.gid),
            item: team,
        })
        .collect();
    Ok(TeamsResult { workspace, teams })
}

/// Members of a team.
#[derive(Debug, Serialize)]
pub struct TeamMembersResult {
    pub team: Resolved<String>,
    pub members: Vec<UserRef>,
}

impl Output for TeamMembersResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.members.is_empty() {
            return format!("No members in team {}", self.team.value);
        }
        let mut table = Table::new(["Name", "Id"]);
        for member in &self.members {
            table.push(vec![Cell::new(member.name.clone()), Cell::new(member.gid.clone())]);
        }
        table.render(render::links_enabled())
    }
}

/// List the members of the resolved team.
pub fn team_members(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
) -> Result<TeamMembersResult> {
    let team = resolve_team(store, overrides)?;
    let members = remote
        .team_members(&team.value)?
        .into_iter()
        .map(|membership| membership.user)
        .collect();
    Ok(TeamMembersResult { team, members })
}

/// Boards of a team.
#[derive(Debug, Serialize)]
pub struct BoardsResult {
    pub team: Resolved<String>,
    pub boards: Vec<ListedRef>,
}

impl Output for BoardsResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.boards.is_empty() {
            return format!("No boards in team {}", self.team.value);
        }
        listing_table(&self.boards).render(render::links_enabled())
    }
}

/// List the boards of the resolved team.
pub fn boards(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
) -> Result<BoardsResult> {
    let team = resolve_team(store, overrides)?;
    let boards = remote
        .projects_by_team(&team.value)?
        .into_iter()
        .map(|board| ListedRef {
            config_key: configured_key(store, ResourceKind::Board, &board.gid),
            item: board,
        })
        .collect();
    Ok(BoardsResult { team, boards })
}

// ==================== board views ====================

/// One column of a board view.
#[derive(Debug, Serialize)]
pub struct ColumnView {
    pub section: SectionRef,
    pub tasks: Vec<Task>,
}

/// Tasks laid out in columns.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub columns: Vec<ColumnView>,
}

impl BoardView {
    fn new(title: String, url: Option<String>, grouped: Grouped) -> Self {
        Self {
            title,
            url,
            columns: grouped
                .into_iter()
                .map(|(section, tasks)| ColumnView { section, tasks })
                .collect(),
        }
    }
}

impl Output for BoardView {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let links = render::links_enabled();
        let title = match (&self.url, links) {
            (Some(url), true) => render::hyperlink(&self.title, url),
            _ => self.title.clone(),
        };
        let mut out = vec![render::heading(&title).to_string()];

        if self.columns.is_empty() {
            out.push("No incomplete tasks".to_string());
        }
        for column in &self.columns {
            out.push(String::new());
            out.push(format!(
                "{} ({})",
                render::label(&column.section.name),
                column.tasks.len()
            ));
            out.push(task_table(&column.tasks).render(links));
        }
        out.join("\n")
    }
}

/// Map column arguments (section gids or names) to section gids.
fn column_ids(grouped: &Grouped, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter_map(|column| {
            let found = grouped
                .keys()
                .find(|s| s.gid == *column || s.name.eq_ignore_ascii_case(column));
            if found.is_none() {
                tracing::warn!(column = %column, "no tasks in a column with this id or name");
            }
            found.map(|s| s.gid.clone())
        })
        .collect()
}

/// Incomplete tasks of the resolved board, in columns.
///
/// Column order comes from `columns` when given, else from the board's
/// configured `Columns`, else from the order sections were discovered in.
/// When none of `columns` match a section the view is empty.
pub fn board(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
    columns: &[String],
) -> Result<BoardView> {
    let resolved = resolve_board(store, overrides)?;
    let board_id = &resolved.id.value;

    let project = remote.project(board_id)?;
    let tasks = remote.project_incomplete_tasks(board_id)?;
    let grouped = grouping::group(&tasks);

    let layout = if columns.is_empty() {
        resolved.columns.clone()
    } else {
        let ids = column_ids(&grouped, columns);
        if ids.is_empty() {
            return Ok(BoardView::new(project.name, project.permalink_url, Grouped::new()));
        }
        ids
    };
    let grouped = grouping::ordered_by_columns(grouped, &layout);

    Ok(BoardView::new(project.name, project.permalink_url, grouped))
}

/// Permalink of the resolved board.
pub fn board_url(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
) -> Result<String> {
    let resolved = resolve_board(store, overrides)?;
    let project = remote.project(&resolved.id.value)?;
    Ok(project
        .permalink_url
        .unwrap_or_else(|| format!("https://app.asana.com/0/{}/list", project.gid)))
}

/// Incomplete tasks from a user's task list, grouped by section.
///
/// `columns` restricts the view to the named sections without reordering.
pub fn my_tasks(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
    user_id: &str,
    columns: &[String],
) -> Result<BoardView> {
    let workspace = resolve_workspace(store, overrides)?;
    let task_list = remote.user_task_list(&workspace.value, user_id)?;
    let tasks = remote.user_incomplete_tasks(&task_list.gid)?;
    let grouped = grouping::group(&tasks);
    let title = if task_list.name.is_empty() {
        "My Tasks".to_string()
    } else {
        task_list.name
    };

    let allowlist = column_ids(&grouped, columns);
    if !columns.is_empty() && allowlist.is_empty() {
        return Ok(BoardView::new(title, None, Grouped::new()));
    }
    Ok(BoardView::new(title, None, grouping::filter(grouped, &allowlist)))
}

// ==================== search ====================

/// Tasks matching a text search within a board.
#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub query: String,
    pub board: Resolved<String>,
    pub tasks: Vec<Task>,
}

impl Output for SearchResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return format!("No tasks matching \"{}\"", self.query);
        }
        task_table(&self.tasks).render(render::links_enabled())
    }
}

/// Search the resolved board for `text`.
pub fn search(
    remote: &dyn RemoteData,
    store: &ConfigStore,
    overrides: &ConfigOverrides,
    text: &str,
) -> Result<SearchResult> {
    let workspace = resolve_workspace(store, overrides)?;
    let board = resolve_board(store, overrides)?.id;
    let tasks = remote.search_tasks(&workspace.value, &board.value, text)?;
    Ok(SearchResult {
        query: text.to_string(),
        board,
        tasks,
    })
}

// ==================== config ====================

/// The loaded configuration.
#[derive(Debug, Serialize)]
pub struct ConfigShowResult {
    pub path: String,
    pub exists: bool,
    pub config: ConfigRecord,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_source: Option<String>,
}

impl Output for ConfigShowResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let mut lines = vec![format!("{} {}", render::label("Config file:"), self.path)];
        if !self.exists {
            lines.push("Not configured yet. Run `asa config --init` to create it.".to_string());
        }

        let token = match (&self.token, &self.token_source) {
            (Some(token), Some(source)) => format!("{} ({})", token, source),
            _ => "not set".to_string(),
        };
        lines.push(format!("{} {}", render::label("Token:"), token));

        let defaults = &self.config.defaults;
        let or_unset = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        lines.push(String::new());
        lines.push(render::heading("Defaults").to_string());
        lines.push(format!("  workspace: {}", or_unset(&defaults.workspace_id)));
        lines.push(format!("  team:      {}", or_unset(&defaults.team_key)));
        lines.push(format!("  board:     {}", or_unset(&defaults.board_key)));

        if !self.config.teams.is_empty() {
            lines.push(String::new());
            lines.push(render::heading("Teams").to_string());
            for (key, team) in &self.config.teams {
                lines.push(format!("  {} = {}", key, team.id));
            }
        }

        if !self.config.boards.is_empty() {
            lines.push(String::new());
            lines.push(render::heading("Boards").to_string());
            for (key, board) in &self.config.boards {
                if board.columns.is_empty() {
                    lines.push(format!("  {} = {}", key, board.id));
                } else {
                    lines.push(format!(
                        "  {} = {} [{}]",
                        key,
                        board.id,
                        board.columns.join(", ")
                    ));
                }
            }
        }

        lines.join("\n")
    }
}

/// Describe the loaded configuration and the token in effect.
pub fn config_show(store: &ConfigStore, token_flag: Option<&str>) -> ConfigShowResult {
    let token = resolve_token(token_flag).ok();
    ConfigShowResult {
        path: store.path().display().to_string(),
        exists: store.exists(),
        config: store.record().clone(),
        token: token.as_ref().map(|t| masked_token(&t.value)),
        token_source: token.map(|t| t.source.to_string()),
    }
}

/// Path of the config file.
#[derive(Debug, Serialize)]
pub struct ConfigPathResult {
    pub path: String,
}

impl Output for ConfigPathResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.path.clone()
    }
}

pub fn config_path(store: &ConfigStore) -> ConfigPathResult {
    ConfigPathResult {
        path: store.path().display().to_string(),
    }
}

/// Resolution of a team or board name.
#[derive(Debug, Serialize)]
pub struct ResolveResult {
    pub kind: String,
    pub input: String,
    pub id: String,
}

impl Output for ResolveResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        self.id.clone()
    }
}

/// Resolve a team or board name to its id using only the config file.
pub fn config_resolve(store: &ConfigStore, kind: ResourceKind, name_or_id: &str) -> ResolveResult {
    ResolveResult {
        kind: kind.to_string(),
        input: name_or_id.to_string(),
        id: resolve_id(store, kind, name_or_id),
    }
}

/// Outcome of the configuration wizard.
#[derive(Debug, Serialize)]
pub struct ConfigInitResult {
    pub path: String,
    pub config: ConfigRecord,
}

impl Output for ConfigInitResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        let defaults = &self.config.defaults;
        format!(
            "Wrote {} ({} teams, {} boards)\nDefault team: {}\nDefault board: {}",
            self.path,
            self.config.teams.len(),
            self.config.boards.len(),
            defaults.team_key.as_deref().unwrap_or("-"),
            defaults.board_key.as_deref().unwrap_or("-"),
        )
    }
}

/// Run the wizard, overwrite the config file and reload the store.
pub fn config_init(
    remote: &dyn RemoteData,
    selector: &mut dyn Selector,
    store: &mut ConfigStore,
) -> Result<ConfigInitResult> {
    let record = wizard::assemble_config(remote, selector, "me")?;
    store.replace(&record)?;
    Ok(ConfigInitResult {
        path: store.path().display().to_string(),
        config: store.record().clone(),
    })
}

/// A URL that was opened in the browser.
#[derive(Debug, Serialize)]
pub struct OpenedResult {
    pub opened: String,
}

impl Output for OpenedResult {
    fn to_json(&self) -> String {
        json(self)
    }

    fn to_human(&self) -> String {
        format!("Opened {}", self.opened)
    }
}

/// Open `url` in the browser.
pub fn open(url: String) -> Result<OpenedResult> {
    render::open_url(&url)?;
    Ok(OpenedResult { opened: url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::config::{BoardConfig, Defaults, TeamConfig};
    use crate::models::{
        Membership, ProjectRef, TaskList, TeamMembership, TeamRef, WorkspaceMembership,
    };
    use crate::test_utils::TestConfig;
    use std::cell::RefCell;

    /// In-memory Asana with one workspace, one team and one board.
    #[derive(Default)]
    struct FakeRemote {
        tasks: Vec<Task>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeRemote {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            Self {
                tasks,
                ..Self::default()
            }
        }

        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl RemoteData for FakeRemote {
        fn user(&self, user_id: &str) -> Result<User> {
            self.record(format!("user {user_id}"));
            Ok(User {
                gid: "7".to_string(),
                name: "Sam".to_string(),
                email: Some("sam@example.com".to_string()),
                photo: None,
            })
        }

        fn workspace_memberships(&self, user_id: &str) -> Result<Vec<WorkspaceMembership>> {
            self.record(format!("workspace_memberships {user_id}"));
            Ok(vec![WorkspaceMembership {
                gid: "wm".to_string(),
                user: NamedRef::new("7", "Sam"),
                workspace: NamedRef::new("100", "Acme"),
            }])
        }

        fn teams(&self, workspace_id: &str, user_id: &str) -> Result<Vec<TeamRef>> {
            self.record(format!("teams {workspace_id} {user_id}"));
            Ok(vec![NamedRef::new("200", "Platform Team")])
        }

        fn team_members(&self, team_id: &str) -> Result<Vec<TeamMembership>> {
            self.record(format!("team_members {team_id}"));
            Ok(vec![TeamMembership {
                gid: "tm".to_string(),
                user: NamedRef::new("7", "Sam"),
                team: NamedRef::new(team_id, "Platform Team"),
            }])
        }

        fn project(&self, project_id: &str) -> Result<ProjectRef> {
            self.record(format!("project {project_id}"));
            Ok(NamedRef::new(project_id, "Sprint")
                .with_permalink(format!("https://app.asana.com/0/{project_id}")))
        }

        fn projects_by_team(&self, team_id: &str) -> Result<Vec<ProjectRef>> {
            self.record(format!("projects_by_team {team_id}"));
            Ok(vec![
                NamedRef::new("300", "Sprint"),
                NamedRef::new("301", "Backlog"),
            ])
        }

        fn sections_by_project(&self, project_id: &str) -> Result<Vec<SectionRef>> {
            self.record(format!("sections_by_project {project_id}"));
            Ok(vec![NamedRef::new("s1", "Todo"), NamedRef::new("s2", "Doing")])
        }

        fn project_incomplete_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
            self.record(format!("project_incomplete_tasks {project_id}"));
            Ok(self.tasks.clone())
        }

        fn user_task_list(&self, workspace_id: &str, user_id: &str) -> Result<TaskList> {
            self.record(format!("user_task_list {workspace_id} {user_id}"));
            Ok(TaskList {
                gid: "900".to_string(),
                name: String::new(),
                owner: None,
                workspace: None,
            })
        }

        fn user_incomplete_tasks(&self, task_list_id: &str) -> Result<Vec<Task>> {
            self.record(format!("user_incomplete_tasks {task_list_id}"));
            Ok(self.tasks.clone())
        }

        fn search_tasks(&self, workspace_id: &str, project_id: &str, text: &str) -> Result<Vec<Task>> {
            self.record(format!("search_tasks {workspace_id} {project_id} {text}"));
            Ok(self.tasks.clone())
        }
    }

    /// Takes every option offered.
    struct TakeAll;

    impl Selector for TakeAll {
        fn choose_one(&mut self, _prompt: &str, options: &[NamedRef]) -> Option<NamedRef> {
            options.first().cloned()
        }

        fn choose_many(&mut self, _prompt: &str, options: &[NamedRef]) -> Vec<NamedRef> {
            options.to_vec()
        }
    }

    fn task(gid: &str, section: (&str, &str)) -> Task {
        Task {
            gid: gid.to_string(),
            name: format!("Task {gid}"),
            permalink_url: None,
            assignee: None,
            memberships: vec![Membership::Section {
                section: NamedRef::new(section.0, section.1),
                project: Some(NamedRef::new("300", "Sprint")),
            }],
            projects: vec![NamedRef::new("300", "Sprint")],
            workspace: NamedRef::new("100", "Acme"),
        }
    }

    fn board_tasks() -> Vec<Task> {
        vec![
            task("1", ("s1", "Todo")),
            task("2", ("s2", "Doing")),
            task("3", ("s3", "Done")),
        ]
    }

    fn configured() -> ConfigRecord {
        let mut record = ConfigRecord::new();
        record.defaults = Defaults {
            workspace_id: Some("100".to_string()),
            team_key: Some("platform_team".to_string()),
            board_key: Some("sprint".to_string()),
        };
        record.teams.insert(
            "platform_team".to_string(),
            TeamConfig {
                id: "200".to_string(),
            },
        );
        record.boards.insert(
            "sprint".to_string(),
            BoardConfig {
                id: "300".to_string(),
                columns: vec!["s2".to_string(), "s1".to_string()],
            },
        );
        record
    }

    fn column_gids(view: &BoardView) -> Vec<&str> {
        view.columns.iter().map(|c| c.section.gid.as_str()).collect()
    }

    #[test]
    fn test_board_follows_configured_columns() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::with_tasks(board_tasks());

        let view = board(&remote, &store, &ConfigOverrides::new(), &[]).unwrap();

        assert_eq!(view.title, "Sprint");
        assert_eq!(view.url.as_deref(), Some("https://app.asana.com/0/300"));
        assert_eq!(column_gids(&view), vec!["s2", "s1"]);
    }

    #[test]
    fn test_board_column_flags_take_names_or_ids() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::with_tasks(board_tasks());
        let columns = vec!["done".to_string(), "s1".to_string(), "Nowhere".to_string()];

        let view = board(&remote, &store, &ConfigOverrides::new(), &columns).unwrap();

        assert_eq!(column_gids(&view), vec!["s3", "s1"]);
    }

    #[test]
    fn test_board_unknown_columns_show_nothing() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::with_tasks(board_tasks());
        let columns = vec!["Bogus".to_string()];

        let view = board(&remote, &store, &ConfigOverrides::new(), &columns).unwrap();

        assert_eq!(view.title, "Sprint");
        assert!(view.columns.is_empty());
    }

    #[test]
    fn test_board_without_columns_keeps_discovery_order() {
        let config = TestConfig::new();
        let store = config.store_with(&ConfigRecord::new());
        let remote = FakeRemote::with_tasks(board_tasks());
        let overrides = ConfigOverrides::new().with_board("300");

        let view = board(&remote, &store, &overrides, &[]).unwrap();

        assert_eq!(column_gids(&view), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn test_board_missing_default_fails_before_any_request() {
        let config = TestConfig::new();
        let store = config.store_with(&ConfigRecord::new());
        let remote = FakeRemote::default();

        let err = board(&remote, &store, &ConfigOverrides::new(), &[]).unwrap_err();

        assert!(matches!(err, Error::MissingDefault { what: "board", .. }));
        assert!(remote.calls().is_empty());
    }

    #[test]
    fn test_board_url_uses_permalink() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::default();

        let url = board_url(&remote, &store, &ConfigOverrides::new()).unwrap();

        assert_eq!(url, "https://app.asana.com/0/300");
        assert_eq!(remote.calls(), vec!["project 300"]);
    }

    #[test]
    fn test_search_resolves_board_slug() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::with_tasks(board_tasks());
        let overrides = ConfigOverrides::new().with_board("sprint");

        let result = search(&remote, &store, &overrides, "fix login").unwrap();

        assert_eq!(result.board.value, "300");
        assert_eq!(result.tasks.len(), 3);
        assert_eq!(remote.calls(), vec!["search_tasks 100 300 fix login"]);
    }

    #[test]
    fn test_teams_and_boards_mark_configured_keys() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::default();

        let teams = teams(&remote, &store, &ConfigOverrides::new(), "me").unwrap();
        assert_eq!(teams.teams[0].config_key.as_deref(), Some("platform_team"));

        let boards = boards(&remote, &store, &ConfigOverrides::new()).unwrap();
        let keys: Vec<Option<&str>> = boards
            .boards
            .iter()
            .map(|b| b.config_key.as_deref())
            .collect();
        assert_eq!(keys, vec![Some("sprint"), None]);
        assert_eq!(
            remote.calls(),
            vec!["teams 100 me", "projects_by_team 200"]
        );
    }

    #[test]
    fn test_team_members_uses_flag_over_default() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::default();
        let overrides = ConfigOverrides::new().with_team("555");

        let result = team_members(&remote, &store, &overrides).unwrap();

        assert_eq!(result.team.value, "555");
        assert_eq!(result.members[0].name, "Sam");
    }

    #[test]
    fn test_my_tasks_filters_without_reordering() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());
        let remote = FakeRemote::with_tasks(board_tasks());
        let columns = vec!["Done".to_string(), "Todo".to_string()];

        let view = my_tasks(&remote, &store, &ConfigOverrides::new(), "me", &columns).unwrap();

        assert_eq!(view.title, "My Tasks");
        assert_eq!(column_gids(&view), vec!["s1", "s3"]);
    }

    #[test]
    fn test_board_view_human_output() {
        colored::control::set_override(false);
        let view = BoardView::new(
            "Sprint".to_string(),
            None,
            grouping::group(&board_tasks()[..2]),
        );

        let text = view.to_human();

        assert!(text.starts_with("Sprint\n"));
        assert!(text.contains("Todo (1)"));
        assert!(text.contains("Task 2  -"));
    }

    #[test]
    fn test_config_show_masks_flag_token() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());

        let result = config_show(&store, Some("0/abcdefghijklmnop"));

        assert!(result.exists);
        assert_eq!(result.token.as_deref(), Some("0/ab...mnop"));
        assert_eq!(result.token_source.as_deref(), Some("cli"));
        let json: serde_json::Value = serde_json::from_str(&result.to_json()).unwrap();
        assert_eq!(json["config"]["boards"]["sprint"]["id"], "300");
    }

    #[test]
    fn test_config_resolve_slug_and_passthrough() {
        let config = TestConfig::new();
        let store = config.store_with(&configured());

        assert_eq!(config_resolve(&store, ResourceKind::Board, "sprint").id, "300");
        assert_eq!(config_resolve(&store, ResourceKind::Team, "4242").id, "4242");
    }

    #[test]
    fn test_config_init_writes_and_reloads() {
        let config = TestConfig::new();
        let mut store = config.store();
        assert!(!store.exists());

        let result = config_init(&FakeRemote::default(), &mut TakeAll, &mut store).unwrap();

        assert!(store.exists());
        assert_eq!(store.default_workspace(), Some("100"));
        assert_eq!(store.default_team_key(), Some("platform_team"));
        assert_eq!(store.default_board_key(), Some("sprint"));
        assert_eq!(result.config.boards.len(), 2);
        assert_eq!(&result.config, store.record());
    }
}
