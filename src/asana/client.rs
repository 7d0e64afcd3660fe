//! Blocking HTTP client for the Asana REST API.
//!
//! Every call sends the personal access token as a bearer credential and
//! unwraps the `{"data": ...}` envelope Asana puts around each response.
//! List endpoints are paginated with `limit`/`offset` and are followed until
//! `next_page` comes back empty.

use percent_encoding::{AsciiSet, CONTROLS, PercentEncode, utf8_percent_encode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApiError, RemoteData};
use crate::Result;
use crate::models::{
    ProjectRef, SectionRef, Task, TaskList, TeamMembership, TeamRef, User, WorkspaceMembership,
};

/// Asana API base URL
pub const ASANA_API_BASE: &str = "https://app.asana.com/api/1.0";

/// User-Agent header sent with every request
const USER_AGENT: &str = concat!("asa-cli/", env!("CARGO_PKG_VERSION"));

/// Page size for paginated endpoints (Asana's maximum)
const PAGE_LIMIT: &str = "100";

const TASK_OPT_FIELDS: &str = "name,permalink_url,assignee.name,memberships.section.name,memberships.project.name,projects.name,workspace.name";
const PROJECT_OPT_FIELDS: &str = "name,permalink_url";
const TEAM_OPT_FIELDS: &str = "name,permalink_url";
const USER_OPT_FIELDS: &str = "name,email,photo";
const TEAM_MEMBERSHIP_OPT_FIELDS: &str = "user.name,team.name";

/// Characters escaped in a path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Escape an id for use as one path segment.
fn segment(id: &str) -> PercentEncode<'_> {
    utf8_percent_encode(id, SEGMENT)
}

/// Response wrapper used by every Asana endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
    #[serde(default)]
    next_page: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
struct NextPage {
    offset: String,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

/// Pull the human-readable messages out of an Asana error body.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; "),
        _ => body.trim().to_string(),
    }
}

/// Map a non-success HTTP status to an [`ApiError`].
fn status_error(status: u16, path: &str, body: &str) -> ApiError {
    match status {
        401 => ApiError::Unauthorized,
        403 => ApiError::Forbidden(path.to_string()),
        404 => ApiError::NotFound(format!("{} ({})", path, error_message(body))),
        _ => ApiError::Status {
            status,
            message: error_message(body),
        },
    }
}

/// Authenticated client for one Asana account.
#[derive(Debug, Clone)]
pub struct AsanaClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
}

impl AsanaClient {
    /// Create a client against the public Asana API.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, ASANA_API_BASE)
    }

    /// Create a client against another base URL (e.g. a local test server).
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform a GET and return the raw response body.
    fn get_body(&self, path: &str, query: &[(&str, &str)]) -> std::result::Result<String, ApiError> {
        let url = self.url(path);
        let mut request = self
            .agent
            .get(&url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/json");
        for (key, value) in query {
            request = request.query(key, value);
        }

        tracing::debug!(url = %request.url(), "GET");

        match request.call() {
            Ok(response) => {
                tracing::debug!(status = response.status(), %url, "response");
                let body = response
                    .into_string()
                    .map_err(|e| ApiError::Parse(e.to_string()))?;
                tracing::trace!(%body, "response body");
                Ok(body)
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                tracing::debug!(status, %url, %body, "error response");
                Err(status_error(status, path, &body))
            }
            Err(e) => Err(ApiError::Transport(e.to_string())),
        }
    }

    /// GET a single resource.
    fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<T, ApiError> {
        let body = self.get_body(path, query)?;
        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(envelope.data)
    }

    /// GET every page of a list endpoint.
    fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut page_query: Vec<(&str, &str)> = query.to_vec();
            page_query.push(("limit", PAGE_LIMIT));
            if let Some(ref offset) = offset {
                page_query.push(("offset", offset.as_str()));
            }

            let body = self.get_body(path, &page_query)?;
            let envelope: Envelope<Vec<T>> =
                serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
            items.extend(envelope.data);

            match envelope.next_page {
                Some(next) => offset = Some(next.offset),
                None => break,
            }
        }

        Ok(items)
    }
}

impl RemoteData for AsanaClient {
    // https://developers.asana.com/reference/getuser
    fn user(&self, user_id: &str) -> Result<User> {
        Ok(self.get_data(
            &format!("/users/{}", segment(user_id)),
            &[("opt_fields", USER_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/getworkspacemembershipsforuser
    fn workspace_memberships(&self, user_id: &str) -> Result<Vec<WorkspaceMembership>> {
        Ok(self.get_all(
            &format!("/users/{}/workspace_memberships", segment(user_id)),
            &[],
        )?)
    }

    // https://developers.asana.com/reference/getteamsforuser
    fn teams(&self, workspace_id: &str, user_id: &str) -> Result<Vec<TeamRef>> {
        Ok(self.get_all(
            &format!("/users/{}/teams", segment(user_id)),
            &[("workspace", workspace_id), ("opt_fields", TEAM_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/getteammembershipsforteam
    fn team_members(&self, team_id: &str) -> Result<Vec<TeamMembership>> {
        Ok(self.get_all(
            &format!("/teams/{}/team_memberships", segment(team_id)),
            &[("opt_fields", TEAM_MEMBERSHIP_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/getproject
    fn project(&self, project_id: &str) -> Result<ProjectRef> {
        Ok(self.get_data(
            &format!("/projects/{}", segment(project_id)),
            &[("opt_fields", PROJECT_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/getprojectsforteam
    fn projects_by_team(&self, team_id: &str) -> Result<Vec<ProjectRef>> {
        Ok(self.get_all(
            &format!("/teams/{}/projects", segment(team_id)),
            &[("opt_fields", PROJECT_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/getsectionsforproject
    fn sections_by_project(&self, project_id: &str) -> Result<Vec<SectionRef>> {
        Ok(self.get_all(
            &format!("/projects/{}/sections", segment(project_id)),
            &[],
        )?)
    }

    // https://developers.asana.com/reference/gettasksforproject
    fn project_incomplete_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self.get_all(
            &format!("/projects/{}/tasks", segment(project_id)),
            &[("completed_since", "now"), ("opt_fields", TASK_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/getusertasklistforuser
    fn user_task_list(&self, workspace_id: &str, user_id: &str) -> Result<TaskList> {
        Ok(self.get_data(
            &format!("/users/{}/user_task_list", segment(user_id)),
            &[("workspace", workspace_id)],
        )?)
    }

    // https://developers.asana.com/reference/gettasksforusertasklist
    fn user_incomplete_tasks(&self, task_list_id: &str) -> Result<Vec<Task>> {
        Ok(self.get_all(
            &format!("/user_task_lists/{}/tasks", segment(task_list_id)),
            &[("completed_since", "now"), ("opt_fields", TASK_OPT_FIELDS)],
        )?)
    }

    // https://developers.asana.com/reference/searchtasksforworkspace
    // Search results are not paginated; one page of up to 100 is all there is.
    fn search_tasks(&self, workspace_id: &str, project_id: &str, text: &str) -> Result<Vec<Task>> {
        Ok(self.get_data(
            &format!("/workspaces/{}/tasks/search", segment(workspace_id)),
            &[
                ("text", text),
                ("projects.any", project_id),
                ("limit", PAGE_LIMIT),
                ("opt_fields", TASK_OPT_FIELDS),
            ],
        )?)
    }
}
