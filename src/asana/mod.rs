//! Access to the Asana REST API.
//!
//! [`RemoteData`] is the set of reads the rest of the crate needs. The
//! blocking HTTP implementation lives in [`client`]; tests substitute
//! in-memory implementations.

pub mod client;

pub use client::{ASANA_API_BASE, AsanaClient};

use thiserror::Error;

use crate::Result;
use crate::models::{
    ProjectRef, SectionRef, Task, TaskList, TeamMembership, TeamRef, User, WorkspaceMembership,
};

/// Errors that can occur when talking to the Asana API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Token is invalid or expired (401 Unauthorized)
    #[error("Invalid or expired token: Asana returned 401 Unauthorized")]
    Unauthorized,

    /// Token lacks access to the resource (403 Forbidden)
    #[error("Access denied to {0}: Asana returned 403 Forbidden")]
    Forbidden(String),

    /// Resource does not exist or is not visible (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Asana API error (HTTP {status}): {message}")]
    Status { status: u16, message: String },

    /// Network or other transport failure
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Failed to parse response
    #[error("Failed to parse Asana response: {0}")]
    Parse(String),
}

/// The reads the CLI performs against Asana.
///
/// User ids accept `"me"` for the authenticated user.
pub trait RemoteData {
    fn user(&self, user_id: &str) -> Result<User>;

    fn workspace_memberships(&self, user_id: &str) -> Result<Vec<WorkspaceMembership>>;

    fn teams(&self, workspace_id: &str, user_id: &str) -> Result<Vec<TeamRef>>;

    fn team_members(&self, team_id: &str) -> Result<Vec<TeamMembership>>;

    fn project(&self, project_id: &str) -> Result<ProjectRef>;

    fn projects_by_team(&self, team_id: &str) -> Result<Vec<ProjectRef>>;

    fn sections_by_project(&self, project_id: &str) -> Result<Vec<SectionRef>>;

    fn project_incomplete_tasks(&self, project_id: &str) -> Result<Vec<Task>>;

    fn user_task_list(&self, workspace_id: &str, user_id: &str) -> Result<TaskList>;

    fn user_incomplete_tasks(&self, task_list_id: &str) -> Result<Vec<Task>>;

    fn search_tasks(&self, workspace_id: &str, project_id: &str, text: &str) -> Result<Vec<Task>>;
}
