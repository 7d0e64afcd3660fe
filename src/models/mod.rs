//! Data models for Asana resources.
//!
//! This module defines the records returned by the remote API:
//! - `NamedRef` - The compact `{gid, name, permalink_url}` shape shared by every resource
//! - `User` - Full user details with photo URLs
//! - `WorkspaceMembership` / `TeamMembership` - A user's membership in a workspace or team
//! - `TaskList` - A user's personal task list ("My Tasks")
//! - `Task` - A work item with its project and section memberships
//!
//! Every reference type is a `NamedRef`. Equality and hashing go by `gid`
//! only, so a `NamedRef` can key a map regardless of its display name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identifier used by Asana to identify each resource.
pub type Gid = String;

/// A resource reference: identifier, display name and optional permalink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedRef {
    pub gid: Gid,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink_url: Option<String>,
}

impl NamedRef {
    pub fn new(gid: impl Into<Gid>, name: impl Into<String>) -> Self {
        Self {
            gid: gid.into(),
            name: name.into(),
            permalink_url: None,
        }
    }

    pub fn with_permalink(mut self, url: impl Into<String>) -> Self {
        self.permalink_url = Some(url.into());
        self
    }
}

impl PartialEq for NamedRef {
    fn eq(&self, other: &Self) -> bool {
        self.gid == other.gid
    }
}

impl Eq for NamedRef {}

impl Hash for NamedRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.gid.hash(state);
    }
}

impl fmt::Display for NamedRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

pub type UserRef = NamedRef;
pub type WorkspaceRef = NamedRef;
pub type TeamRef = NamedRef;
/// A project, displayed as a board.
pub type ProjectRef = NamedRef;
/// A section of a project, displayed as a board column.
pub type SectionRef = NamedRef;

/// Photo URLs for a user, by pixel size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub image_21x21: Option<String>,
    pub image_27x27: Option<String>,
    pub image_36x36: Option<String>,
    pub image_60x60: Option<String>,
    pub image_128x128: Option<String>,
}

/// Full details for a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub gid: Gid,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Photo>,
}

impl User {
    /// Profile page in the Asana web app.
    pub fn profile_url(&self) -> String {
        format!("https://app.asana.com/0/profile/{}", self.gid)
    }
}

/// Membership of a user in a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceMembership {
    pub gid: Gid,
    pub user: UserRef,
    pub workspace: WorkspaceRef,
}

/// Membership of a user in a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMembership {
    pub gid: Gid,
    pub user: UserRef,
    pub team: TeamRef,
}

/// A user's task list within one workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub gid: Gid,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceRef>,
}

/// How a task belongs to a project.
///
/// Asana reports memberships as objects carrying a `section` (and usually the
/// owning `project`), or only a `project` when the task sits in a project
/// without being placed in one of its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Membership {
    Section {
        section: SectionRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        project: Option<ProjectRef>,
    },
    Project {
        project: ProjectRef,
    },
}

/// A work item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub gid: Gid,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink_url: Option<String>,

    #[serde(default)]
    pub assignee: Option<UserRef>,

    #[serde(default)]
    pub memberships: Vec<Membership>,

    #[serde(default)]
    pub projects: Vec<ProjectRef>,

    pub workspace: WorkspaceRef,
}

impl Task {
    /// Name of the assignee, if any.
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(|a| a.name.as_str())
    }
}
