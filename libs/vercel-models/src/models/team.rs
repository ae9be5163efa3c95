//! Team member models

use serde::{Deserialize, Serialize};

/// A member of a team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub uid: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub role: Option<String>,
}

impl TeamMember {
    /// Best human-readable label for the member
    pub fn label(&self) -> &str {
        self.email
            .as_deref()
            .or(self.username.as_deref())
            .or(self.uid.as_deref())
            .unwrap_or("<unknown>")
    }
}

/// Team member listing; older API versions return a bare array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamMemberList {
    Wrapped { members: Vec<TeamMember> },
    Bare(Vec<TeamMember>),
}

impl TeamMemberList {
    pub fn into_members(self) -> Vec<TeamMember> {
        match self {
            TeamMemberList::Wrapped { members } => members,
            TeamMemberList::Bare(members) => members,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTeamMemberRequest {
    pub email: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}
