//! Project models

use serde::{Deserialize, Serialize};

/// A project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub framework: Option<String>,

    #[serde(default)]
    pub updated_at: Option<i64>,
}

/// Project listing; older API versions return a bare array
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectList {
    Wrapped { projects: Vec<Project> },
    Bare(Vec<Project>),
}

impl ProjectList {
    pub fn into_projects(self) -> Vec<Project> {
        match self {
            ProjectList::Wrapped { projects } => projects,
            ProjectList::Bare(projects) => projects,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: String,
}
