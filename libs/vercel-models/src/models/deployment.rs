//! Deployment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::millis_to_utc;

/// Build state of a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    Queued,
    Initializing,
    Building,
    Ready,
    Error,
    Canceled,
    Deleted,
    #[serde(other)]
    Unknown,
}

/// A single deployment, as returned by `GET /v13/deployments/{idOrUrl}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Canonical deployment id (`dpl_...`)
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub ready_state: Option<ReadyState>,

    /// Creation time in Unix milliseconds
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl Deployment {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(millis_to_utc)
    }
}

/// One item of a project's deployment listing
///
/// The listing endpoints report the build state as `readyState`, older ones
/// as `state`; both are kept and [`DeploymentSummary::state`] picks whichever
/// is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentSummary {
    pub uid: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default, rename = "readyState")]
    pub ready_state: Option<ReadyState>,

    #[serde(default, rename = "state")]
    pub legacy_state: Option<ReadyState>,

    /// Creation time in Unix milliseconds
    #[serde(default)]
    pub created: Option<i64>,
}

impl DeploymentSummary {
    pub fn state(&self) -> Option<ReadyState> {
        self.ready_state.or(self.legacy_state)
    }

    pub fn is_ready(&self) -> bool {
        self.state() == Some(ReadyState::Ready)
    }

    pub fn created_utc(&self) -> Option<DateTime<Utc>> {
        self.created.and_then(millis_to_utc)
    }
}

/// Response of `GET /v12/projects/{name}/deployments`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentList {
    #[serde(default)]
    pub deployments: Vec<DeploymentSummary>,
}
