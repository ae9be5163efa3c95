//! Team member API client

use vercel_models::{AddTeamMemberRequest, TeamMember, TeamMemberList};

use crate::errors::FetchError;
use crate::http::client::ApiClient;
use crate::http::endpoint::Endpoint;

impl ApiClient {
    fn team_id_required(&self) -> Result<&str, FetchError> {
        self.config().team_id().ok_or_else(|| {
            FetchError::ConfigError(
                "A team id is required. Set VERCEL_TEAM or pass --team=<id>".to_string(),
            )
        })
    }

    /// List members of the configured team
    pub async fn list_team_members(&self) -> Result<Vec<TeamMember>, FetchError> {
        let team_id = self.team_id_required()?;
        let response: TeamMemberList = self
            .get(&Endpoint::new(["v2", "teams", team_id, "members"]))
            .await?;
        Ok(response.into_members())
    }

    /// Invite a member to the configured team
    pub async fn add_team_member(&self, email: &str) -> Result<(), FetchError> {
        let team_id = self.team_id_required()?;
        let body = AddTeamMemberRequest {
            email: email.to_string(),
            role: None,
        };
        let _: serde_json::Value = self
            .post(&Endpoint::new(["v2", "teams", team_id, "members"]), &body)
            .await?;
        Ok(())
    }

    /// Remove a member from the configured team
    pub async fn remove_team_member(&self, member: &str) -> Result<(), FetchError> {
        let team_id = self.team_id_required()?;
        self.delete(&Endpoint::new(["v2", "teams", team_id, "members", member]))
            .await
    }
}
