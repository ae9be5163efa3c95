//! Deployment resolution

use tracing::{debug, info};

use crate::errors::FetchError;
use crate::source::api::SourceApi;
use crate::source::identifier::DeploymentIdentifier;

/// Maps a [`DeploymentIdentifier`] to a canonical deployment id.
///
/// Tried in order: the identifier already is a deployment id (no request);
/// it is a domain; it is a project name, in which case the most recent ready
/// deployment among the latest `page_size` wins.
pub struct Resolver<'a, A: SourceApi + ?Sized> {
    api: &'a A,
    page_size: u32,
}

impl<'a, A: SourceApi + ?Sized> Resolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api, page_size: 1 }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn resolve(&self, identifier: &DeploymentIdentifier) -> Result<String, FetchError> {
        if let Some(id) = identifier.as_deployment_id() {
            debug!("{} is already a deployment id", id);
            return Ok(id.to_string());
        }

        let domain_err = match self.api.deployment(identifier.as_str()).await {
            Ok(deployment) => {
                match deployment.created_at_utc() {
                    Some(created) => info!(
                        "Resolved domain {} to deployment {} (created {})",
                        identifier, deployment.id, created
                    ),
                    None => info!("Resolved domain {} to deployment {}", identifier, deployment.id),
                }
                return Ok(deployment.id);
            }
            Err(e) => e,
        };
        debug!(
            "{} is not a known domain ({}), trying it as a project name",
            identifier, domain_err
        );

        let deployments = self
            .api
            .project_deployments(identifier.as_str(), self.page_size)
            .await
            .map_err(|project_err| FetchError::ResolutionError {
                identifier: identifier.to_string(),
                reason: format!(
                    "not a deployment domain ({}) nor a project ({})",
                    domain_err, project_err
                ),
            })?;

        let ready = deployments
            .into_iter()
            .find(|d| d.is_ready())
            .ok_or_else(|| FetchError::ResolutionError {
                identifier: identifier.to_string(),
                reason: "no successful deployments found for the project".to_string(),
            })?;

        match ready.created_utc() {
            Some(created) => info!(
                "Resolved project {} to deployment {} (created {})",
                identifier, ready.uid, created
            ),
            None => info!("Resolved project {} to deployment {}", identifier, ready.uid),
        }
        Ok(ready.uid)
    }
}
