//! Deployment API client

use async_trait::async_trait;
use tokio::io::AsyncWrite;
use vercel_models::{Deployment, DeploymentList, DeploymentSummary, FileNode};

use crate::errors::FetchError;
use crate::http::client::ApiClient;
use crate::http::content::write_response;
use crate::http::endpoint::Endpoint;
use crate::source::api::SourceApi;

#[async_trait]
impl SourceApi for ApiClient {
    async fn deployment(&self, id_or_url: &str) -> Result<Deployment, FetchError> {
        self.get(&Endpoint::new(["v13", "deployments", id_or_url]))
            .await
    }

    async fn project_deployments(
        &self,
        project: &str,
        limit: u32,
    ) -> Result<Vec<DeploymentSummary>, FetchError> {
        let endpoint = Endpoint::new(["v12", "projects", project, "deployments"])
            .query("limit", limit)
            .query("sort", "created");
        let response: DeploymentList = self.get(&endpoint).await?;
        Ok(response.deployments)
    }

    async fn file_tree(&self, deployment_id: &str) -> Result<Vec<FileNode>, FetchError> {
        self.get(&Endpoint::new(["v7", "deployments", deployment_id, "files"]))
            .await
    }

    async fn download_file(
        &self,
        deployment_id: &str,
        uid: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, FetchError> {
        let endpoint = Endpoint::new(["v7", "deployments", deployment_id, "files", uid]);
        let response = self.get_raw(&endpoint).await?;
        write_response(response, writer).await
    }
}
