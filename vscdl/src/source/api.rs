//! Source API seam

use async_trait::async_trait;
use tokio::io::AsyncWrite;
use vercel_models::{Deployment, DeploymentSummary, FileNode};

use crate::errors::FetchError;

/// Calls the source pipeline makes against the provider.
///
/// Implemented by [`crate::http::ApiClient`]; tests substitute an in-memory
/// fake.
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// Look up a deployment by id or by one of its domains
    async fn deployment(&self, id_or_url: &str) -> Result<Deployment, FetchError>;

    /// Most recent deployments of a project, newest first
    async fn project_deployments(
        &self,
        project: &str,
        limit: u32,
    ) -> Result<Vec<DeploymentSummary>, FetchError>;

    /// Top-level nodes of a deployment's file tree
    async fn file_tree(&self, deployment_id: &str) -> Result<Vec<FileNode>, FetchError>;

    /// Write one file's content into `writer`, returning the bytes written
    async fn download_file(
        &self,
        deployment_id: &str,
        uid: &str,
        writer: &mut (dyn AsyncWrite + Unpin + Send),
    ) -> Result<u64, FetchError>;
}
