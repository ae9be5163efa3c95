//! Deployment source retrieval
//!
//! resolve identifier -> load the `src` tree -> flatten -> materialize.

pub mod api;
pub mod flatten;
pub mod identifier;
pub mod materialize;
pub mod resolver;

use std::path::Path;

use tracing::info;
use vercel_models::FileNode;

use crate::errors::FetchError;

pub use api::SourceApi;
pub use flatten::{flatten, EntryKind, FlatEntry};
pub use identifier::{DeploymentIdentifier, DEPLOYMENT_ID_PREFIX};
pub use materialize::{
    EntryOutcome, MaterializeReport, Materializer, Settlement, DEFAULT_MAX_CONCURRENT_DOWNLOADS,
};
pub use resolver::Resolver;

/// Name of the source root in a deployment's file listing
pub const SOURCE_ROOT: &str = "src";

/// Options for [`fetch_source`]
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Project deployments searched for a ready one
    pub project_deployments_limit: u32,

    /// File downloads in flight at once
    pub max_concurrent_downloads: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            project_deployments_limit: 1,
            max_concurrent_downloads: DEFAULT_MAX_CONCURRENT_DOWNLOADS,
        }
    }
}

/// Fetch a deployment's file listing and pick its source root
pub async fn load_source_tree<A: SourceApi + ?Sized>(
    api: &A,
    deployment_id: &str,
) -> Result<FileNode, FetchError> {
    api.file_tree(deployment_id)
        .await?
        .into_iter()
        .find(|node| node.name() == SOURCE_ROOT && node.is_directory())
        .ok_or_else(|| FetchError::SourceNotFound(deployment_id.to_string()))
}

/// Download the source tree of the deployment named by `identifier` into
/// `destination`.
///
/// Resolution and tree loading happen before the destination is touched, so
/// a failure in either leaves the filesystem as it was.
pub async fn fetch_source<A: SourceApi + ?Sized>(
    api: &A,
    identifier: &DeploymentIdentifier,
    destination: &Path,
    options: &FetchOptions,
) -> Result<MaterializeReport, FetchError> {
    let deployment_id = Resolver::new(api)
        .with_page_size(options.project_deployments_limit)
        .resolve(identifier)
        .await?;

    info!("Loading source files tree of {}", deployment_id);
    let root = load_source_tree(api, &deployment_id).await?;
    let entries = flatten(&root, &destination.to_string_lossy());
    let directories = entries.iter().filter(|e| e.is_directory()).count();
    info!(
        "{} files and {} directories in source tree",
        entries.len() - directories,
        directories
    );

    Materializer::new(api)
        .with_max_concurrent(options.max_concurrent_downloads)
        .materialize(&deployment_id, &entries, destination)
        .await
}
