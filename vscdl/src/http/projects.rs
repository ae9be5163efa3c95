//! Project API client

use vercel_models::{CreateProjectRequest, Project, ProjectList, UpdateProjectRequest};

use crate::errors::FetchError;
use crate::http::client::ApiClient;
use crate::http::endpoint::Endpoint;

impl ApiClient {
    /// List the projects visible to the token
    pub async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        let response: ProjectList = self.get(&Endpoint::new(["v2", "projects"])).await?;
        Ok(response.into_projects())
    }

    /// Create a project
    pub async fn create_project(&self, name: &str) -> Result<Project, FetchError> {
        let body = CreateProjectRequest {
            name: name.to_string(),
        };
        self.post(&Endpoint::new(["v2", "projects"]), &body).await
    }

    /// Rename a project
    pub async fn update_project(&self, id_or_name: &str, new_name: &str) -> Result<Project, FetchError> {
        let body = UpdateProjectRequest {
            name: new_name.to_string(),
        };
        self.patch(&Endpoint::new(["v2", "projects", id_or_name]), &body)
            .await
    }

    /// Delete a project
    pub async fn delete_project(&self, id_or_name: &str) -> Result<(), FetchError> {
        self.delete(&Endpoint::new(["v2", "projects", id_or_name]))
            .await
    }
}
