//! Command runners

pub mod download;
pub mod projects;
pub mod team;

use crate::cli::Command;
use crate::config::Settings;
use crate::errors::FetchError;
use crate::http::ApiClient;
use crate::source::FetchOptions;

/// Run an API-backed command. `Ok(false)` means the command finished but
/// did not achieve what was asked (every file download failed).
///
/// `Help` and `Version` need no client and are handled by the binary.
pub async fn run(client: &ApiClient, command: Command, settings: &Settings) -> Result<bool, FetchError> {
    match command {
        Command::Help | Command::Version => Ok(true),
        Command::Download { identifier, output } => {
            let options = FetchOptions {
                project_deployments_limit: settings.resolver.project_deployments_limit,
                max_concurrent_downloads: settings.downloads.max_concurrent,
            };
            download::download(client, &identifier, output.as_deref(), &options).await
        }
        Command::ListProjects => projects::list(client).await.map(|_| true),
        Command::CreateProject { name } => projects::create(client, &name).await.map(|_| true),
        Command::UpdateProject { id, name } => {
            projects::update(client, &id, &name).await.map(|_| true)
        }
        Command::DeleteProject { id } => projects::delete(client, &id).await.map(|_| true),
        Command::ListMembers => team::list(client).await.map(|_| true),
        Command::AddMember { email } => team::add(client, &email).await.map(|_| true),
        Command::RemoveMember { email } => team::remove(client, &email).await.map(|_| true),
    }
}
