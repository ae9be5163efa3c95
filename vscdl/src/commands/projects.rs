//! Project commands

use colored::Colorize;

use crate::errors::FetchError;
use crate::http::ApiClient;

pub async fn list(client: &ApiClient) -> Result<(), FetchError> {
    let projects = client.list_projects().await?;
    println!("{}", "Projects:".cyan());
    for project in projects {
        match project.framework {
            Some(framework) => println!("- {} ({}) [{}]", project.name, project.id, framework),
            None => println!("- {} ({})", project.name, project.id),
        }
    }
    Ok(())
}

pub async fn create(client: &ApiClient, name: &str) -> Result<(), FetchError> {
    let project = client.create_project(name).await?;
    println!(
        "{}",
        format!("Project {} created successfully ({}).", project.name, project.id).green()
    );
    Ok(())
}

pub async fn update(client: &ApiClient, id: &str, new_name: &str) -> Result<(), FetchError> {
    client.update_project(id, new_name).await?;
    println!(
        "{}",
        format!("Project {} updated to {} successfully.", id, new_name).green()
    );
    Ok(())
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), FetchError> {
    client.delete_project(id).await?;
    println!("{}", format!("Project {} deleted successfully.", id).green());
    Ok(())
}
