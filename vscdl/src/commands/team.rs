//! Team member commands

use colored::Colorize;

use crate::errors::FetchError;
use crate::http::ApiClient;

pub async fn list(client: &ApiClient) -> Result<(), FetchError> {
    let members = client.list_team_members().await?;
    println!("{}", "Team Members:".cyan());
    for member in &members {
        match &member.role {
            Some(role) => println!("- {} ({})", member.label(), role.to_lowercase()),
            None => println!("- {}", member.label()),
        }
    }
    Ok(())
}

pub async fn add(client: &ApiClient, email: &str) -> Result<(), FetchError> {
    client.add_team_member(email).await?;
    println!(
        "{}",
        format!("Member {} added to the team successfully.", email).green()
    );
    Ok(())
}

pub async fn remove(client: &ApiClient, email: &str) -> Result<(), FetchError> {
    client.remove_team_member(email).await?;
    println!(
        "{}",
        format!("Member {} removed from the team successfully.", email).green()
    );
    Ok(())
}
