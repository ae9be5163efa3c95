//! Source download command

use std::path::PathBuf;

use colored::Colorize;
use tracing::{error, info};

use crate::errors::FetchError;
use crate::source::{fetch_source, DeploymentIdentifier, FetchOptions, MaterializeReport, SourceApi};
use crate::utils::format_bytes;

/// Download the deployment named by `identifier` into `output`, or into a
/// directory named after the identifier.
///
/// Returns `Ok(false)` when every file of the tree failed to download.
pub async fn download<A: SourceApi + ?Sized>(
    api: &A,
    identifier: &str,
    output: Option<&str>,
    options: &FetchOptions,
) -> Result<bool, FetchError> {
    let identifier = DeploymentIdentifier::parse(identifier).ok_or_else(|| {
        FetchError::ConfigError("Missing deployment URL, project name or id".to_string())
    })?;
    let destination = output
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(identifier.as_str()));

    println!(
        "{} Fetching source of {} into {}",
        "⬇".blue(),
        identifier.to_string().blue(),
        destination.display().to_string().blue()
    );

    let report = fetch_source(api, &identifier, &destination, options).await?;
    print_report(&report);

    Ok(!report.is_total_failure())
}

/// Print a summary line plus one line per failed entry
pub fn print_report(report: &MaterializeReport) {
    for failure in report.failures() {
        if let Some(e) = failure.error() {
            error!("{}: {}", failure.path, e);
            eprintln!("{} {}: {}", "✘".red(), failure.path.red(), root_cause(e));
        }
    }

    let summary = format!(
        "{} files downloaded, {} directories created, {} skipped ({}) from {}",
        report.files_downloaded(),
        report.directories_created(),
        report.skipped(),
        format_bytes(report.bytes_written()),
        report.deployment_id,
    );
    info!("{}", summary);

    let failed = report.failures().count();
    if failed == 0 {
        println!("{} {}", "✔".green(), summary);
    } else if report.is_total_failure() {
        println!("{} {}, every file failed", "✘".red(), summary);
    } else {
        println!("{} {}, {} failed", "!".yellow(), summary, failed);
    }
}

fn root_cause(e: &FetchError) -> &FetchError {
    match e {
        FetchError::DownloadError { source, .. } => root_cause(source),
        other => other,
    }
}
