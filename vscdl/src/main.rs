//! vscdl - Entry Point
//!
//! Downloads the source code of a Vercel deployment.

use std::env;
use std::process::ExitCode;

use colored::Colorize;
use tracing::{debug, error};

use vscdl::cli::{CliArgs, Command, USAGE};
use vscdl::commands;
use vscdl::config::{ApiConfig, Settings};
use vscdl::filesys::file::File;
use vscdl::http::ApiClient;
use vscdl::logs::{init_logging, LogLevel, LogOptions};
use vscdl::utils::version_info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse(env::args().skip(1));

    let command = match args.command() {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{}\n", message.red());
            eprintln!("{}", USAGE);
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Help => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Command::Version => {
            match serde_json::to_string_pretty(&version_info()) {
                Ok(version) => println!("{}", version),
                Err(_) => println!("{}", env!("CARGO_PKG_VERSION")),
            }
            return ExitCode::SUCCESS;
        }
        _ => {}
    }

    // Retrieve the settings file
    let settings = match args.value("settings") {
        Some(path) => match Settings::load(&File::new(path)).await {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{}", e.to_string().red());
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    // Initialize logging
    let debug_env = env::var("DEBUG").map(|v| !v.is_empty()).unwrap_or(false);
    let log_options = LogOptions {
        log_level: if args.flag("debug") || debug_env {
            LogLevel::Debug
        } else {
            settings.log_level
        },
        json_format: args.flag("json-logs") || settings.json_logs,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let config = match ApiConfig::from_sources(&settings, |key| env::var(key).ok()) {
        Ok(config) => match args.value("team") {
            Some(team) => config.with_team_id(Some(team.to_string())),
            None => config,
        },
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            eprintln!("Run with --help for more information");
            return ExitCode::FAILURE;
        }
    };
    debug!("Using {:?}", config);

    let client = match ApiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            return ExitCode::FAILURE;
        }
    };

    match commands::run(&client, command, &settings).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            eprintln!("{} {}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
