//! Settings file management

use serde::{Deserialize, Serialize};

use crate::errors::FetchError;
use crate::filesys::file::File;
use crate::logs::LogLevel;
use crate::source::DEFAULT_MAX_CONCURRENT_DOWNLOADS;

/// Default provider API
pub const DEFAULT_API_BASE: &str = "https://api.vercel.com";

/// vscdl settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub json_logs: bool,

    /// API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Deployment resolution configuration
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// File download configuration
    #[serde(default)]
    pub downloads: DownloadSettings,
}

impl Settings {
    /// Load settings from a JSON file
    pub async fn load(file: &File) -> Result<Self, FetchError> {
        file.read_json::<Settings>().await.map_err(|e| {
            FetchError::ConfigError(format!(
                "Unable to read settings file {}: {}",
                file.path().display(),
                e
            ))
        })
    }
}

/// API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL for the provider API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Team scope applied to every request
    #[serde(default)]
    pub team_id: Option<String>,

    /// Per-request timeout; requests never time out when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            team_id: None,
            request_timeout_secs: None,
        }
    }
}

/// Resolver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverSettings {
    /// How many of a project's most recent deployments are searched for a
    /// ready one
    #[serde(default = "default_project_deployments_limit")]
    pub project_deployments_limit: u32,
}

fn default_project_deployments_limit() -> u32 {
    1
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            project_deployments_limit: default_project_deployments_limit(),
        }
    }
}

/// Download settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadSettings {
    /// Files downloaded at once. Each one holds an open file and a
    /// connection, so this also bounds descriptor usage
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

fn default_max_concurrent() -> usize {
    DEFAULT_MAX_CONCURRENT_DOWNLOADS
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}
