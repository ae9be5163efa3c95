//! API client configuration

use std::fmt;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::config::settings::Settings;
use crate::errors::FetchError;

/// Environment variable holding the bearer token
pub const TOKEN_ENV: &str = "VERCEL_API_TOKEN";
/// Older name of [`TOKEN_ENV`], still honored
pub const LEGACY_TOKEN_ENV: &str = "VERCEL_TOKEN";
pub const API_BASE_ENV: &str = "VERCEL_API_BASE";
pub const TEAM_ENV: &str = "VERCEL_TEAM";

/// Immutable configuration for the API client
#[derive(Clone)]
pub struct ApiConfig {
    base_url: Url,
    token: SecretString,
    team_id: Option<String>,
    timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        let token: String = token.into();
        if token.trim().is_empty() {
            return Err(FetchError::ConfigError("API token is empty".to_string()));
        }

        Ok(Self {
            base_url,
            token: SecretString::from(token),
            team_id: None,
            timeout: None,
        })
    }

    pub fn with_team_id(mut self, team_id: Option<String>) -> Self {
        self.team_id = team_id.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Merge settings with the environment. Environment values win over the
    /// settings file; `env` is a lookup so callers decide where values come from.
    pub fn from_sources<F>(settings: &Settings, env: F) -> Result<Self, FetchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = env(TOKEN_ENV)
            .or_else(|| env(LEGACY_TOKEN_ENV))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                FetchError::ConfigError(format!(
                    "Missing {}. Set it in the environment to a Vercel access token",
                    TOKEN_ENV
                ))
            })?;

        let base_url = env(API_BASE_ENV)
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| settings.api.base_url.clone());

        let team_id = env(TEAM_ENV).or_else(|| settings.api.team_id.clone());

        Ok(Self::new(&base_url, token)?
            .with_team_id(team_id)
            .with_timeout(settings.api.request_timeout_secs.map(Duration::from_secs)))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[REDACTED]")
            .field("team_id", &self.team_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}
