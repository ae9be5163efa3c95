//! Deployment identifiers

use std::fmt;

use url::Url;

/// Prefix of canonical deployment ids
pub const DEPLOYMENT_ID_PREFIX: &str = "dpl_";

/// What the user typed to name a deployment: a deployment id, a domain, or a
/// project name.
///
/// URLs are reduced to their host and surrounding whitespace and slashes are
/// dropped, so `https://site.vercel.app/` and `site.vercel.app` are the same
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentIdentifier(String);

impl DeploymentIdentifier {
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        let value = if trimmed.contains("://") {
            Url::parse(trimmed)
                .ok()
                .and_then(|url| url.host_str().map(str::to_string))
                .unwrap_or_else(|| trimmed.to_string())
        } else {
            trimmed.trim_end_matches('/').to_string()
        };

        (!value.is_empty()).then_some(Self(value))
    }

    /// The identifier itself when it already is a deployment id
    pub fn as_deployment_id(&self) -> Option<&str> {
        self.0
            .starts_with(DEPLOYMENT_ID_PREFIX)
            .then_some(self.0.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeploymentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
