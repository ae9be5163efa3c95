//! API endpoint paths

use std::fmt;

use url::Url;

use crate::errors::FetchError;

/// Path segments plus query pairs of one API call.
///
/// Segments are percent-encoded when joined onto the base URL, so user input
/// such as a domain or project name can never escape its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Join onto `base`, appending the team scope when one is set
    pub fn to_url(&self, base: &Url, team_id: Option<&str>) -> Result<Url, FetchError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
            .pop_if_empty()
            .extend(&self.segments);

        if !self.query.is_empty() || team_id.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.query {
                pairs.append_pair(key, value);
            }
            if let Some(team_id) = team_id {
                pairs.append_pair("teamId", team_id);
            }
        }

        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, value)?;
        }
        Ok(())
    }
}
