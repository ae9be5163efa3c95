//! HTTP client implementation

use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use vercel_models::ApiErrorBody;

use crate::config::ApiConfig;
use crate::errors::FetchError;
use crate::http::endpoint::Endpoint;

/// Authenticated client for the provider API.
///
/// Requests are never retried; a failure surfaces immediately and the caller
/// owns any retry policy.
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut builder =
            Client::builder().user_agent(concat!("vscdl/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, endpoint: &Endpoint) -> Result<RequestBuilder, FetchError> {
        let url = endpoint.to_url(self.config.base_url(), self.config.team_id())?;
        debug!("{} {}", method, url);

        Ok(self
            .client
            .request(method, url)
            .header(header::AUTHORIZATION, self.config.bearer()))
    }

    async fn send(&self, request: RequestBuilder, endpoint: &Endpoint) -> Result<Response, FetchError> {
        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP request to {} failed: {} - {}", endpoint, status, body);
            return Err(api_error(status.as_u16(), &body));
        }

        Ok(response)
    }

    /// Make a GET request and parse the JSON body
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, FetchError> {
        let request = self.request(Method::GET, endpoint)?;
        let response = self.send(request, endpoint).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Make a GET request and hand back the undrained response
    pub async fn get_raw(&self, endpoint: &Endpoint) -> Result<Response, FetchError> {
        let request = self.request(Method::GET, endpoint)?;
        self.send(request, endpoint).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, FetchError> {
        let request = self.request(Method::POST, endpoint)?.json(body);
        let response = self.send(request, endpoint).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Make a PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<T, FetchError> {
        let request = self.request(Method::PATCH, endpoint)?.json(body);
        let response = self.send(request, endpoint).await?;
        let body = response.json().await?;
        Ok(body)
    }

    /// Make a DELETE request, discarding any response body
    pub async fn delete(&self, endpoint: &Endpoint) -> Result<(), FetchError> {
        let request = self.request(Method::DELETE, endpoint)?;
        self.send(request, endpoint).await?;
        Ok(())
    }
}

/// Build an `ApiError` from a failed response, preferring the provider's
/// `{"error": {...}}` envelope over the raw body
fn api_error(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => FetchError::ApiError {
            status,
            code: parsed.error.code,
            message: parsed.error.message.unwrap_or_else(|| body.to_string()),
        },
        Err(_) => FetchError::ApiError {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}
