//! Render API client for fetching build logs.
//!
//! One authenticated GET against the Render logs endpoint, single attempt,
//! fixed 30-second timeout. The response body is treated as opaque text
//! regardless of its declared content type.

use crate::config::Config;
use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Production Render API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.render.com/v1";

/// Upstream request timeout. No retries are attempted.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RenderClient {
    http: reqwest::Client,
    base_url: String,
    service_id: String,
    api_token: SecretString,
}

impl RenderClient {
    /// Build a client from loaded configuration.
    ///
    /// Succeeds even when credentials are empty; the credential check
    /// happens per call so the service can run permanently-unready.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Build a client against a non-default base URL. Tests point this at a
    /// local stand-in for the Render API.
    pub fn with_base_url(config: &Config, base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_id: config.service_id.clone(),
            api_token: config.api_token.clone(),
        })
    }

    /// Fetch the build logs for the configured service.
    ///
    /// # Errors
    /// - [`Error::Config`] when the token or service id is empty, checked
    ///   before any network I/O.
    /// - [`Error::Transport`] on connect failure or timeout.
    /// - [`Error::UpstreamStatus`] on a non-2xx response.
    pub async fn fetch_build_logs(&self) -> Result<String> {
        let token = self.api_token.expose_secret();
        if token.is_empty() || self.service_id.is_empty() {
            return Err(Error::Config(
                "RENDER_API_TOKEN and RENDER_SERVICE_ID must be set as environment variables"
                    .to_string(),
            ));
        }

        let url = format!("{}/services/{}/logs", self.base_url, self.service_id);
        tracing::debug!(url = %url, "fetching build logs");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
