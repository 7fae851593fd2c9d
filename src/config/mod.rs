//! Typed configuration from environment variables.
//!
//! Loads once at startup and is shared immutably for the process lifetime.
//! The Render API token is wrapped in secrecy::SecretString to prevent log
//! leaks. Missing Render credentials are NOT a startup failure: the service
//! must still come up and report not-ready, so only a malformed `PORT` can
//! make loading fail.

pub mod secrets;

use crate::auth::AllowList;
use crate::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};

/// Default listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 7070;

#[derive(Debug)]
pub struct Config {
    /// Render API bearer token (`RENDER_API_TOKEN`). May be empty.
    pub api_token: SecretString,
    /// Render service whose build logs we fetch (`RENDER_SERVICE_ID`).
    pub service_id: String,
    /// Keys accepted by the access guard (`ALLOWED_KEYS`, comma-separated).
    pub allow_list: AllowList,
    /// Inbound listen port (`PORT`, default 7070).
    pub port: u16,
    /// Optional OTLP endpoint (`OTEL_ENDPOINT`).
    pub otel_endpoint: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port number: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            api_token: SecretString::from(optional_var("RENDER_API_TOKEN")),
            service_id: optional_var("RENDER_SERVICE_ID"),
            allow_list: AllowList::parse(&optional_var("ALLOWED_KEYS")),
            port,
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
        })
    }

    /// Whether both Render credentials are present and non-empty.
    ///
    /// Drives the `/ready` probe; fetching routes fail with a configuration
    /// error when this is false.
    pub fn has_render_credentials(&self) -> bool {
        !self.api_token.expose_secret().is_empty() && !self.service_id.is_empty()
    }
}

fn optional_var(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}
