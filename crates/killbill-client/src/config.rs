//! Client configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ClientError;

/// Connection settings for a Kill Bill server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server base URL (default: `http://127.0.0.1:8080`).
    pub server_url: String,

    /// Basic-auth user (default: "admin").
    pub username: String,

    /// Basic-auth password (default: "password").
    pub password: String,

    /// Tenant api key, sent as `X-Killbill-ApiKey`.
    pub api_key: Option<String>,

    /// Tenant api secret, sent as `X-Killbill-ApiSecret`.
    pub api_secret: Option<String>,

    /// Connect timeout in seconds.
    pub connect_timeout_seconds: u64,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            username: "admin".into(),
            password: "password".into(),
            api_key: None,
            api_secret: None,
            connect_timeout_seconds: 10,
            request_timeout_seconds: 10,
            user_agent: concat!("killbill-client-rust/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server URL.
    #[must_use]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = url.into();
        self
    }

    /// Set the basic-auth credentials.
    #[must_use]
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set the tenant.
    #[must_use]
    pub fn with_tenant(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub fn with_connect_timeout_seconds(mut self, seconds: u64) -> Self {
        self.connect_timeout_seconds = seconds;
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_request_timeout_seconds(mut self, seconds: u64) -> Self {
        self.request_timeout_seconds = seconds;
        self
    }

    /// Set the `User-Agent`.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from a secrets file, then environment variables.
    ///
    /// The first of `.secrets/killbill.json` and `../.secrets/killbill.json`
    /// that exists provides the base values; `KILLBILL_*` variables override
    /// them.
    #[must_use]
    pub fn from_env() -> Self {
        let base = load_secrets().unwrap_or_default();
        base.apply_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration from a JSON file with the same shape as
    /// [`ClientConfig`]; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the file cannot be read or
    /// parsed, or holds an invalid server URL.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            ClientError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check the server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] unless the URL parses with an
    /// `http` or `https` scheme.
    pub fn validate(&self) -> Result<url::Url, ClientError> {
        let url = url::Url::parse(&self.server_url).map_err(|e| {
            ClientError::Configuration(format!("invalid server URL {}: {e}", self.server_url))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::Configuration(format!(
                "unsupported URL scheme: {other}"
            ))),
        }
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = var("KILLBILL_URL") {
            self.server_url = url;
        }
        if let Some(user) = var("KILLBILL_USER") {
            self.username = user;
        }
        if let Some(password) = var("KILLBILL_PASSWORD") {
            self.password = password;
        }
        if let Some(key) = var("KILLBILL_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(secret) = var("KILLBILL_API_SECRET") {
            self.api_secret = Some(secret);
        }
        if let Some(seconds) = var("KILLBILL_CONNECT_TIMEOUT_SECONDS").and_then(|s| s.parse().ok()) {
            self.connect_timeout_seconds = seconds;
        }
        if let Some(seconds) = var("KILLBILL_REQUEST_TIMEOUT_SECONDS").and_then(|s| s.parse().ok()) {
            self.request_timeout_seconds = seconds;
        }
        self
    }
}

/// Load the first secrets file found.
fn load_secrets() -> Option<ClientConfig> {
    let secret_paths = [".secrets/killbill.json", "../.secrets/killbill.json"];

    for path in &secret_paths {
        if !Path::new(path).exists() {
            continue;
        }
        match ClientConfig::from_file(path) {
            Ok(config) => {
                tracing::info!(path = %path, "Loaded Kill Bill settings from file");
                return Some(config);
            }
            Err(e) => tracing::warn!(path = %path, error = %e, "Ignoring unreadable secrets file"),
        }
    }

    tracing::debug!("Kill Bill secrets file not found, using environment variables");
    None
}
