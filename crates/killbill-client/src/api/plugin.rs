//! Pass-through to plugin servlets mounted under `/plugins`.
//!
//! Plugins define their own endpoints and payloads, so requests carry an
//! opaque body and responses come back as received, failure statuses
//! included. Query parameters travel in
//! [`RequestOptions::query_params`](crate::RequestOptions).

use reqwest::Method;

use super::PLUGINS;
use crate::error::ClientError;
use crate::http::{KillBillHttpClient, RawResponse};
use crate::options::RequestOptions;

const ANY: &str = "*/*";
const APPLICATION_JSON: &str = "application/json";

/// Plugin pass-through operations.
#[derive(Debug, Clone)]
pub struct PluginApi {
    http: KillBillHttpClient,
}

impl PluginApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// GET `/plugins/{uri}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn get(&self, uri: &str, opts: &RequestOptions) -> Result<RawResponse, ClientError> {
        self.call(Method::GET, uri, None, opts).await
    }

    /// HEAD `/plugins/{uri}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn head(&self, uri: &str, opts: &RequestOptions) -> Result<RawResponse, ClientError> {
        self.call(Method::HEAD, uri, None, opts).await
    }

    /// POST `/plugins/{uri}` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn post(
        &self,
        uri: &str,
        body: Option<String>,
        opts: &RequestOptions,
    ) -> Result<RawResponse, ClientError> {
        self.call(Method::POST, uri, body, opts).await
    }

    /// PUT `/plugins/{uri}` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn put(
        &self,
        uri: &str,
        body: Option<String>,
        opts: &RequestOptions,
    ) -> Result<RawResponse, ClientError> {
        self.call(Method::PUT, uri, body, opts).await
    }

    /// DELETE `/plugins/{uri}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn delete(
        &self,
        uri: &str,
        opts: &RequestOptions,
    ) -> Result<RawResponse, ClientError> {
        self.call(Method::DELETE, uri, None, opts).await
    }

    /// OPTIONS `/plugins/{uri}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot be reached.
    pub async fn options(
        &self,
        uri: &str,
        opts: &RequestOptions,
    ) -> Result<RawResponse, ClientError> {
        self.call(Method::OPTIONS, uri, None, opts).await
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
        opts: &RequestOptions,
    ) -> Result<RawResponse, ClientError> {
        let mut request = self
            .http
            .request(method, plugin_path(uri))
            .accept(ANY);
        if let Some(body) = body {
            request = request.text(APPLICATION_JSON, body);
        }
        request.send_raw(opts).await
    }
}

fn plugin_path(uri: &str) -> String {
    format!("{PLUGINS}/{}", uri.trim_start_matches('/'))
}
