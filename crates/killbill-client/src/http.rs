//! Shared HTTP transport.
//!
//! Every API call goes through [`KillBillHttpClient::request`], which returns
//! an [`ApiRequest`] builder. The builder attaches authentication, tenant and
//! audit headers, optionally follows the `Location` of a `201 Created`, and
//! decodes the response in one of four ways:
//!
//! - [`ApiRequest::send_json`]: a JSON body is required.
//! - [`ApiRequest::send_optional`]: `404` on a GET and empty bodies map to `None`.
//! - [`ApiRequest::send_unit`] / [`ApiRequest::send_text`]: no body, or plain text.
//! - [`ApiRequest::send_raw`]: the response as received, no status mapping.

use std::time::Duration;

use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{BillingException, ClientError};
use crate::options::RequestOptions;
use crate::query::{CallCompletion, QueryParams};

/// Header carrying the tenant api key.
pub const HEADER_API_KEY: &str = "X-Killbill-ApiKey";
/// Header carrying the tenant api secret.
pub const HEADER_API_SECRET: &str = "X-Killbill-ApiSecret";
/// Header carrying the author of a change.
pub const HEADER_CREATED_BY: &str = "X-Killbill-CreatedBy";
/// Header carrying the reason of a change.
pub const HEADER_REASON: &str = "X-Killbill-Reason";
/// Header carrying the comment of a change.
pub const HEADER_COMMENT: &str = "X-Killbill-Comment";
/// Header carrying the request id.
pub const HEADER_REQUEST_ID: &str = "X-Request-Id";

const APPLICATION_JSON: &str = "application/json";

/// Low-level client shared by every API.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct KillBillHttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    api_key: Option<String>,
    api_secret: Option<String>,
    request_timeout: Duration,
}

impl KillBillHttpClient {
    /// Create a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] for an invalid server URL and
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let request_timeout = Duration::from_secs(config.request_timeout_seconds);

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            request_timeout,
        })
    }

    /// Server base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Start a request to `path`, which is relative to the server root.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest<'_> {
        ApiRequest {
            http: self,
            method,
            path: path.into(),
            query: QueryParams::new(),
            body: None,
            accept: APPLICATION_JSON,
            follow: false,
            timeout: None,
        }
    }

    /// Start a GET.
    pub fn get(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::GET, path)
    }

    /// Start a HEAD.
    pub fn head(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::HEAD, path)
    }

    /// Start an OPTIONS.
    pub fn options(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::OPTIONS, path)
    }

    /// Start a POST.
    pub fn post(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::POST, path)
    }

    /// Start a PUT.
    pub fn put(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::PUT, path)
    }

    /// Start a DELETE.
    pub fn delete(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::DELETE, path)
    }

    fn url(&self, path: &str, query: &QueryParams) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ClientError::InvalidArgument(format!("invalid path {path}: {e}")))?;
        append_query(&mut url, query);
        Ok(url)
    }

    fn resolve_location(&self, location: &str, query: &QueryParams) -> Result<Url, ClientError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid server URL: {e}")))?;
        let mut url = base
            .join(location)
            .map_err(|e| ClientError::InvalidArgument(format!("invalid Location {location}: {e}")))?;
        append_query(&mut url, query);
        Ok(url)
    }

    async fn send_once(
        &self,
        method: Method,
        url: Url,
        request: &ApiRequest<'_>,
        opts: &RequestOptions,
        follow_up: bool,
    ) -> Result<RawResponse, ClientError> {
        let user = opts.user.as_deref().unwrap_or(&self.username);
        let password = opts.password.as_deref().unwrap_or(&self.password);

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .basic_auth(user, Some(password))
            .header(ACCEPT, request.accept);

        if let Some(key) = opts.tenant_api_key.as_ref().or(self.api_key.as_ref()) {
            builder = builder.header(HEADER_API_KEY, key);
        }
        if let Some(secret) = opts.tenant_api_secret.as_ref().or(self.api_secret.as_ref()) {
            builder = builder.header(HEADER_API_SECRET, secret);
        }
        if let Some(request_id) = &opts.request_id {
            builder = builder.header(HEADER_REQUEST_ID, request_id);
        }
        if !follow_up {
            if let Some(created_by) = &opts.created_by {
                builder = builder.header(HEADER_CREATED_BY, created_by);
            }
            if let Some(reason) = &opts.reason {
                builder = builder.header(HEADER_REASON, reason);
            }
            if let Some(comment) = &opts.comment {
                builder = builder.header(HEADER_COMMENT, comment);
            }
        }
        for (name, value) in &opts.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        // The follow-up GET of a create carries neither its body nor its audit trail.
        if let Some(body) = request.body.as_ref().filter(|_| !follow_up) {
            builder = builder
                .header(CONTENT_TYPE, body.content_type.as_str())
                .body(body.content.clone());
        }

        tracing::debug!(method = %method, url = %url, "Sending Kill Bill request");
        let response = builder.send().await?;
        let raw = RawResponse::read(response).await?;
        tracing::debug!(method = %method, url = %url, status = raw.status, "Received Kill Bill response");
        Ok(raw)
    }
}

fn append_query(url: &mut Url, query: &QueryParams) {
    if query.is_empty() {
        return;
    }
    let mut pairs = url.query_pairs_mut();
    for (key, value) in query.iter() {
        pairs.append_pair(key, value);
    }
}

#[derive(Debug, Clone)]
struct RequestBody {
    content_type: String,
    content: Vec<u8>,
}

/// A request being built. Created by [`KillBillHttpClient::request`].
#[derive(Debug)]
#[must_use = "a request does nothing until it is sent"]
pub struct ApiRequest<'a> {
    http: &'a KillBillHttpClient,
    method: Method,
    path: String,
    query: QueryParams,
    body: Option<RequestBody>,
    accept: &'static str,
    follow: bool,
    timeout: Option<Duration>,
}

impl ApiRequest<'_> {
    /// Set the operation's query parameters. They are sent after the
    /// caller's [`RequestOptions::query_params`].
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Send `body` as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialization`] if the body cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(RequestBody {
            content_type: APPLICATION_JSON.to_string(),
            content: serde_json::to_vec(body)?,
        });
        Ok(self)
    }

    /// Send a text body with the given content type.
    pub fn text(mut self, content_type: &str, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody {
            content_type: content_type.to_string(),
            content: body.into().into_bytes(),
        });
        self
    }

    /// Set the `Accept` header (default: `application/json`).
    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }

    /// Follow the `Location` of a `201 Created` unless the caller disabled it.
    pub fn follow_location(mut self) -> Self {
        self.follow = true;
        self
    }

    /// Override the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Raise the timeout so the server can wait for completion.
    pub fn call_completion(mut self, completion: CallCompletion) -> Self {
        if completion.is_active() {
            self.timeout = Some(completion.http_timeout(self.http.request_timeout));
        }
        self
    }

    /// Send and return the response as received, without status mapping.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure and
    /// [`ClientError::MissingLocation`] if a required follow has no target.
    pub async fn send_raw(self, opts: &RequestOptions) -> Result<RawResponse, ClientError> {
        let mut query = opts.query_params.clone();
        query.extend(&self.query);
        let url = self.http.url(&self.path, &query)?;

        let raw = self
            .http
            .send_once(self.method.clone(), url, &self, opts, false)
            .await?;

        let follow = opts.follow_location.unwrap_or(self.follow);
        if !follow || raw.status != StatusCode::CREATED.as_u16() {
            return Ok(raw);
        }

        let location = raw.header(LOCATION.as_str()).ok_or(ClientError::MissingLocation)?;
        let target = self
            .http
            .resolve_location(location, &opts.query_params_for_follow)?;
        tracing::debug!(location = %target, "Following Location of created resource");

        self.http
            .send_once(Method::GET, target, &self, opts, true)
            .await
    }

    /// Send and decode a required JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for failure statuses and
    /// [`ClientError::EmptyResponse`] when the body is empty.
    pub async fn send_json<T: DeserializeOwned>(self, opts: &RequestOptions) -> Result<T, ClientError> {
        let raw = self.send_raw(opts).await?.error_for_status()?;
        if raw.body.is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        raw.json()
    }

    /// Send and decode an optional JSON body.
    ///
    /// A `404` answering a GET or HEAD, a `204` and an empty body all give
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for other failure statuses.
    pub async fn send_optional<T: DeserializeOwned>(
        self,
        opts: &RequestOptions,
    ) -> Result<Option<T>, ClientError> {
        let lookup = matches!(self.method, Method::GET | Method::HEAD);
        let raw = self.send_raw(opts).await?;
        if lookup && raw.status == StatusCode::NOT_FOUND.as_u16() {
            return Ok(None);
        }
        let raw = raw.error_for_status()?;
        if raw.status == StatusCode::NO_CONTENT.as_u16() || raw.body.is_empty() {
            return Ok(None);
        }
        raw.json().map(Some)
    }

    /// Send and discard the body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for failure statuses.
    pub async fn send_unit(self, opts: &RequestOptions) -> Result<(), ClientError> {
        self.send_raw(opts).await?.error_for_status()?;
        Ok(())
    }

    /// Send and return the body as text; `404` on a GET gives `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for other failure statuses.
    pub async fn send_text(self, opts: &RequestOptions) -> Result<Option<String>, ClientError> {
        let lookup = matches!(self.method, Method::GET | Method::HEAD);
        let raw = self.send_raw(opts).await?;
        if lookup && raw.status == StatusCode::NOT_FOUND.as_u16() {
            return Ok(None);
        }
        Ok(Some(raw.error_for_status()?.text()))
    }
}

/// A response as received from the server.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

impl RawResponse {
    async fn read(response: reqwest::Response) -> Result<Self, ClientError> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();
        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of a header, if it is valid text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialization`] if the body does not decode.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Turn a failure status into [`ClientError::Api`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] for any status of 400 or above.
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.status < 400 {
            return Ok(self);
        }

        let body = self.text();
        let billing_exception = serde_json::from_slice::<BillingException>(&self.body).ok();
        tracing::warn!(
            status = self.status,
            code = billing_exception.as_ref().and_then(|e| e.code),
            message = billing_exception.as_ref().and_then(|e| e.message.as_deref()),
            "Kill Bill request failed"
        );
        Err(ClientError::Api {
            status: self.status,
            body,
            billing_exception,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            headers: HeaderMap::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn client_trims_trailing_slash() {
        let config = ClientConfig::new().with_server_url("http://localhost:8080/");
        let http = KillBillHttpClient::new(&config).unwrap();
        assert_eq!(http.base_url(), "http://localhost:8080");
    }

    #[test]
    fn rejects_invalid_url() {
        let config = ClientConfig::new().with_server_url("localhost");
        assert!(matches!(
            KillBillHttpClient::new(&config),
            Err(ClientError::Configuration(_))
        ));
    }

    #[test]
    fn builds_url_with_encoded_query() {
        let http = KillBillHttpClient::new(&ClientConfig::default()).unwrap();
        let query = QueryParams::new()
            .with("externalKey", "a b")
            .with("pluginProperty", "k=v");
        let url = http.url("/1.0/kb/accounts", &query).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8080/1.0/kb/accounts?externalKey=a+b&pluginProperty=k%3Dv"
        );
    }

    #[test]
    fn resolves_relative_and_absolute_locations() {
        let http = KillBillHttpClient::new(&ClientConfig::default()).unwrap();
        let none = QueryParams::new();

        let relative = http.resolve_location("/1.0/kb/accounts/42", &none).unwrap();
        assert_eq!(relative.as_str(), "http://127.0.0.1:8080/1.0/kb/accounts/42");

        let absolute = http
            .resolve_location("http://other:9090/1.0/kb/accounts/42", &QueryParams::new().with("audit", "FULL"))
            .unwrap();
        assert_eq!(absolute.as_str(), "http://other:9090/1.0/kb/accounts/42?audit=FULL");
    }

    #[test]
    fn error_for_status_parses_billing_exception() {
        let err = raw(400, r#"{"code": 2, "message": "bad currency"}"#)
            .error_for_status()
            .unwrap_err();
        match err {
            ClientError::Api {
                status,
                billing_exception: Some(exception),
                ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(exception.message.as_deref(), Some("bad currency"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn error_for_status_keeps_non_json_body() {
        let err = raw(502, "<html>Bad Gateway</html>").error_for_status().unwrap_err();
        match err {
            ClientError::Api {
                status,
                body,
                billing_exception,
            } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
                assert!(billing_exception.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(raw(204, "").error_for_status().unwrap().is_success());
    }
}
