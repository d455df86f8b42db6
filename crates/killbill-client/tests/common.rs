//! Shared fixtures for integration tests.
//!
//! Each test starts its own `MockServer` standing in for Kill Bill and a
//! client pointed at it with tenant `bob`/`lazar`.

#![allow(dead_code)]

use killbill_client::{ClientConfig, KillBillClient, RequestOptions};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Base64 of `admin:password`.
pub const BASIC_AUTH: &str = "Basic YWRtaW46cGFzc3dvcmQ=";

pub const API_KEY: &str = "bob";
pub const API_SECRET: &str = "lazar";

/// Start a mock server and a client pointed at it.
pub async fn setup() -> (MockServer, KillBillClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new()
        .with_server_url(server.uri())
        .with_tenant(API_KEY, API_SECRET);
    let client = KillBillClient::new(&config).unwrap();
    (server, client)
}

/// Options for a mutating call.
pub fn audit() -> RequestOptions {
    RequestOptions::audit("integration-test", "testing", "from the test suite")
}

/// Fail the test if any request reaches the server.
pub async fn expect_no_request(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

/// A `201 Created` pointing at `location`.
pub fn created(location: impl AsRef<str>) -> ResponseTemplate {
    ResponseTemplate::new(201).insert_header("Location", location.as_ref())
}
