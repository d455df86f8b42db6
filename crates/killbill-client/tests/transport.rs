//! Transport behavior: headers, overrides, follow-location and timeouts.

mod common;

use std::time::Duration;

use common::{audit, created, setup, API_KEY};
use killbill_client::model::{AccountId, AuditLevel, Tenant, TenantId};
use killbill_client::{ClientConfig, ClientError, KillBillClient, RequestOptions};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_created_without_location_fails() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/1.0/kb/tenants"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let err = client
        .tenants()
        .create_tenant(&Tenant::new("acme", "s3cret"), false, &audit())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::MissingLocation));
}

#[tokio::test]
async fn test_follow_disabled_by_caller() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/1.0/kb/tenants"))
        .respond_with(created("/1.0/kb/tenants/whatever"))
        .expect(1)
        .mount(&server)
        .await;

    let opts = audit().with_follow_location(false);
    let err = client
        .tenants()
        .create_tenant(&Tenant::new("acme", "s3cret"), false, &opts)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::EmptyResponse));
}

#[tokio::test]
async fn test_follow_up_get_carries_follow_params_only() {
    let (server, client) = setup().await;
    let tenant_id = TenantId::generate();
    let location = format!("{}/1.0/kb/tenants/{tenant_id}", server.uri());

    Mock::given(method("POST"))
        .and(path("/1.0/kb/tenants"))
        .and(query_param("useGlobalDefault", "false"))
        .respond_with(created(&location))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/tenants/{tenant_id}")))
        .and(query_param("audit", "FULL"))
        .and(header("X-Killbill-ApiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenantId": tenant_id.to_string()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = audit().with_query_param_for_follow("audit", AuditLevel::Full);
    let tenant = client
        .tenants()
        .create_tenant(&Tenant::new("acme", "s3cret"), false, &opts)
        .await
        .unwrap();

    assert_eq!(tenant.tenant_id, Some(tenant_id));
    let requests = server.received_requests().await.unwrap();
    let follow_up = requests.iter().find(|r| r.method.as_str() == "GET").unwrap();
    assert!(follow_up.headers.get("X-Killbill-CreatedBy").is_none());
    assert!(follow_up.body.is_empty());
}

#[tokio::test]
async fn test_request_overrides() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();

    // Base64 of `alice:wonder`.
    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/accounts/{account_id}")))
        .and(header("authorization", "Basic YWxpY2U6d29uZGVy"))
        .and(header("X-Killbill-ApiKey", "other-tenant"))
        .and(header("X-Killbill-ApiSecret", "other-secret"))
        .and(header("X-Request-Id", "req-123"))
        .and(header("X-Trace", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": account_id.to_string()
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opts = RequestOptions::new()
        .with_credentials("alice", "wonder")
        .with_tenant("other-tenant", "other-secret")
        .with_request_id("req-123")
        .with_header("X-Trace", "on");
    let account = client
        .accounts()
        .get_account(account_id, false, false, AuditLevel::None, &opts)
        .await
        .unwrap();

    assert!(account.is_some());
}

#[tokio::test]
async fn test_caller_query_params_come_first() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/tagDefinitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let opts = RequestOptions::new().with_query_param("controlPluginName", "my-plugin");
    client
        .tag_definitions()
        .get_tag_definitions(AuditLevel::Minimal, &opts)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        requests[0].url.query(),
        Some("controlPluginName=my-plugin&audit=MINIMAL")
    );
}

#[tokio::test]
async fn test_server_error_is_api_error_without_exception() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client
        .security()
        .get_current_user_permissions(&RequestOptions::new())
        .await
        .unwrap_err();

    match err {
        ClientError::Api {
            status,
            body,
            billing_exception,
        } => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
            assert!(billing_exception.is_none());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_request_timeout_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let config = ClientConfig::new()
        .with_server_url(server.uri())
        .with_request_timeout_seconds(1);
    let client = KillBillClient::new(&config).unwrap();

    let err = client
        .security()
        .get_current_user_permissions(&RequestOptions::new())
        .await
        .unwrap_err();

    match err {
        ClientError::Http(e) => assert!(e.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}
