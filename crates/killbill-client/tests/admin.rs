//! Admin, tenant, catalog, usage and plugin API tests against a mock server.

mod common;

use chrono::NaiveDate;
use common::{audit, created, expect_no_request, setup};
use killbill_client::model::{
    AccountId, AdminPayment, PaymentId, SubscriptionId, SubscriptionUsageRecord, Tenant,
    TenantId, TransactionId, TransactionStatus, UnitUsageRecord, UsageRecord,
};
use killbill_client::{ClientError, Pagination, RequestOptions};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_invalidate_named_cache() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/1.0/kb/admin/cache"))
        .and(query_param("cacheName", "account-record-id"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .admin()
        .invalidates_cache(Some("account-record-id"), &RequestOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalidate_account_cache() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();

    Mock::given(method("DELETE"))
        .and(path(format!("/1.0/kb/admin/cache/accounts/{account_id}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .admin()
        .invalidates_cache_by_account(account_id, &RequestOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_parked_accounts_are_paginated() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/1.0/kb/admin/invoices"))
        .and(query_param("offset", "200"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    client
        .admin()
        .trigger_invoice_generation_for_parked_accounts(
            Pagination::new(200, 50),
            &RequestOptions::new(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_transaction_state() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();
    let transaction_id = TransactionId::generate();

    Mock::given(method("PUT"))
        .and(path(format!(
            "/1.0/kb/admin/payments/{payment_id}/transactions/{transaction_id}"
        )))
        .and(body_json(json!({
            "currentPaymentStateName": "PURCHASE_SUCCESS",
            "transactionStatus": "SUCCESS"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let state = AdminPayment {
        current_payment_state_name: Some("PURCHASE_SUCCESS".to_string()),
        transaction_status: Some(TransactionStatus::Success),
        ..AdminPayment::default()
    };
    client
        .admin()
        .update_payment_transaction_state(&state, payment_id, transaction_id, &RequestOptions::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_tenant_follows_location() {
    let (server, client) = setup().await;
    let tenant_id = TenantId::generate();
    let location = format!("/1.0/kb/tenants/{tenant_id}");

    Mock::given(method("POST"))
        .and(path("/1.0/kb/tenants"))
        .and(query_param("useGlobalDefault", "true"))
        .and(body_json(json!({ "apiKey": "acme", "apiSecret": "s3cret" })))
        .respond_with(created(&location))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(location.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tenantId": tenant_id.to_string(),
            "apiKey": "acme"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tenant = client
        .tenants()
        .create_tenant(&Tenant::new("acme", "s3cret"), true, &audit())
        .await
        .unwrap();

    assert_eq!(tenant.tenant_id, Some(tenant_id));
    assert!(tenant.api_secret.is_none());
}

#[tokio::test]
async fn test_create_tenant_requires_secret() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let tenant = Tenant {
        api_key: Some("acme".to_string()),
        ..Tenant::default()
    };
    let err = client
        .tenants()
        .create_tenant(&tenant, false, &audit())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "apiSecret",
            ..
        }
    ));
}

#[tokio::test]
async fn test_upload_plugin_configuration_as_text() {
    let (server, client) = setup().await;
    let location = "/1.0/kb/tenants/uploadPluginConfig/killbill-stripe";

    Mock::given(method("POST"))
        .and(path(location))
        .and(header("content-type", "text/plain"))
        .and(body_string("org.killbill.billing.plugin.stripe.apiKey=sk_test"))
        .respond_with(created(location))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(location))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "key": "PLUGIN_CONFIG_killbill-stripe",
            "values": ["org.killbill.billing.plugin.stripe.apiKey=sk_test"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stored = client
        .tenants()
        .upload_plugin_configuration(
            "killbill-stripe",
            "org.killbill.billing.plugin.stripe.apiKey=sk_test",
            &audit(),
        )
        .await
        .unwrap();

    assert_eq!(stored.values.len(), 1);
}

#[tokio::test]
async fn test_upload_catalog_xml() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/1.0/kb/catalog/xml"))
        .and(header("content-type", "text/xml"))
        .and(body_string("<catalog/>"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client
        .catalog()
        .upload_catalog_xml("<catalog/>", &audit())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_record_usage_requires_units() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let record = SubscriptionUsageRecord {
        subscription_id: Some(SubscriptionId::generate()),
        ..SubscriptionUsageRecord::default()
    };
    let err = client
        .usage()
        .record_usage(&record, &audit())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "unitUsageRecords",
            ..
        }
    ));
}

#[tokio::test]
async fn test_record_and_read_usage() {
    let (server, client) = setup().await;
    let subscription_id = SubscriptionId::generate();

    Mock::given(method("POST"))
        .and(path("/1.0/kb/usages"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/usages/{subscription_id}/api-calls")))
        .and(query_param("startDate", "2024-01-01"))
        .and(query_param("endDate", "2024-02-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscriptionId": subscription_id.to_string(),
            "startDate": "2024-01-01",
            "endDate": "2024-02-01",
            "rolledUpUnits": [{ "unitType": "api-calls", "amount": 42 }]
        })))
        .mount(&server)
        .await;

    let record = SubscriptionUsageRecord {
        subscription_id: Some(subscription_id),
        tracking_id: Some("batch-1".to_string()),
        unit_usage_records: vec![UnitUsageRecord {
            unit_type: Some("api-calls".to_string()),
            usage_records: vec![UsageRecord {
                record_date: NaiveDate::from_ymd_opt(2024, 1, 15),
                amount: Some(dec!(42)),
            }],
        }],
    };
    client.usage().record_usage(&record, &audit()).await.unwrap();

    let usage = client
        .usage()
        .get_usage(
            subscription_id,
            "api-calls",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            &RequestOptions::new(),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(usage.rolled_up_units.len(), 1);
    assert_eq!(usage.rolled_up_units[0].amount, Some(dec!(42)));
}

#[tokio::test]
async fn test_plugin_passthrough_keeps_failure_status() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/plugins/killbill-stripe/checkout"))
        .and(query_param("kbAccountId", "abc"))
        .and(body_string("{\"amount\":10}"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let opts = RequestOptions::new().with_query_param("kbAccountId", "abc");
    let response = client
        .plugins()
        .post(
            "killbill-stripe/checkout",
            Some("{\"amount\":10}".to_string()),
            &opts,
        )
        .await
        .unwrap();

    assert_eq!(response.status, 500);
    assert!(!response.is_success());
    assert_eq!(response.text(), "boom");
}

#[tokio::test]
async fn test_permissions() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/security/permissions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!(["account:create", "invoice:*"])),
        )
        .mount(&server)
        .await;

    let permissions = client
        .security()
        .get_current_user_permissions(&RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(permissions, vec!["account:create", "invoice:*"]);
}
