//! Account API tests against a mock server.

mod common;

use common::{audit, created, expect_no_request, setup, API_KEY, API_SECRET, BASIC_AUTH};
use killbill_client::model::{
    Account, AccountId, AuditLevel, Currency, InvoiceEmail, PaymentId, PaymentTransaction,
    TagDefinitionId, TransactionType,
};
use killbill_client::{ClientError, CloseAccountOptions, RequestOptions};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_account_follows_location() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();
    let location = format!("/1.0/kb/accounts/{account_id}");

    Mock::given(method("POST"))
        .and(path("/1.0/kb/accounts"))
        .and(header("X-Killbill-CreatedBy", "integration-test"))
        .and(header("X-Killbill-Reason", "testing"))
        .and(header("X-Killbill-Comment", "from the test suite"))
        .and(header("X-Killbill-ApiKey", API_KEY))
        .and(header("X-Killbill-ApiSecret", API_SECRET))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!({
            "name": "John Doe",
            "externalKey": "john-doe",
            "currency": "USD"
        })))
        .respond_with(created(&location))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(location.as_str()))
        .and(header("X-Killbill-ApiKey", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": account_id.to_string(),
            "name": "John Doe",
            "externalKey": "john-doe",
            "currency": "USD"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let account = Account {
        name: Some("John Doe".to_string()),
        external_key: Some("john-doe".to_string()),
        currency: Some(Currency::new("USD").unwrap()),
        ..Account::default()
    };
    let created = client
        .accounts()
        .create_account(&account, &audit())
        .await
        .unwrap();

    assert_eq!(created.account_id, Some(account_id));
    assert_eq!(created.external_key.as_deref(), Some("john-doe"));
}

#[tokio::test]
async fn test_create_account_requires_created_by() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let err = client
        .accounts()
        .create_account(&Account::default(), &RequestOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "createdBy",
            operation: "create_account"
        }
    ));
}

#[tokio::test]
async fn test_get_account_sends_flags_and_reads_balance() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();

    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/accounts/{account_id}")))
        .and(query_param("accountWithBalance", "true"))
        .and(query_param("accountWithBalanceAndCBA", "false"))
        .and(query_param("audit", "FULL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": account_id.to_string(),
            "accountBalance": 12.5
        })))
        .mount(&server)
        .await;

    let account = client
        .accounts()
        .get_account(account_id, true, false, AuditLevel::Full, &RequestOptions::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(account.account_balance, Some(dec!(12.5)));
}

#[tokio::test]
async fn test_get_unknown_account_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let account = client
        .accounts()
        .get_account_by_key("nobody", false, false, AuditLevel::None, &RequestOptions::new())
        .await
        .unwrap();

    assert!(account.is_none());
}

#[tokio::test]
async fn test_list_of_unknown_account_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let bundles = client
        .accounts()
        .get_account_bundles(AccountId::generate(), None, AuditLevel::None, &RequestOptions::new())
        .await
        .unwrap();

    assert!(bundles.is_empty());
}

#[tokio::test]
async fn test_api_error_carries_billing_exception() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();

    Mock::given(method("DELETE"))
        .and(path(format!("/1.0/kb/accounts/{account_id}")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "className": "org.killbill.billing.account.api.AccountApiException",
            "code": 1001,
            "message": "Account does not exist",
            "stackTrace": []
        })))
        .mount(&server)
        .await;

    let err = client
        .accounts()
        .close_account(account_id, CloseAccountOptions::default(), &audit())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.billing_code(), Some(1001));
    match err {
        ClientError::Api {
            billing_exception: Some(exception),
            ..
        } => assert_eq!(exception.message.as_deref(), Some("Account does not exist")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_close_account_sends_policy() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();

    Mock::given(method("DELETE"))
        .and(path(format!("/1.0/kb/accounts/{account_id}")))
        .and(query_param("cancelAllSubscriptions", "true"))
        .and(query_param("writeOffUnpaidInvoices", "true"))
        .and(query_param("itemAdjustUnpaidInvoices", "false"))
        .and(query_param("removeFutureNotifications", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let close = CloseAccountOptions {
        cancel_all_subscriptions: true,
        write_off_unpaid_invoices: true,
        item_adjust_unpaid_invoices: false,
        remove_future_notifications: true,
    };
    client
        .accounts()
        .close_account(account_id, close, &audit())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_search_encodes_key_in_path() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/1.0/kb/accounts/search/john%20doe"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "name": "John Doe" }])))
        .mount(&server)
        .await;

    let accounts = client
        .accounts()
        .search_accounts("john doe", Default::default(), AuditLevel::None, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].name.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn test_process_payment_rejects_capture() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let transaction = PaymentTransaction {
        transaction_type: Some(TransactionType::Capture),
        amount: Some(dec!(10)),
        currency: Some(Currency::new("USD").unwrap()),
        ..PaymentTransaction::default()
    };
    let err = client
        .accounts()
        .process_payment(AccountId::generate(), &transaction, None, &[], &audit())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_process_payment_requires_currency() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let transaction = PaymentTransaction {
        transaction_type: Some(TransactionType::Purchase),
        amount: Some(dec!(10)),
        ..PaymentTransaction::default()
    };
    let err = client
        .accounts()
        .process_payment(AccountId::generate(), &transaction, None, &[], &audit())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "currency",
            ..
        }
    ));
}

#[tokio::test]
async fn test_add_tags_to_account() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();
    let tag_definition = TagDefinitionId::generate();
    let tags_path = format!("/1.0/kb/accounts/{account_id}/tags");

    Mock::given(method("POST"))
        .and(path(tags_path.as_str()))
        .and(body_json(json!([tag_definition.to_string()])))
        .respond_with(created(&tags_path))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(tags_path.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "tagDefinitionId": tag_definition.to_string(),
            "tagDefinitionName": "AUTO_PAY_OFF",
            "objectType": "ACCOUNT"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let tags = client
        .accounts()
        .metadata()
        .create_tags(account_id, &[tag_definition], &audit())
        .await
        .unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].tag_definition_name.as_deref(), Some("AUTO_PAY_OFF"));
}

#[tokio::test]
async fn test_delete_tags_repeats_tag_def() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();
    let first = TagDefinitionId::generate();
    let second = TagDefinitionId::generate();

    Mock::given(method("DELETE"))
        .and(path(format!("/1.0/kb/accounts/{account_id}/tags")))
        .and(query_param("tagDef", first.to_string()))
        .and(query_param("tagDef", second.to_string()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .accounts()
        .metadata()
        .delete_tags(account_id, &[first, second], &audit())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_email_notifications_round_trip() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();
    let url = format!("/1.0/kb/accounts/{account_id}/emailNotifications");

    Mock::given(method("PUT"))
        .and(path(url.as_str()))
        .and(header("X-Killbill-CreatedBy", "integration-test"))
        .and(body_json(json!({
            "accountId": account_id.to_string(),
            "isNotifiedForInvoices": true
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(url.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": account_id.to_string(),
            "isNotifiedForInvoices": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let setting = InvoiceEmail {
        account_id: Some(account_id),
        is_notified_for_invoices: Some(true),
    };
    client
        .accounts()
        .update_email_notifications(&setting, &audit())
        .await
        .unwrap();

    let stored = client
        .accounts()
        .get_email_notifications(account_id, &RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(stored, Some(setting));
}

#[tokio::test]
async fn test_update_email_notifications_requires_account() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let setting = InvoiceEmail {
        is_notified_for_invoices: Some(false),
        ..InvoiceEmail::default()
    };
    let err = client
        .accounts()
        .update_email_notifications(&setting, &audit())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "accountId",
            operation: "update_email_notifications"
        }
    ));
}

#[tokio::test]
async fn test_chargebacks_for_account() {
    let (server, client) = setup().await;
    let account_id = AccountId::generate();
    let payment_id = PaymentId::generate();

    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/accounts/{account_id}/chargebacks")))
        .and(query_param("audit", "NONE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "accountId": account_id.to_string(),
            "paymentId": payment_id.to_string(),
            "amount": 12.5,
            "currency": "USD"
        }])))
        .mount(&server)
        .await;

    let chargebacks = client
        .accounts()
        .get_chargebacks_for_account(account_id, AuditLevel::None, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(chargebacks.len(), 1);
    assert_eq!(chargebacks[0].payment_id, Some(payment_id));
    assert_eq!(chargebacks[0].amount, Some(dec!(12.5)));
}
