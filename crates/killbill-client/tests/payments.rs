//! Payment, invoice payment and payment method API tests against a mock
//! server.

mod common;

use common::{audit, created, expect_no_request, setup};
use killbill_client::model::{
    AuditLevel, Currency, InvoicePaymentTransaction, PaymentId, PaymentMethodId,
    PaymentTransaction, TransactionType,
};
use killbill_client::{ClientError, PaymentLookup, RequestOptions};
use rust_decimal_macros::dec;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn payment_json(payment_id: PaymentId) -> serde_json::Value {
    json!({
        "paymentId": payment_id.to_string(),
        "paymentExternalKey": "order-7",
        "currency": "EUR",
        "transactions": [
            { "transactionType": "PURCHASE", "amount": 100.0, "status": "SUCCESS" },
            { "transactionType": "REFUND", "amount": 20.0, "status": "SUCCESS" },
            { "transactionType": "REFUND", "amount": 5.0, "status": "PENDING" }
        ]
    })
}

#[tokio::test]
async fn test_refund_sends_plugin_properties() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();
    let location = format!("/1.0/kb/payments/{payment_id}");

    Mock::given(method("POST"))
        .and(path(format!("/1.0/kb/payments/{payment_id}/refunds")))
        .and(query_param("pluginProperty", "reason=duplicate+charge"))
        .respond_with(created(&location))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(location.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(payment_id)))
        .expect(1)
        .mount(&server)
        .await;

    let refund = PaymentTransaction {
        amount: Some(dec!(20)),
        currency: Some(Currency::new("EUR").unwrap()),
        ..PaymentTransaction::default()
    };
    let properties = [("reason".to_string(), "duplicate charge".to_string())];
    let payment = client
        .payments()
        .refund_payment(payment_id, &refund, &properties, &audit())
        .await
        .unwrap();

    assert_eq!(payment.payment_id, Some(payment_id));
    assert_eq!(payment.transactions.len(), 3);
}

#[tokio::test]
async fn test_refund_requires_amount() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let err = client
        .payments()
        .refund_payment(
            PaymentId::generate(),
            &PaymentTransaction::default(),
            &[],
            &audit(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "amount",
            operation: "refund_payment"
        }
    ));
}

#[tokio::test]
async fn test_chargeback_reversal_requires_external_key() {
    let (server, client) = setup().await;
    expect_no_request(&server).await;

    let err = client
        .payments()
        .chargeback_reversal(PaymentId::generate(), &PaymentTransaction::default(), &audit())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MissingParameter {
            parameter: "transactionExternalKey",
            ..
        }
    ));
}

#[tokio::test]
async fn test_refunds_are_filtered_from_transactions() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();

    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/payments/{payment_id}")))
        .and(query_param("withPluginInfo", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(payment_id)))
        .mount(&server)
        .await;

    let refunds = client
        .payments()
        .get_refunds_for_payment(payment_id, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(refunds.len(), 2);
    assert!(refunds
        .iter()
        .all(|t| t.transaction_type == Some(TransactionType::Refund)));
    assert_eq!(refunds[0].amount, Some(dec!(20)));
}

#[tokio::test]
async fn test_refunds_of_unknown_payment_are_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let refunds = client
        .payments()
        .get_refunds_for_payment(PaymentId::generate(), &RequestOptions::new())
        .await
        .unwrap();

    assert!(refunds.is_empty());
}

#[tokio::test]
async fn test_get_payment_by_external_key() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();

    Mock::given(method("GET"))
        .and(path("/1.0/kb/payments"))
        .and(query_param("externalKey", "order-7"))
        .and(query_param("withAttempts", "true"))
        .and(query_param("audit", "MINIMAL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(payment_id)))
        .mount(&server)
        .await;

    let lookup = PaymentLookup {
        with_attempts: true,
        audit: AuditLevel::Minimal,
        ..PaymentLookup::default()
    };
    let payment = client
        .payments()
        .get_payment_by_external_key("order-7", &lookup, &RequestOptions::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(payment.payment_external_key.as_deref(), Some("order-7"));
}

#[tokio::test]
async fn test_void_payment_deletes_with_body() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();
    let location = format!("/1.0/kb/payments/{payment_id}");

    Mock::given(method("DELETE"))
        .and(path(location.as_str()))
        .respond_with(created(&location))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(location.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(payment_json(payment_id)))
        .expect(1)
        .mount(&server)
        .await;

    let void = PaymentTransaction {
        transaction_external_key: Some("void-1".to_string()),
        ..PaymentTransaction::default()
    };
    let payment = client
        .payments()
        .void_payment(payment_id, &void, &[], &audit())
        .await
        .unwrap();

    assert_eq!(payment.payment_id, Some(payment_id));
}

#[tokio::test]
async fn test_invoice_payment_refund_with_adjustments() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();
    let payment_method_id = PaymentMethodId::generate();
    let location = format!("/1.0/kb/invoicePayments/{payment_id}");

    Mock::given(method("POST"))
        .and(path(format!("/1.0/kb/invoicePayments/{payment_id}/refunds")))
        .and(query_param("externalPayment", "true"))
        .and(query_param("paymentMethodId", payment_method_id.to_string()))
        .respond_with(created(&location))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(location.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "targetInvoiceId": null,
            "paymentId": payment_id.to_string(),
            "refundedAmount": 10.0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let refund = InvoicePaymentTransaction {
        is_adjusted: Some(true),
        transaction: PaymentTransaction {
            amount: Some(dec!(10)),
            ..PaymentTransaction::default()
        },
        ..InvoicePaymentTransaction::default()
    };
    let payment = client
        .invoice_payments()
        .create_refund_with_adjustments(
            payment_id,
            &refund,
            true,
            Some(payment_method_id),
            &[],
            &audit(),
        )
        .await
        .unwrap();

    assert_eq!(payment.payment.payment_id, Some(payment_id));
    assert_eq!(payment.payment.refunded_amount, Some(dec!(10)));
}

#[tokio::test]
async fn test_delete_default_payment_method_flags() {
    let (server, client) = setup().await;
    let payment_method_id = PaymentMethodId::generate();

    Mock::given(method("DELETE"))
        .and(path(format!("/1.0/kb/paymentMethods/{payment_method_id}")))
        .and(query_param("deleteDefaultPmWithAutoPayOff", "true"))
        .and(query_param("forceDefaultPmDeletion", "false"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client
        .payment_methods()
        .delete_payment_method(payment_method_id, true, false, &[], &audit())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_chargebacks_for_payment() {
    let (server, client) = setup().await;
    let payment_id = PaymentId::generate();

    Mock::given(method("GET"))
        .and(path(format!("/1.0/kb/payments/{payment_id}/chargebacks")))
        .and(query_param("audit", "FULL"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "paymentId": payment_id.to_string(),
            "amount": 40.0,
            "currency": "EUR",
            "auditLogs": [{ "changeType": "INSERT", "changedBy": "admin" }]
        }])))
        .mount(&server)
        .await;

    let chargebacks = client
        .payments()
        .get_chargebacks_for_payment(payment_id, AuditLevel::Full, &RequestOptions::new())
        .await
        .unwrap();

    assert_eq!(chargebacks.len(), 1);
    assert_eq!(chargebacks[0].amount, Some(dec!(40)));
    assert_eq!(chargebacks[0].audit_logs.len(), 1);
}

#[tokio::test]
async fn test_chargebacks_of_unknown_payment_are_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let chargebacks = client
        .payments()
        .get_chargebacks_for_payment(
            PaymentId::generate(),
            AuditLevel::None,
            &RequestOptions::new(),
        )
        .await
        .unwrap();

    assert!(chargebacks.is_empty());
}
