//! Payments, transactions, attempts, payment methods and gateway payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::currency::Currency;
use crate::enums::{TransactionStatus, TransactionType};
use crate::ids::{AccountId, PaymentAttemptId, PaymentId, PaymentMethodId, TransactionId};

/// A payment and its transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Paying account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    /// Sequential payment number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_number: Option<String>,
    /// Caller-chosen unique key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_external_key: Option<String>,
    /// Amount authorized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_amount: Option<Decimal>,
    /// Amount captured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_amount: Option<Decimal>,
    /// Amount purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchased_amount: Option<Decimal>,
    /// Amount refunded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunded_amount: Option<Decimal>,
    /// Amount credited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credited_amount: Option<Decimal>,
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Payment method used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,
    /// Transactions in creation order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<PaymentTransaction>,
    /// Attempts, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_attempts: Vec<PaymentAttempt>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

impl Payment {
    /// Transactions of the given type, in order.
    pub fn transactions_of_type(
        &self,
        transaction_type: TransactionType,
    ) -> impl Iterator<Item = &PaymentTransaction> {
        self.transactions
            .iter()
            .filter(move |t| t.transaction_type == Some(transaction_type))
    }
}

/// One transaction of a payment; also the request body of payment operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
    /// Caller-chosen unique key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_external_key: Option<String>,
    /// Owning payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    /// Key of the owning payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_external_key: Option<String>,
    /// Transaction type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// Requested amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Requested currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Effective date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateTime<Utc>>,
    /// Amount the gateway processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_amount: Option<Decimal>,
    /// Currency the gateway processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_currency: Option<Currency>,
    /// Outcome.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,
    /// Gateway error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_error_code: Option<String>,
    /// Gateway error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_error_msg: Option<String>,
    /// First gateway reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_payment_reference_id: Option<String>,
    /// Second gateway reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub second_payment_reference_id: Option<String>,
    /// Plugin-specific properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PluginProperty>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// A chargeback recorded against a payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chargeback {
    /// Account of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Payment charged back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<PaymentId>,
    /// Amount charged back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// When the chargeback took effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateTime<Utc>>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// An attempt made by a payment control plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentAttempt {
    /// Paying account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Payment method used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,
    /// Key of the payment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_external_key: Option<String>,
    /// Attempt id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<PaymentAttemptId>,
    /// Key of the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_external_key: Option<String>,
    /// Transaction type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// When the attempt runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<DateTime<Utc>>,
    /// State machine state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_name: Option<String>,
    /// Amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Control plugin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,
    /// Properties passed to the plugin.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugin_properties: Vec<PluginProperty>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// A payment method registered with a payment plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,
    /// Caller-chosen unique key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Whether this is the account default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Payment plugin handling it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_name: Option<String>,
    /// Plugin-side details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugin_info: Option<PaymentMethodPluginDetail>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// Plugin-side view of a payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodPluginDetail {
    /// Id on the gateway side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_payment_method_id: Option<String>,
    /// Whether the gateway treats it as default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default_payment_method: Option<bool>,
    /// Plugin-specific properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<PluginProperty>,
}

/// A key/value pair understood by a plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginProperty {
    /// Key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Value, any JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Whether the plugin may update it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_updatable: Option<bool>,
}

impl PluginProperty {
    /// A property with a string value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(serde_json::Value::String(value.into())),
            is_updatable: None,
        }
    }
}

/// Input fields of a hosted payment page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedPaymentPageFields {
    /// Fields passed to the gateway plugin.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub form_fields: Vec<PluginProperty>,
}

/// Form the caller renders to redirect the customer to a hosted payment page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedPaymentPageFormDescriptor {
    /// Account the form is for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_account_id: Option<AccountId>,
    /// HTTP method of the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_method: Option<String>,
    /// Form action URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
    /// Form fields.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub form_fields: HashMap<String, serde_json::Value>,
    /// Extra plugin properties.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
}

/// Plugin answer to a gateway notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayNotification {
    /// Payment the notification concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kb_payment_id: Option<PaymentId>,
    /// HTTP status to answer the gateway with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i32>,
    /// Body to answer the gateway with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Headers to answer the gateway with.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, Vec<String>>,
    /// Extra plugin properties.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: HashMap<String, serde_json::Value>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// Body of the admin call that fixes a stuck payment transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPayment {
    /// Last successful state of the payment state machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_success_payment_state: Option<String>,
    /// Current state of the payment state machine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_payment_state_name: Option<String>,
    /// Transaction status to force.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<TransactionStatus>,
}
