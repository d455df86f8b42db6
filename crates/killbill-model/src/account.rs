//! Account, e-mail, timeline and overdue models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::currency::Currency;
use crate::ids::{AccountId, PaymentMethodId};
use crate::invoice::{Invoice, InvoicePayment};
use crate::subscription::Bundle;

/// A customer account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Full name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Length of the first name within `name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name_length: Option<i32>,
    /// Caller-chosen unique key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// Primary e-mail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Bill cycle day in the account time zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_cycle_day_local: Option<i32>,
    /// Account currency; immutable once set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Parent account in a hierarchy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_account_id: Option<AccountId>,
    /// Whether the parent pays this account's invoices.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_payment_delegated_to_parent: Option<bool>,
    /// Default payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<PaymentMethodId>,
    /// Reference instant for billing alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_time: Option<DateTime<Utc>>,
    /// Time zone id, e.g. `Europe/Paris`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Address line 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    /// Address line 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Locale, e.g. `en_US`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Whether the account was migrated from another system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_migrated: Option<bool>,
    /// Balance; only returned when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_balance: Option<Decimal>,
    /// Credit balance; only returned when requested.
    #[serde(rename = "accountCBA", skip_serializing_if = "Option::is_none")]
    pub account_cba: Option<Decimal>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// An additional e-mail address on an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountEmail {
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// The address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Whether an account is e-mailed its invoices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceEmail {
    /// The account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Send invoice notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_notified_for_invoices: Option<bool>,
}

/// Everything attached to an account, in one response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTimeline {
    /// The account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    /// Its bundles, with subscriptions and events.
    #[serde(default)]
    pub bundles: Vec<Bundle>,
    /// Its invoices.
    #[serde(default)]
    pub invoices: Vec<Invoice>,
    /// Its payments.
    #[serde(default)]
    pub payments: Vec<InvoicePayment>,
}

/// Overdue state of an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueState {
    /// State name from the overdue configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message meant for the customer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_message: Option<String>,
    /// Retry schedule in days.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_between_payment_retries: Vec<i32>,
    /// Whether entitlements are disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_disable_entitlement_and_changes_blocked: Option<bool>,
    /// Whether subscription changes are blocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_block_changes: Option<bool>,
    /// Whether this is the clear (non-overdue) state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_clear_state: Option<bool>,
    /// Days until the state is re-evaluated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reevaluation_interval_days: Option<i32>,
}
