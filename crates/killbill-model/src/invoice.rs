//! Invoices, invoice items, dry runs, invoice payments and credits.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::currency::Currency;
use crate::enums::{
    BillingActionPolicy, BillingPeriod, DryRunType, InvoiceItemType, InvoiceStatus, PhaseType,
    ProductCategory,
};
use crate::ids::{
    AccountId, BundleId, CreditId, InvoiceId, InvoiceItemId, SubscriptionId,
};
use crate::payment::{Payment, PaymentTransaction};
use crate::subscription::PhasePrice;

/// An invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Total amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Draft, committed or void.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    /// Credit adjustments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_adj: Option<Decimal>,
    /// Refund adjustments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_adj: Option<Decimal>,
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<InvoiceId>,
    /// Invoice date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<NaiveDate>,
    /// Target date the invoice was generated for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    /// Sequential invoice number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Amount still due.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Decimal>,
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Keys of the bundles invoiced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_keys: Option<String>,
    /// Credits applied.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credits: Vec<InvoiceItem>,
    /// Line items.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<InvoiceItem>,
    /// Usage tracking ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tracking_ids: Vec<String>,
    /// Whether this is a parent summary invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_parent_invoice: Option<bool>,
    /// Parent invoice, for child accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_invoice_id: Option<InvoiceId>,
    /// Parent account, for child accounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_account_id: Option<AccountId>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// A line of an invoice, also used as the payload for charges and adjustments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_item_id: Option<InvoiceItemId>,
    /// Owning invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<InvoiceId>,
    /// Item this one adjusts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_invoice_item_id: Option<InvoiceItemId>,
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Child account, on parent summary items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_account_id: Option<AccountId>,
    /// Bundle the item belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<BundleId>,
    /// Subscription the item belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<SubscriptionId>,
    /// Catalog product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Catalog plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// Catalog phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    /// Catalog usage section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_name: Option<String>,
    /// Display name of the product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_product_name: Option<String>,
    /// Display name of the plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_plan_name: Option<String>,
    /// Display name of the phase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_phase_name: Option<String>,
    /// Display name of the usage section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty_usage_name: Option<String>,
    /// Item type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<InvoiceItemType>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service period start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Service period end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// Unit rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<Decimal>,
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,
    /// Free-form details, usually JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_details: Option<String>,
    /// Items of child accounts rolled up into this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_items: Vec<InvoiceItem>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// Parameters of a dry-run invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDryRun {
    /// What to simulate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run_type: Option<DryRunType>,
    /// Subscription action to simulate: `START_BILLING`, `CHANGE` or `STOP_BILLING`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run_action: Option<String>,
    /// Phase type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_type: Option<PhaseType>,
    /// Product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Product category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<ProductCategory>,
    /// Billing period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,
    /// Price list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list_name: Option<String>,
    /// Subscription the action applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<SubscriptionId>,
    /// Bundle the action applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<BundleId>,
    /// When the action takes effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Billing policy of the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_policy: Option<BillingActionPolicy>,
    /// Price overrides of the action.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_overrides: Vec<PhasePrice>,
}

/// A payment as seen from the invoice side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePayment {
    /// Invoice the payment was made for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_invoice_id: Option<InvoiceId>,
    /// The payment itself.
    #[serde(flatten)]
    pub payment: Payment,
}

/// A refund or chargeback that may adjust invoice items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePaymentTransaction {
    /// Whether to adjust the invoice items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_adjusted: Option<bool>,
    /// The item adjustments to make.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adjustments: Vec<InvoiceItem>,
    /// The payment transaction.
    #[serde(flatten)]
    pub transaction: PaymentTransaction,
}

/// An account credit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_id: Option<CreditId>,
    /// Amount credited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_amount: Option<Decimal>,
    /// Currency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    /// Invoice the credit was applied to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<InvoiceId>,
    /// Number of that invoice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    /// Effective date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Account credited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_details: Option<String>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}
