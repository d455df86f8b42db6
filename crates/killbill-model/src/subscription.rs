//! Bundles, subscriptions, subscription events and per-phase prices.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::enums::{
    BillingMode, BillingPeriod, EntitlementState, PhaseType, ProductCategory, TierBlockPolicy,
    UsageType,
};
use crate::ids::{AccountId, BundleId, SubscriptionId};

/// A group of subscriptions sharing a base product and its add-ons.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<BundleId>,
    /// Caller-chosen key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// Subscriptions in the bundle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subscriptions: Vec<Subscription>,
    /// Merged event timeline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<BundleTimeline>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// Events of every subscription in a bundle, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleTimeline {
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// The bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<BundleId>,
    /// Bundle key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// The events.
    #[serde(default)]
    pub events: Vec<EventSubscription>,
}

/// A subscription to a catalog plan.
///
/// A subscription is described either by `plan_name` alone or by the
/// `product_name`, `product_category`, `billing_period` and `price_list`
/// quadruple.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Owning account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    /// Bundle the subscription lives in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<BundleId>,
    /// Key of that bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_external_key: Option<String>,
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<SubscriptionId>,
    /// Caller-chosen key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// Entitlement start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Catalog product.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    /// Catalog product category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<ProductCategory>,
    /// Billing period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,
    /// Current phase type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_type: Option<PhaseType>,
    /// Price list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list: Option<String>,
    /// Catalog plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// Entitlement state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EntitlementState>,
    /// `NATIVE`, `MIGRATED` or `TRANSFERRED`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Entitlement end, when cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_date: Option<NaiveDate>,
    /// Date up to which the subscription has been invoiced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charged_through_date: Option<NaiveDate>,
    /// Billing start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_start_date: Option<NaiveDate>,
    /// Billing end, when cancelled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_end_date: Option<NaiveDate>,
    /// Subscription-level bill cycle day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_cycle_day_local: Option<i32>,
    /// Quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    /// Subscription events.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<EventSubscription>,
    /// Price overrides to apply when creating or changing the plan.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub price_overrides: Vec<PhasePrice>,
    /// Effective prices, per phase.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prices: Vec<PhasePrice>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// One entitlement or billing event of a subscription.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscription {
    /// Event id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<uuid::Uuid>,
    /// Billing period after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,
    /// When the event takes effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<NaiveDate>,
    /// Catalog version in effect.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_effective_date: Option<DateTime<Utc>>,
    /// Plan after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Product after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// Price list after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_list: Option<String>,
    /// Event type, e.g. `START_ENTITLEMENT` or `PHASE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    /// Whether billing is blocked after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blocked_billing: Option<bool>,
    /// Whether the entitlement is blocked after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blocked_entitlement: Option<bool>,
    /// Service that emitted the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Service state after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_state_name: Option<String>,
    /// Phase after the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// Prices of one plan phase, also used to override catalog prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhasePrice {
    /// Plan name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_name: Option<String>,
    /// Phase name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_name: Option<String>,
    /// Phase type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase_type: Option<PhaseType>,
    /// One-off price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_price: Option<Decimal>,
    /// Recurring price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_price: Option<Decimal>,
    /// Usage prices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub usage_prices: Vec<UsagePrice>,
}

/// Price of one usage section of a phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePrice {
    /// Usage section name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_name: Option<String>,
    /// Capacity or consumable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_type: Option<UsageType>,
    /// In advance or in arrear.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_mode: Option<BillingMode>,
    /// How tiers combine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_block_policy: Option<TierBlockPolicy>,
    /// Tier prices, lowest tier first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tier_prices: Vec<TierPrice>,
}

/// Prices of one usage tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPrice {
    /// Block prices of the tier.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_prices: Vec<BlockPrice>,
}

/// Price of a block of units within a tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPrice {
    /// Unit being priced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    /// Units per block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Decimal>,
    /// Price per block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Number of blocks covered by the tier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
}
