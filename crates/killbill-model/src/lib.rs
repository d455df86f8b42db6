//! Data transfer objects for the Kill Bill REST API.
//!
//! This crate holds the payloads exchanged with the billing server and
//! nothing else; it performs no I/O.
//!
//! - **Identifiers**: `AccountId`, `SubscriptionId`, `InvoiceId`, `PaymentId`, ...
//! - **Accounts**: `Account`, `AccountEmail`, `AccountTimeline`, `OverdueState`
//! - **Entitlements**: `Bundle`, `Subscription`, `EventSubscription`, `PhasePrice`, `UsagePrice`
//! - **Invoicing**: `Invoice`, `InvoiceItem`, `InvoiceDryRun`, `InvoicePayment`, `Credit`
//! - **Payments**: `Payment`, `PaymentTransaction`, `PaymentMethod`, `GatewayNotification`
//! - **Metadata**: `Tag`, `TagDefinition`, `CustomField`, `AuditLog`
//! - **Catalog**: `Catalog`, `Product`, `Plan`, `PlanDetail`
//!
//! # Wire format
//!
//! Field names are camelCase. Every field is optional: absent fields read as
//! `None` (or an empty list) and `None` fields are left out of request bodies,
//! so partially filled models can be sent for creates and updates.
//!
//! Amounts are [`rust_decimal::Decimal`] encoded as JSON numbers. Local dates
//! are [`chrono::NaiveDate`], instants are `chrono::DateTime<Utc>`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod account;
pub mod audit;
pub mod catalog;
pub mod currency;
pub mod enums;
pub mod error;
pub mod ids;
pub mod invoice;
pub mod payment;
pub mod subscription;
pub mod tag;
pub mod tenant;
pub mod usage;

pub use account::{Account, AccountEmail, AccountTimeline, InvoiceEmail, OverdueState};
pub use audit::AuditLog;
pub use catalog::{Catalog, Phase, Plan, PlanDetail, Price, PriceList, Product, Unit};
pub use currency::Currency;
pub use enums::{
    AuditLevel, BillingActionPolicy, BillingMode, BillingPeriod, DryRunType,
    EntitlementActionPolicy, EntitlementState, InvoiceItemType, InvoiceStatus, ObjectType,
    PhaseType, ProductCategory, TierBlockPolicy, TransactionStatus, TransactionType, UsageType,
};
pub use error::ModelError;
pub use ids::{
    AccountId, BundleId, CreditId, CustomFieldId, InvoiceId, InvoiceItemId, ObjectId,
    PaymentAttemptId, PaymentId, PaymentMethodId, SubscriptionId, TagDefinitionId, TagId,
    TenantId, TransactionId,
};
pub use invoice::{
    Credit, Invoice, InvoiceDryRun, InvoiceItem, InvoicePayment, InvoicePaymentTransaction,
};
pub use payment::{
    AdminPayment, Chargeback, GatewayNotification, HostedPaymentPageFields,
    HostedPaymentPageFormDescriptor, Payment, PaymentAttempt, PaymentMethod,
    PaymentMethodPluginDetail, PaymentTransaction, PluginProperty,
};
pub use subscription::{
    BlockPrice, Bundle, BundleTimeline, EventSubscription, PhasePrice, Subscription, TierPrice,
    UsagePrice,
};
pub use tag::{CustomField, Tag, TagDefinition};
pub use tenant::{Tenant, TenantKeyValue};
pub use usage::{RolledUpUnit, RolledUpUsage, SubscriptionUsageRecord, UnitUsageRecord, UsageRecord};
