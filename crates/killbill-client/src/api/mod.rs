//! One API per server resource.
//!
//! Each API wraps a clone of the shared [`KillBillHttpClient`](crate::KillBillHttpClient)
//! and maps its operations onto the REST endpoints under `/1.0/kb`.

mod account;
mod admin;
mod bundle;
mod catalog;
mod credit;
mod custom_field;
mod export;
mod invoice;
mod invoice_payment;
mod metadata;
mod payment;
mod payment_gateway;
mod payment_method;
mod plugin;
mod security;
mod subscription;
mod tag;
mod tag_definition;
mod tenant;
mod usage;

pub use account::{AccountApi, CloseAccountOptions, InvoiceFilter};
pub use admin::AdminApi;
pub use bundle::BundleApi;
pub use catalog::CatalogApi;
pub use credit::CreditApi;
pub use custom_field::CustomFieldApi;
pub use export::ExportApi;
pub use invoice::InvoiceApi;
pub use invoice_payment::InvoicePaymentApi;
pub use metadata::{CustomFieldResource, MetadataApi, TaggableResource};
pub use payment::{PaymentApi, PaymentLookup};
pub use payment_gateway::PaymentGatewayApi;
pub use payment_method::PaymentMethodApi;
pub use plugin::PluginApi;
pub use security::SecurityApi;
pub use subscription::{CancelPolicy, SubscriptionApi};
pub use tag::TagApi;
pub use tag_definition::TagDefinitionApi;
pub use tenant::TenantApi;
pub use usage::UsageApi;

pub(crate) const ACCOUNTS: &str = "/1.0/kb/accounts";
pub(crate) const ADMIN: &str = "/1.0/kb/admin";
pub(crate) const BUNDLES: &str = "/1.0/kb/bundles";
pub(crate) const CATALOG: &str = "/1.0/kb/catalog";
pub(crate) const CREDITS: &str = "/1.0/kb/credits";
pub(crate) const CUSTOM_FIELDS: &str = "/1.0/kb/customFields";
pub(crate) const EXPORT: &str = "/1.0/kb/export";
pub(crate) const INVOICES: &str = "/1.0/kb/invoices";
pub(crate) const INVOICE_PAYMENTS: &str = "/1.0/kb/invoicePayments";
pub(crate) const PAYMENTS: &str = "/1.0/kb/payments";
pub(crate) const PAYMENT_GATEWAYS: &str = "/1.0/kb/paymentGateways";
pub(crate) const PAYMENT_METHODS: &str = "/1.0/kb/paymentMethods";
pub(crate) const PLUGINS: &str = "/plugins";
pub(crate) const SECURITY: &str = "/1.0/kb/security";
pub(crate) const SUBSCRIPTIONS: &str = "/1.0/kb/subscriptions";
pub(crate) const TAGS: &str = "/1.0/kb/tags";
pub(crate) const TAG_DEFINITIONS: &str = "/1.0/kb/tagDefinitions";
pub(crate) const TENANTS: &str = "/1.0/kb/tenants";
pub(crate) const USAGES: &str = "/1.0/kb/usages";
