//! Kill Bill client facade.

use crate::api::{
    AccountApi, AdminApi, BundleApi, CatalogApi, CreditApi, CustomFieldApi, ExportApi, InvoiceApi,
    InvoicePaymentApi, PaymentApi, PaymentGatewayApi, PaymentMethodApi, PluginApi, SecurityApi,
    SubscriptionApi, TagApi, TagDefinitionApi, TenantApi, UsageApi,
};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;

/// Kill Bill API client.
///
/// Owns one transport. Every accessor hands out an API sharing its
/// connection pool, so APIs are cheap to create per call.
#[derive(Debug, Clone)]
pub struct KillBillClient {
    http: KillBillHttpClient,
}

impl KillBillClient {
    /// Create a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] for an invalid server URL, or
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: KillBillHttpClient::new(config)?,
        })
    }

    /// Create a client from the secrets file and `KILLBILL_*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration is invalid.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(&ClientConfig::from_env())
    }

    /// The shared transport.
    #[must_use]
    pub fn http(&self) -> &KillBillHttpClient {
        &self.http
    }

    /// Accounts.
    #[must_use]
    pub fn accounts(&self) -> AccountApi {
        AccountApi::new(self.http.clone())
    }

    /// Bundles.
    #[must_use]
    pub fn bundles(&self) -> BundleApi {
        BundleApi::new(self.http.clone())
    }

    /// Subscriptions.
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionApi {
        SubscriptionApi::new(self.http.clone())
    }

    /// Invoices.
    #[must_use]
    pub fn invoices(&self) -> InvoiceApi {
        InvoiceApi::new(self.http.clone())
    }

    /// Invoice payments.
    #[must_use]
    pub fn invoice_payments(&self) -> InvoicePaymentApi {
        InvoicePaymentApi::new(self.http.clone())
    }

    /// Credits.
    #[must_use]
    pub fn credits(&self) -> CreditApi {
        CreditApi::new(self.http.clone())
    }

    /// Payments.
    #[must_use]
    pub fn payments(&self) -> PaymentApi {
        PaymentApi::new(self.http.clone())
    }

    /// Payment methods.
    #[must_use]
    pub fn payment_methods(&self) -> PaymentMethodApi {
        PaymentMethodApi::new(self.http.clone())
    }

    /// Hosted payment pages and gateway notifications.
    #[must_use]
    pub fn payment_gateways(&self) -> PaymentGatewayApi {
        PaymentGatewayApi::new(self.http.clone())
    }

    /// Tag definitions.
    #[must_use]
    pub fn tag_definitions(&self) -> TagDefinitionApi {
        TagDefinitionApi::new(self.http.clone())
    }

    /// Tags across object types.
    #[must_use]
    pub fn tags(&self) -> TagApi {
        TagApi::new(self.http.clone())
    }

    /// Custom fields across object types.
    #[must_use]
    pub fn custom_fields(&self) -> CustomFieldApi {
        CustomFieldApi::new(self.http.clone())
    }

    /// Catalog.
    #[must_use]
    pub fn catalog(&self) -> CatalogApi {
        CatalogApi::new(self.http.clone())
    }

    /// Tenants.
    #[must_use]
    pub fn tenants(&self) -> TenantApi {
        TenantApi::new(self.http.clone())
    }

    /// Usage.
    #[must_use]
    pub fn usage(&self) -> UsageApi {
        UsageApi::new(self.http.clone())
    }

    /// Permissions.
    #[must_use]
    pub fn security(&self) -> SecurityApi {
        SecurityApi::new(self.http.clone())
    }

    /// Administration.
    #[must_use]
    pub fn admin(&self) -> AdminApi {
        AdminApi::new(self.http.clone())
    }

    /// Account export.
    #[must_use]
    pub fn export(&self) -> ExportApi {
        ExportApi::new(self.http.clone())
    }

    /// Plugin pass-through.
    #[must_use]
    pub fn plugins(&self) -> PluginApi {
        PluginApi::new(self.http.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let config = ClientConfig::new().with_server_url("http://localhost:8080");
        let client = KillBillClient::new(&config).unwrap();
        assert_eq!(client.http().base_url(), "http://localhost:8080");
    }

    #[test]
    fn client_trims_trailing_slash() {
        let config = ClientConfig::new().with_server_url("http://localhost:8080/");
        let client = KillBillClient::new(&config).unwrap();
        assert_eq!(client.http().base_url(), "http://localhost:8080");
    }

    #[test]
    fn client_rejects_invalid_url() {
        let config = ClientConfig::new().with_server_url("not a url");
        let err = KillBillClient::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn apis_share_transport_settings() {
        let config = ClientConfig::new().with_request_timeout_seconds(42);
        let client = KillBillClient::new(&config).unwrap();
        let cloned = client.clone();
        assert_eq!(
            cloned.http().request_timeout(),
            std::time::Duration::from_secs(42)
        );
        let _ = client.accounts();
        let _ = client.plugins();
    }
}
