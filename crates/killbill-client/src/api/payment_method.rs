//! Payment methods outside of an account context.

use killbill_model::{AuditLevel, PaymentMethod, PaymentMethodId};

use super::metadata::MetadataApi;
use super::PAYMENT_METHODS;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// Payment method operations.
#[derive(Debug, Clone)]
pub struct PaymentMethodApi {
    http: KillBillHttpClient,
}

impl PaymentMethodApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Custom fields of payment methods. Payment methods cannot be tagged.
    #[must_use]
    pub fn metadata(&self) -> MetadataApi<PaymentMethodId> {
        MetadataApi::new(self.http.clone())
    }

    /// Get a payment method by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payment_method(
        &self,
        payment_method_id: PaymentMethodId,
        included_deleted: bool,
        with_plugin_info: bool,
        plugin_properties: &[(String, String)],
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<PaymentMethod>, ClientError> {
        self.http
            .get(format!("{PAYMENT_METHODS}/{payment_method_id}"))
            .query(
                QueryParams::new()
                    .with("includedDeleted", included_deleted)
                    .with("withPluginInfo", with_plugin_info)
                    .with_plugin_properties(plugin_properties)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Get a payment method by external key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payment_method_by_key(
        &self,
        external_key: &str,
        included_deleted: bool,
        with_plugin_info: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<PaymentMethod>, ClientError> {
        self.http
            .get(PAYMENT_METHODS)
            .query(
                QueryParams::new()
                    .with("externalKey", external_key)
                    .with("includedDeleted", included_deleted)
                    .with("withPluginInfo", with_plugin_info)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// List payment methods page by page, optionally for one plugin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payment_methods(
        &self,
        page: Pagination,
        plugin_name: Option<&str>,
        with_plugin_info: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<PaymentMethod>, ClientError> {
        self.http
            .get(format!("{PAYMENT_METHODS}/pagination"))
            .query(
                QueryParams::new()
                    .with_page(page)
                    .with_opt("pluginName", plugin_name)
                    .with("withPluginInfo", with_plugin_info)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Search payment methods.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_payment_methods(
        &self,
        key: &str,
        page: Pagination,
        plugin_name: Option<&str>,
        with_plugin_info: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<PaymentMethod>, ClientError> {
        self.http
            .get(format!("{PAYMENT_METHODS}/search/{}", encode_segment(key)))
            .query(
                QueryParams::new()
                    .with_page(page)
                    .with_opt("pluginName", plugin_name)
                    .with("withPluginInfo", with_plugin_info)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Delete a payment method.
    ///
    /// Deleting the default method is refused unless
    /// `delete_default_with_auto_pay_off` (the account is switched to
    /// `AUTO_PAY_OFF`) or `force_default_deletion` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_payment_method(
        &self,
        payment_method_id: PaymentMethodId,
        delete_default_with_auto_pay_off: bool,
        force_default_deletion: bool,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_payment_method")?;
        self.http
            .delete(format!("{PAYMENT_METHODS}/{payment_method_id}"))
            .query(
                QueryParams::new()
                    .with(
                        "deleteDefaultPmWithAutoPayOff",
                        delete_default_with_auto_pay_off,
                    )
                    .with("forceDefaultPmDeletion", force_default_deletion)
                    .with_plugin_properties(plugin_properties),
            )
            .send_unit(opts)
            .await
    }
}
