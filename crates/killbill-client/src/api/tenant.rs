//! Tenants, push notification callbacks and per-tenant plugin configuration.
//!
//! Everything but [`TenantApi::create_tenant`] and the lookups acts on the
//! tenant named by the request's api key and secret.

use killbill_model::{Tenant, TenantId, TenantKeyValue};

use super::TENANTS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, QueryParams};

/// Tenant operations.
#[derive(Debug, Clone)]
pub struct TenantApi {
    http: KillBillHttpClient,
}

impl TenantApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Create a tenant and return it as stored. With `use_global_default`
    /// the tenant starts from the server's default catalog and overdue
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// api key or api secret, or an error if the request fails.
    pub async fn create_tenant(
        &self,
        tenant: &Tenant,
        use_global_default: bool,
        opts: &RequestOptions,
    ) -> Result<Tenant, ClientError> {
        const OPERATION: &str = "create_tenant";
        opts.require_created_by(OPERATION)?;
        required(tenant.api_key.as_deref(), "apiKey", OPERATION)?;
        required(tenant.api_secret.as_deref(), "apiSecret", OPERATION)?;

        self.http
            .post(TENANTS)
            .query(QueryParams::new().with("useGlobalDefault", use_global_default))
            .json(tenant)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Get a tenant by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_tenant(
        &self,
        tenant_id: TenantId,
        opts: &RequestOptions,
    ) -> Result<Option<Tenant>, ClientError> {
        self.http
            .get(format!("{TENANTS}/{tenant_id}"))
            .send_optional(opts)
            .await
    }

    /// Get a tenant by api key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_tenant_by_api_key(
        &self,
        api_key: &str,
        opts: &RequestOptions,
    ) -> Result<Option<Tenant>, ClientError> {
        self.http
            .get(TENANTS)
            .query(QueryParams::new().with("apiKey", api_key))
            .send_optional(opts)
            .await
    }

    /// Register a URL the server calls on every tenant event.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn register_push_notification_callback(
        &self,
        callback: &str,
        opts: &RequestOptions,
    ) -> Result<TenantKeyValue, ClientError> {
        opts.require_created_by("register_push_notification_callback")?;
        self.http
            .post(format!("{TENANTS}/registerNotificationCallback"))
            .query(QueryParams::new().with("cb", callback))
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Registered callbacks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_push_notification_callbacks(
        &self,
        opts: &RequestOptions,
    ) -> Result<Option<TenantKeyValue>, ClientError> {
        self.http
            .get(format!("{TENANTS}/registerNotificationCallback"))
            .send_optional(opts)
            .await
    }

    /// Unregister every callback.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_push_notification_callbacks(
        &self,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_push_notification_callbacks")?;
        self.http
            .delete(format!("{TENANTS}/registerNotificationCallback"))
            .send_unit(opts)
            .await
    }

    /// Store the configuration of a plugin for this tenant.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn upload_plugin_configuration(
        &self,
        plugin_name: &str,
        configuration: impl Into<String>,
        opts: &RequestOptions,
    ) -> Result<TenantKeyValue, ClientError> {
        opts.require_created_by("upload_plugin_configuration")?;
        self.http
            .post(plugin_config_path(plugin_name))
            .text("text/plain", configuration)
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Stored configuration of a plugin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_plugin_configuration(
        &self,
        plugin_name: &str,
        opts: &RequestOptions,
    ) -> Result<Option<TenantKeyValue>, ClientError> {
        self.http
            .get(plugin_config_path(plugin_name))
            .send_optional(opts)
            .await
    }

    /// Remove the configuration of a plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_plugin_configuration(
        &self,
        plugin_name: &str,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_plugin_configuration")?;
        self.http
            .delete(plugin_config_path(plugin_name))
            .send_unit(opts)
            .await
    }
}

fn plugin_config_path(plugin_name: &str) -> String {
    format!("{TENANTS}/uploadPluginConfig/{}", encode_segment(plugin_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_config_path_encodes_name() {
        assert_eq!(
            plugin_config_path("killbill stripe"),
            "/1.0/kb/tenants/uploadPluginConfig/killbill%20stripe"
        );
    }
}
