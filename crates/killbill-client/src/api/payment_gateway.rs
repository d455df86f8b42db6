//! Hosted payment pages and gateway notifications.

use killbill_model::{AccountId, HostedPaymentPageFields, HostedPaymentPageFormDescriptor, PaymentMethodId};

use super::PAYMENT_GATEWAYS;
use crate::error::ClientError;
use crate::http::{KillBillHttpClient, RawResponse};
use crate::options::RequestOptions;
use crate::query::{encode_segment, QueryParams};

/// Payment gateway operations.
#[derive(Debug, Clone)]
pub struct PaymentGatewayApi {
    http: KillBillHttpClient,
}

impl PaymentGatewayApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Ask the payment plugin to build a hosted payment page form.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn build_form_descriptor(
        &self,
        fields: &HostedPaymentPageFields,
        account_id: AccountId,
        payment_method_id: Option<PaymentMethodId>,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<HostedPaymentPageFormDescriptor, ClientError> {
        opts.require_created_by("build_form_descriptor")?;
        self.http
            .post(format!("{PAYMENT_GATEWAYS}/hosted/form/{account_id}"))
            .query(
                QueryParams::new()
                    .with_opt("paymentMethodId", payment_method_id)
                    .with_plugin_properties(plugin_properties),
            )
            .json(fields)?
            .send_json(opts)
            .await
    }

    /// Forward a gateway notification to a payment plugin.
    ///
    /// The answer is whatever the plugin wants the gateway to see, so the
    /// response is returned as is, failure statuses included. A JSON body
    /// usually decodes as [`killbill_model::GatewayNotification`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the server cannot be reached.
    pub async fn process_notification(
        &self,
        notification: impl Into<String>,
        plugin_name: &str,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<RawResponse, ClientError> {
        opts.require_created_by("process_notification")?;
        self.http
            .post(format!(
                "{PAYMENT_GATEWAYS}/notification/{}",
                encode_segment(plugin_name)
            ))
            .query(QueryParams::new().with_plugin_properties(plugin_properties))
            .text("text/plain", notification)
            .send_raw(opts)
            .await
    }
}
