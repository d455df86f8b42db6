//! Invoice payments: refunds with item adjustments and chargebacks.

use killbill_model::{AuditLevel, InvoicePayment, InvoicePaymentTransaction, PaymentId, PaymentMethodId};

use super::INVOICE_PAYMENTS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::QueryParams;

/// Invoice payment operations.
#[derive(Debug, Clone)]
pub struct InvoicePaymentApi {
    http: KillBillHttpClient,
}

impl InvoicePaymentApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Get an invoice payment by payment id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoice_payment(
        &self,
        payment_id: PaymentId,
        with_plugin_info: bool,
        with_attempts: bool,
        plugin_properties: &[(String, String)],
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<InvoicePayment>, ClientError> {
        self.http
            .get(format!("{INVOICE_PAYMENTS}/{payment_id}"))
            .query(
                QueryParams::new()
                    .with("withPluginInfo", with_plugin_info)
                    .with("withAttempts", with_attempts)
                    .with_plugin_properties(plugin_properties)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Refund a payment, optionally adjusting invoice items, and return the
    /// updated payment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// amount, or an error if the request fails.
    pub async fn create_refund_with_adjustments(
        &self,
        payment_id: PaymentId,
        refund: &InvoicePaymentTransaction,
        external_payment: bool,
        payment_method_id: Option<PaymentMethodId>,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<InvoicePayment, ClientError> {
        const OPERATION: &str = "create_refund_with_adjustments";
        opts.require_created_by(OPERATION)?;
        required(refund.transaction.amount, "amount", OPERATION)?;

        self.http
            .post(format!("{INVOICE_PAYMENTS}/{payment_id}/refunds"))
            .query(
                QueryParams::new()
                    .with("externalPayment", external_payment)
                    .with_opt("paymentMethodId", payment_method_id)
                    .with_plugin_properties(plugin_properties),
            )
            .json(refund)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Record a chargeback and return the updated payment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// amount, or an error if the request fails.
    pub async fn create_chargeback(
        &self,
        payment_id: PaymentId,
        chargeback: &InvoicePaymentTransaction,
        opts: &RequestOptions,
    ) -> Result<InvoicePayment, ClientError> {
        const OPERATION: &str = "create_chargeback";
        opts.require_created_by(OPERATION)?;
        required(chargeback.transaction.amount, "amount", OPERATION)?;

        self.http
            .post(format!("{INVOICE_PAYMENTS}/{payment_id}/chargebacks"))
            .json(chargeback)?
            .follow_location()
            .send_json(opts)
            .await
    }
}
