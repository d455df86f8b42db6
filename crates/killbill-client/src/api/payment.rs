//! Payments and their transactions: capture, refund, chargeback, void.

use killbill_model::{
    AuditLevel, Chargeback, Payment, PaymentId, PaymentTransaction, TransactionType,
};

use super::metadata::MetadataApi;
use super::PAYMENTS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// What to include when reading payments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentLookup {
    /// Ask the payment plugin for its view of the payment.
    pub with_plugin_info: bool,
    /// Include payment attempts.
    pub with_attempts: bool,
    /// Plugin properties forwarded to the payment plugin.
    pub plugin_properties: Vec<(String, String)>,
    /// Audit history to attach.
    pub audit: AuditLevel,
}

impl PaymentLookup {
    fn append_to(&self, query: QueryParams) -> QueryParams {
        query
            .with("withPluginInfo", self.with_plugin_info)
            .with("withAttempts", self.with_attempts)
            .with_plugin_properties(&self.plugin_properties)
            .with_audit(self.audit)
    }
}

/// Payment operations.
#[derive(Debug, Clone)]
pub struct PaymentApi {
    http: KillBillHttpClient,
}

impl PaymentApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Tags and custom fields of payments.
    #[must_use]
    pub fn metadata(&self) -> MetadataApi<PaymentId> {
        MetadataApi::new(self.http.clone())
    }

    /// Get a payment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payment(
        &self,
        payment_id: PaymentId,
        lookup: &PaymentLookup,
        opts: &RequestOptions,
    ) -> Result<Option<Payment>, ClientError> {
        self.http
            .get(format!("{PAYMENTS}/{payment_id}"))
            .query(lookup.append_to(QueryParams::new()))
            .send_optional(opts)
            .await
    }

    /// Get a payment by external key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payment_by_external_key(
        &self,
        external_key: &str,
        lookup: &PaymentLookup,
        opts: &RequestOptions,
    ) -> Result<Option<Payment>, ClientError> {
        self.http
            .get(PAYMENTS)
            .query(lookup.append_to(QueryParams::new().with("externalKey", external_key)))
            .send_optional(opts)
            .await
    }

    /// List payments page by page, optionally for one payment plugin.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payments(
        &self,
        page: Pagination,
        plugin_name: Option<&str>,
        lookup: &PaymentLookup,
        opts: &RequestOptions,
    ) -> Result<Vec<Payment>, ClientError> {
        self.http
            .get(format!("{PAYMENTS}/pagination"))
            .query(
                lookup.append_to(
                    QueryParams::new()
                        .with_page(page)
                        .with_opt("pluginName", plugin_name),
                ),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Search payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_payments(
        &self,
        key: &str,
        page: Pagination,
        plugin_name: Option<&str>,
        lookup: &PaymentLookup,
        opts: &RequestOptions,
    ) -> Result<Vec<Payment>, ClientError> {
        self.http
            .get(format!("{PAYMENTS}/search/{}", encode_segment(key)))
            .query(
                lookup.append_to(
                    QueryParams::new()
                        .with_page(page)
                        .with_opt("pluginName", plugin_name),
                ),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Capture an authorization.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// amount, or an error if the request fails.
    pub async fn capture_authorization(
        &self,
        payment_id: PaymentId,
        transaction: &PaymentTransaction,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        const OPERATION: &str = "capture_authorization";
        opts.require_created_by(OPERATION)?;
        required(transaction.amount, "amount", OPERATION)?;
        self.post_transaction(
            format!("{PAYMENTS}/{payment_id}"),
            transaction,
            plugin_properties,
            opts,
        )
        .await
    }

    /// Refund a payment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// amount, or an error if the request fails.
    pub async fn refund_payment(
        &self,
        payment_id: PaymentId,
        transaction: &PaymentTransaction,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        const OPERATION: &str = "refund_payment";
        opts.require_created_by(OPERATION)?;
        required(transaction.amount, "amount", OPERATION)?;
        self.post_transaction(
            format!("{PAYMENTS}/{payment_id}/refunds"),
            transaction,
            plugin_properties,
            opts,
        )
        .await
    }

    /// Record a chargeback against a payment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// amount, or an error if the request fails.
    pub async fn chargeback_payment(
        &self,
        payment_id: PaymentId,
        transaction: &PaymentTransaction,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        const OPERATION: &str = "chargeback_payment";
        opts.require_created_by(OPERATION)?;
        required(transaction.amount, "amount", OPERATION)?;
        self.post_transaction(
            format!("{PAYMENTS}/{payment_id}/chargebacks"),
            transaction,
            plugin_properties,
            opts,
        )
        .await
    }

    /// Reverse a chargeback, identified by its transaction external key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// transaction external key, or an error if the request fails.
    pub async fn chargeback_reversal(
        &self,
        payment_id: PaymentId,
        transaction: &PaymentTransaction,
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        const OPERATION: &str = "chargeback_reversal";
        opts.require_created_by(OPERATION)?;
        required(
            transaction.transaction_external_key.as_deref(),
            "transactionExternalKey",
            OPERATION,
        )?;
        self.post_transaction(
            format!("{PAYMENTS}/{payment_id}/chargebackReversals"),
            transaction,
            &[],
            opts,
        )
        .await
    }

    /// Void an authorization.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn void_payment(
        &self,
        payment_id: PaymentId,
        transaction: &PaymentTransaction,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        opts.require_created_by("void_payment")?;
        self.http
            .delete(format!("{PAYMENTS}/{payment_id}"))
            .query(QueryParams::new().with_plugin_properties(plugin_properties))
            .json(transaction)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Refund transactions of a payment. Empty when the payment is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_refunds_for_payment(
        &self,
        payment_id: PaymentId,
        opts: &RequestOptions,
    ) -> Result<Vec<PaymentTransaction>, ClientError> {
        let payment = self
            .get_payment(payment_id, &PaymentLookup::default(), opts)
            .await?;
        Ok(payment
            .map(|p| p.transactions_of_type(TransactionType::Refund).cloned().collect())
            .unwrap_or_default())
    }

    /// Chargebacks recorded against a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_chargebacks_for_payment(
        &self,
        payment_id: PaymentId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Chargeback>, ClientError> {
        self.http
            .get(format!("{PAYMENTS}/{payment_id}/chargebacks"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    async fn post_transaction(
        &self,
        path: String,
        transaction: &PaymentTransaction,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        self.http
            .post(path)
            .query(QueryParams::new().with_plugin_properties(plugin_properties))
            .json(transaction)?
            .follow_location()
            .send_json(opts)
            .await
    }
}
