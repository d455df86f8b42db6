//! Invoices: lookups, generation, dry runs, adjustments, external charges
//! and invoice payments.

use chrono::NaiveDate;
use killbill_model::{
    AccountId, AuditLevel, Invoice, InvoiceDryRun, InvoiceId, InvoiceItem, InvoiceItemId,
    InvoicePayment,
};

use super::metadata::MetadataApi;
use super::INVOICES;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// Invoice operations.
#[derive(Debug, Clone)]
pub struct InvoiceApi {
    http: KillBillHttpClient,
}

impl InvoiceApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Tags and custom fields of invoices.
    #[must_use]
    pub fn metadata(&self) -> MetadataApi<InvoiceId> {
        MetadataApi::new(self.http.clone())
    }

    /// Get an invoice by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoice(
        &self,
        invoice_id: InvoiceId,
        with_children_items: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Invoice>, ClientError> {
        self.http
            .get(format!("{INVOICES}/{invoice_id}"))
            .query(
                QueryParams::new()
                    .with("withChildrenItems", with_children_items)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Get an invoice by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoice_by_number(
        &self,
        invoice_number: u64,
        with_children_items: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Invoice>, ClientError> {
        self.http
            .get(format!("{INVOICES}/byNumber/{invoice_number}"))
            .query(
                QueryParams::new()
                    .with("withChildrenItems", with_children_items)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Get the invoice holding an item.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoice_by_item_id(
        &self,
        item_id: InvoiceItemId,
        with_children_items: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Invoice>, ClientError> {
        self.http
            .get(format!("{INVOICES}/byItemId/{item_id}"))
            .query(
                QueryParams::new()
                    .with("withChildrenItems", with_children_items)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// List invoices page by page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoices(
        &self,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Invoice>, ClientError> {
        self.http
            .get(format!("{INVOICES}/pagination"))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Search invoices by number, account or id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_invoices(
        &self,
        key: &str,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Invoice>, ClientError> {
        self.http
            .get(format!("{INVOICES}/search/{}", encode_segment(key)))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Render an invoice as HTML using the tenant's template.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoice_as_html(
        &self,
        invoice_id: InvoiceId,
        opts: &RequestOptions,
    ) -> Result<Option<String>, ClientError> {
        self.http
            .get(format!("{INVOICES}/{invoice_id}/html"))
            .accept("text/html")
            .send_text(opts)
            .await
    }

    /// Generate the invoice of an account up to `target_date`.
    ///
    /// Returns `None` when there is nothing to invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn create_future_invoice(
        &self,
        account_id: AccountId,
        target_date: Option<NaiveDate>,
        opts: &RequestOptions,
    ) -> Result<Option<Invoice>, ClientError> {
        opts.require_created_by("create_future_invoice")?;
        self.http
            .post(INVOICES)
            .query(
                QueryParams::new()
                    .with("accountId", account_id)
                    .with_date("targetDate", target_date),
            )
            .follow_location()
            .send_optional(opts)
            .await
    }

    /// Compute an invoice without committing it. `None` means there would be
    /// nothing to invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn generate_dry_run_invoice(
        &self,
        dry_run: &InvoiceDryRun,
        account_id: AccountId,
        target_date: Option<NaiveDate>,
        opts: &RequestOptions,
    ) -> Result<Option<Invoice>, ClientError> {
        opts.require_created_by("generate_dry_run_invoice")?;
        self.http
            .post(format!("{INVOICES}/dryRun"))
            .query(
                QueryParams::new()
                    .with("accountId", account_id)
                    .with_date("targetDate", target_date),
            )
            .json(dry_run)?
            .send_optional(opts)
            .await
    }

    /// Adjust an invoice item, fully or by `item.amount`, and return the
    /// adjusted invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// account id, invoice id or item id, or an error if the request fails.
    pub async fn adjust_invoice_item(
        &self,
        item: &InvoiceItem,
        requested_date: Option<NaiveDate>,
        opts: &RequestOptions,
    ) -> Result<Invoice, ClientError> {
        const OPERATION: &str = "adjust_invoice_item";
        opts.require_created_by(OPERATION)?;
        required(item.account_id, "accountId", OPERATION)?;
        let invoice_id = required(item.invoice_id, "invoiceId", OPERATION)?;
        required(item.invoice_item_id, "invoiceItemId", OPERATION)?;

        self.http
            .post(format!("{INVOICES}/{invoice_id}"))
            .query(QueryParams::new().with_date("requestedDate", requested_date))
            .json(item)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Charge an account for items outside the catalog and return the
    /// created items. Each item carries its own amount and currency.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// when an item has no amount or currency, [`ClientError::InvalidArgument`]
    /// when an item belongs to another account, or an error if the request
    /// fails.
    pub async fn create_external_charges(
        &self,
        account_id: AccountId,
        items: &[InvoiceItem],
        requested_date: Option<NaiveDate>,
        auto_commit: bool,
        opts: &RequestOptions,
    ) -> Result<Vec<InvoiceItem>, ClientError> {
        self.post_items(
            "create_external_charges",
            "charges",
            account_id,
            items,
            requested_date,
            auto_commit,
            opts,
        )
        .await
    }

    /// Add tax items to an account and return the created items.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// when an item has no amount or currency, [`ClientError::InvalidArgument`]
    /// when an item belongs to another account, or an error if the request
    /// fails.
    pub async fn create_tax_items(
        &self,
        account_id: AccountId,
        items: &[InvoiceItem],
        requested_date: Option<NaiveDate>,
        auto_commit: bool,
        opts: &RequestOptions,
    ) -> Result<Vec<InvoiceItem>, ClientError> {
        self.post_items(
            "create_tax_items",
            "taxes",
            account_id,
            items,
            requested_date,
            auto_commit,
            opts,
        )
        .await
    }

    #[allow(clippy::too_many_arguments)]
    async fn post_items(
        &self,
        operation: &'static str,
        kind: &str,
        account_id: AccountId,
        items: &[InvoiceItem],
        requested_date: Option<NaiveDate>,
        auto_commit: bool,
        opts: &RequestOptions,
    ) -> Result<Vec<InvoiceItem>, ClientError> {
        opts.require_created_by(operation)?;
        for item in items {
            required(item.amount, "amount", operation)?;
            required(item.currency.as_ref(), "currency", operation)?;
            if let Some(owner) = item.account_id.filter(|owner| *owner != account_id) {
                return Err(ClientError::InvalidArgument(format!(
                    "item of account {owner} cannot be posted to account {account_id}"
                )));
            }
        }

        self.http
            .post(format!("{INVOICES}/{kind}/{account_id}"))
            .query(
                QueryParams::new()
                    .with_date("requestedDate", requested_date)
                    .with("autoCommit", auto_commit),
            )
            .json(items)?
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Commit a draft invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn commit_invoice(
        &self,
        invoice_id: InvoiceId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("commit_invoice")?;
        self.http
            .put(format!("{INVOICES}/{invoice_id}/commitInvoice"))
            .send_unit(opts)
            .await
    }

    /// Void an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn void_invoice(
        &self,
        invoice_id: InvoiceId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("void_invoice")?;
        self.http
            .put(format!("{INVOICES}/{invoice_id}/voidInvoice"))
            .send_unit(opts)
            .await
    }

    /// Send the invoice e-mail to the account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn trigger_email_notification(
        &self,
        invoice_id: InvoiceId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("trigger_email_notification")?;
        self.http
            .post(format!("{INVOICES}/{invoice_id}/emailNotifications"))
            .send_unit(opts)
            .await
    }

    /// Payments made for an invoice.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payments_for_invoice(
        &self,
        invoice_id: InvoiceId,
        with_plugin_info: bool,
        with_attempts: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<InvoicePayment>, ClientError> {
        self.http
            .get(format!("{INVOICES}/{invoice_id}/payments"))
            .query(
                QueryParams::new()
                    .with("withPluginInfo", with_plugin_info)
                    .with("withAttempts", with_attempts)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Pay an invoice now and return the payment.
    ///
    /// The invoice is `payment.target_invoice_id`. With `external_payment`
    /// the payment is recorded without calling a gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// target invoice, account id or amount, or an error if the request fails.
    pub async fn create_instant_payment(
        &self,
        payment: &InvoicePayment,
        external_payment: bool,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<InvoicePayment, ClientError> {
        const OPERATION: &str = "create_instant_payment";
        opts.require_created_by(OPERATION)?;
        let invoice_id = required(payment.target_invoice_id, "targetInvoiceId", OPERATION)?;
        required(payment.payment.account_id, "accountId", OPERATION)?;
        required(payment.payment.purchased_amount, "purchasedAmount", OPERATION)?;

        self.http
            .post(format!("{INVOICES}/{invoice_id}/payments"))
            .query(
                QueryParams::new()
                    .with("externalPayment", external_payment)
                    .with_plugin_properties(plugin_properties),
            )
            .json(payment)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Remove the credit-balance adjustment item of an invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn delete_cba(
        &self,
        invoice_id: InvoiceId,
        item_id: InvoiceItemId,
        account_id: AccountId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("delete_cba")?;
        self.http
            .delete(format!("{INVOICES}/{invoice_id}/{item_id}/cba"))
            .query(QueryParams::new().with("accountId", account_id))
            .send_unit(opts)
            .await
    }
}
