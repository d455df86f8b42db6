//! Accounts and everything hanging off them: e-mails, bundles, invoices,
//! payments, payment methods and overdue state.

use chrono::NaiveDate;
use killbill_model::{
    Account, AccountEmail, AccountId, AccountTimeline, AuditLevel, Bundle, Chargeback, Invoice,
    InvoiceEmail, InvoicePayment, OverdueState, Payment, PaymentMethod, PaymentMethodId,
    PaymentTransaction, TransactionType,
};
use rust_decimal::Decimal;

use super::metadata::MetadataApi;
use super::ACCOUNTS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// What to do with an account's open items when closing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloseAccountOptions {
    /// Cancel every subscription.
    pub cancel_all_subscriptions: bool,
    /// Write off unpaid invoices.
    pub write_off_unpaid_invoices: bool,
    /// Adjust the items of unpaid invoices to zero.
    pub item_adjust_unpaid_invoices: bool,
    /// Drop pending notifications.
    pub remove_future_notifications: bool,
}

/// Filters of the account invoice listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceFilter {
    /// Earliest invoice date.
    pub start_date: Option<NaiveDate>,
    /// Latest invoice date.
    pub end_date: Option<NaiveDate>,
    /// Include migration invoices.
    pub with_migration_invoices: bool,
    /// Only invoices with a positive balance.
    pub unpaid_invoices_only: bool,
    /// Include voided invoices.
    pub include_voided_invoices: bool,
    /// Include the invoice items.
    pub include_invoice_components: bool,
    /// Comma-separated invoice ids to restrict the listing to.
    pub invoices_filter: Option<String>,
}

impl InvoiceFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_date("startDate", self.start_date)
            .with_date("endDate", self.end_date)
            .with("withMigrationInvoices", self.with_migration_invoices)
            .with("unpaidInvoicesOnly", self.unpaid_invoices_only)
            .with("includeVoidedInvoices", self.include_voided_invoices)
            .with("includeInvoiceComponents", self.include_invoice_components)
            .with_opt("invoicesFilter", self.invoices_filter.as_deref())
    }
}

/// Account operations.
#[derive(Debug, Clone)]
pub struct AccountApi {
    http: KillBillHttpClient,
}

impl AccountApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Tags and custom fields of accounts.
    #[must_use]
    pub fn metadata(&self) -> MetadataApi<AccountId> {
        MetadataApi::new(self.http.clone())
    }

    /// List accounts page by page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_accounts(
        &self,
        page: Pagination,
        with_balance: bool,
        with_balance_and_cba: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Account>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/pagination"))
            .query(
                QueryParams::new()
                    .with_page(page)
                    .with("accountWithBalance", with_balance)
                    .with("accountWithBalanceAndCBA", with_balance_and_cba)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_account(
        &self,
        account_id: AccountId,
        with_balance: bool,
        with_balance_and_cba: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Account>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}"))
            .query(
                QueryParams::new()
                    .with("accountWithBalance", with_balance)
                    .with("accountWithBalanceAndCBA", with_balance_and_cba)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Get an account by external key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_account_by_key(
        &self,
        external_key: &str,
        with_balance: bool,
        with_balance_and_cba: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Account>, ClientError> {
        self.http
            .get(ACCOUNTS)
            .query(
                QueryParams::new()
                    .with("externalKey", external_key)
                    .with("accountWithBalance", with_balance)
                    .with("accountWithBalanceAndCBA", with_balance_and_cba)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Search accounts by name, e-mail, key or id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_accounts(
        &self,
        key: &str,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Account>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/search/{}", encode_segment(key)))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Create an account and return it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn create_account(
        &self,
        account: &Account,
        opts: &RequestOptions,
    ) -> Result<Account, ClientError> {
        opts.require_created_by("create_account")?;
        self.http
            .post(ACCOUNTS)
            .json(account)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Update an account. With `treat_null_as_reset`, absent fields are
    /// cleared on the server instead of left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// account id, or an error if the request fails.
    pub async fn update_account(
        &self,
        account: &Account,
        treat_null_as_reset: bool,
        opts: &RequestOptions,
    ) -> Result<Option<Account>, ClientError> {
        opts.require_created_by("update_account")?;
        let account_id = required(account.account_id, "accountId", "update_account")?;
        self.http
            .put(format!("{ACCOUNTS}/{account_id}"))
            .query(QueryParams::new().with("treatNullAsReset", treat_null_as_reset))
            .json(account)?
            .send_optional(opts)
            .await
    }

    /// Close an account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn close_account(
        &self,
        account_id: AccountId,
        close: CloseAccountOptions,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("close_account")?;
        self.http
            .delete(format!("{ACCOUNTS}/{account_id}"))
            .query(
                QueryParams::new()
                    .with("cancelAllSubscriptions", close.cancel_all_subscriptions)
                    .with("writeOffUnpaidInvoices", close.write_off_unpaid_invoices)
                    .with("itemAdjustUnpaidInvoices", close.item_adjust_unpaid_invoices)
                    .with("removeFutureNotifications", close.remove_future_notifications),
            )
            .send_unit(opts)
            .await
    }

    /// Everything attached to an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_account_timeline(
        &self,
        account_id: AccountId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<AccountTimeline>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/timeline"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
    }

    /// Additional e-mails of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_emails(
        &self,
        account_id: AccountId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<AccountEmail>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/emails"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Add an e-mail and return the account's e-mails.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// account id, or an error if the request fails.
    pub async fn add_email(
        &self,
        email: &AccountEmail,
        opts: &RequestOptions,
    ) -> Result<Vec<AccountEmail>, ClientError> {
        opts.require_created_by("add_email")?;
        let account_id = required(email.account_id, "accountId", "add_email")?;
        self.http
            .post(format!("{ACCOUNTS}/{account_id}/emails"))
            .json(email)?
            .follow_location()
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Remove an e-mail.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// account id or address, or an error if the request fails.
    pub async fn remove_email(
        &self,
        email: &AccountEmail,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("remove_email")?;
        let account_id = required(email.account_id, "accountId", "remove_email")?;
        let address = required(email.email.as_deref(), "email", "remove_email")?;
        self.http
            .delete(format!(
                "{ACCOUNTS}/{account_id}/emails/{}",
                encode_segment(address)
            ))
            .send_unit(opts)
            .await
    }

    /// Whether the account is e-mailed its invoices.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_email_notifications(
        &self,
        account_id: AccountId,
        opts: &RequestOptions,
    ) -> Result<Option<InvoiceEmail>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/emailNotifications"))
            .send_optional(opts)
            .await
    }

    /// Turn invoice e-mails on or off.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author or
    /// account id, or an error if the request fails.
    pub async fn update_email_notifications(
        &self,
        invoice_email: &InvoiceEmail,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("update_email_notifications")?;
        let account_id = required(
            invoice_email.account_id,
            "accountId",
            "update_email_notifications",
        )?;
        self.http
            .put(format!("{ACCOUNTS}/{account_id}/emailNotifications"))
            .json(invoice_email)?
            .send_unit(opts)
            .await
    }

    /// Bundles of an account, optionally only the one with `external_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_account_bundles(
        &self,
        account_id: AccountId,
        external_key: Option<&str>,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Bundle>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/bundles"))
            .query(
                QueryParams::new()
                    .with_opt("externalKey", external_key)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Invoices of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoices_for_account(
        &self,
        account_id: AccountId,
        filter: &InvoiceFilter,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Invoice>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/invoices"))
            .query(filter.to_query().with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Payments of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payments_for_account(
        &self,
        account_id: AccountId,
        with_plugin_info: bool,
        with_attempts: bool,
        plugin_properties: &[(String, String)],
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Payment>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/payments"))
            .query(
                QueryParams::new()
                    .with("withPluginInfo", with_plugin_info)
                    .with("withAttempts", with_attempts)
                    .with_plugin_properties(plugin_properties)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Invoice payments of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_invoice_payments_for_account(
        &self,
        account_id: AccountId,
        with_plugin_info: bool,
        with_attempts: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<InvoicePayment>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/invoicePayments"))
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

    /// Pay every unpaid invoice of an account.
    ///
    /// Without `payment_method_id` the account default is used. With
    /// `external_payment` the payment is recorded without calling a gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn pay_all_invoices(
        &self,
        account_id: AccountId,
        payment_method_id: Option<PaymentMethodId>,
        external_payment: bool,
        payment_amount: Option<Decimal>,
        target_date: Option<NaiveDate>,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("pay_all_invoices")?;
        self.http
            .post(format!("{ACCOUNTS}/{account_id}/invoicePayments"))
            .query(
                QueryParams::new()
                    .with_opt("paymentMethodId", payment_method_id)
                    .with("externalPayment", external_payment)
                    .with_opt("paymentAmount", payment_amount)
                    .with_date("targetDate", target_date)
                    .with_plugin_properties(plugin_properties),
            )
            .send_unit(opts)
            .await
    }

    /// Start a payment for an account with an authorization, a purchase or
    /// a credit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidArgument`] for any other transaction
    /// type, [`ClientError::MissingParameter`] without an audit author, type,
    /// amount or currency, or an error if the request fails.
    pub async fn process_payment(
        &self,
        account_id: AccountId,
        transaction: &PaymentTransaction,
        payment_method_id: Option<PaymentMethodId>,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<Payment, ClientError> {
        const OPERATION: &str = "process_payment";
        opts.require_created_by(OPERATION)?;
        let transaction_type = required(transaction.transaction_type, "transactionType", OPERATION)?;
        if !matches!(
            transaction_type,
            TransactionType::Authorize | TransactionType::Credit | TransactionType::Purchase
        ) {
            return Err(ClientError::InvalidArgument(format!(
                "Invalid transaction type {transaction_type}"
            )));
        }
        required(transaction.amount, "amount", OPERATION)?;
        required(transaction.currency.as_ref(), "currency", OPERATION)?;

        self.http
            .post(format!("{ACCOUNTS}/{account_id}/payments"))
            .query(
                QueryParams::new()
                    .with_opt("paymentMethodId", payment_method_id)
                    .with_plugin_properties(plugin_properties),
            )
            .json(transaction)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Payment methods of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_payment_methods_for_account(
        &self,
        account_id: AccountId,
        with_plugin_info: bool,
        included_deleted: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<PaymentMethod>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/paymentMethods"))
            .query(
                QueryParams::new()
                    .with("withPluginInfo", with_plugin_info)
                    .with("includedDeleted", included_deleted)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Register a payment method with its plugin.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// account id or plugin name, or an error if the request fails.
    pub async fn create_payment_method(
        &self,
        payment_method: &PaymentMethod,
        is_default: bool,
        pay_all_unpaid_invoices: bool,
        plugin_properties: &[(String, String)],
        opts: &RequestOptions,
    ) -> Result<PaymentMethod, ClientError> {
        const OPERATION: &str = "create_payment_method";
        opts.require_created_by(OPERATION)?;
        let account_id = required(payment_method.account_id, "accountId", OPERATION)?;
        required(payment_method.plugin_name.as_deref(), "pluginName", OPERATION)?;

        self.http
            .post(format!("{ACCOUNTS}/{account_id}/paymentMethods"))
            .query(
                QueryParams::new()
                    .with("isDefault", is_default)
                    .with("payAllUnpaidInvoices", pay_all_unpaid_invoices)
                    .with_plugin_properties(plugin_properties),
            )
            .json(payment_method)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Make a payment method the account default.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn set_default_payment_method(
        &self,
        account_id: AccountId,
        payment_method_id: PaymentMethodId,
        pay_all_unpaid_invoices: bool,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("set_default_payment_method")?;
        self.http
            .put(format!(
                "{ACCOUNTS}/{account_id}/paymentMethods/{payment_method_id}/setDefault"
            ))
            .query(QueryParams::new().with("payAllUnpaidInvoices", pay_all_unpaid_invoices))
            .send_unit(opts)
            .await
    }

    /// Chargebacks against the account's payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_chargebacks_for_account(
        &self,
        account_id: AccountId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Chargeback>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/chargebacks"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Overdue state of an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_overdue_state(
        &self,
        account_id: AccountId,
        opts: &RequestOptions,
    ) -> Result<Option<OverdueState>, ClientError> {
        self.http
            .get(format!("{ACCOUNTS}/{account_id}/overdue"))
            .send_optional(opts)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_filter_query() {
        let filter = InvoiceFilter {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            unpaid_invoices_only: true,
            ..InvoiceFilter::default()
        };
        let query = filter.to_query();
        assert_eq!(query.get("startDate"), Some("2024-01-01"));
        assert!(query.get("endDate").is_none());
        assert_eq!(query.get("unpaidInvoicesOnly"), Some("true"));
        assert_eq!(query.get("withMigrationInvoices"), Some("false"));
        assert!(query.get("invoicesFilter").is_none());
    }
}
