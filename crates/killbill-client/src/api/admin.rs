//! Server administration: caches, rotation, parked accounts and payment
//! state repair.

use killbill_model::{AccountId, AdminPayment, PaymentId, TransactionId};

use super::ADMIN;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{Pagination, QueryParams};

/// Admin operations.
#[derive(Debug, Clone)]
pub struct AdminApi {
    http: KillBillHttpClient,
}

impl AdminApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Invalidate one cache, or every cache when `cache_name` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn invalidates_cache(
        &self,
        cache_name: Option<&str>,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        self.http
            .delete(format!("{ADMIN}/cache"))
            .query(QueryParams::new().with_opt("cacheName", cache_name))
            .send_unit(opts)
            .await
    }

    /// Invalidate the caches of one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn invalidates_cache_by_account(
        &self,
        account_id: AccountId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        self.http
            .delete(format!("{ADMIN}/cache/accounts/{account_id}"))
            .send_unit(opts)
            .await
    }

    /// Invalidate the caches of one tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn invalidates_cache_by_tenant(
        &self,
        tenant_api_key: &str,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        self.http
            .delete(format!("{ADMIN}/cache/tenants"))
            .query(QueryParams::new().with("tenantApiKey", tenant_api_key))
            .send_unit(opts)
            .await
    }

    /// Put the node back behind the load balancer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn put_in_rotation(&self, opts: &RequestOptions) -> Result<(), ClientError> {
        self.http
            .post(format!("{ADMIN}/healthcheck"))
            .follow_location()
            .send_unit(opts)
            .await
    }

    /// Take the node out of the load balancer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn put_out_of_rotation(&self, opts: &RequestOptions) -> Result<(), ClientError> {
        self.http
            .delete(format!("{ADMIN}/healthcheck"))
            .send_unit(opts)
            .await
    }

    /// Run invoice generation for accounts parked after a failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn trigger_invoice_generation_for_parked_accounts(
        &self,
        page: Pagination,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        self.http
            .post(format!("{ADMIN}/invoices"))
            .query(QueryParams::new().with_page(page))
            .follow_location()
            .send_unit(opts)
            .await
    }

    /// Force the state of a payment transaction, e.g. after a plugin lost
    /// track of it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_payment_transaction_state(
        &self,
        state: &AdminPayment,
        payment_id: PaymentId,
        transaction_id: TransactionId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        self.http
            .put(format!(
                "{ADMIN}/payments/{payment_id}/transactions/{transaction_id}"
            ))
            .json(state)?
            .send_unit(opts)
            .await
    }
}
