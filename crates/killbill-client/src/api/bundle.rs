//! Subscription bundles.

use chrono::NaiveDate;
use killbill_model::{AuditLevel, BillingActionPolicy, Bundle, BundleId};

use super::metadata::MetadataApi;
use super::BUNDLES;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// Bundle operations.
#[derive(Debug, Clone)]
pub struct BundleApi {
    http: KillBillHttpClient,
}

impl BundleApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Tags and custom fields of bundles.
    #[must_use]
    pub fn metadata(&self) -> MetadataApi<BundleId> {
        MetadataApi::new(self.http.clone())
    }

    /// Get a bundle by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_bundle(
        &self,
        bundle_id: BundleId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Bundle>, ClientError> {
        self.http
            .get(format!("{BUNDLES}/{bundle_id}"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
    }

    /// Bundles with an external key. A key is reused after a transfer, so
    /// `included_deleted` also returns the transferred-away bundles.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_bundles_by_key(
        &self,
        external_key: &str,
        included_deleted: bool,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Bundle>, ClientError> {
        self.http
            .get(BUNDLES)
            .query(
                QueryParams::new()
                    .with("externalKey", external_key)
                    .with("includedDeleted", included_deleted)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// List bundles page by page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_bundles(
        &self,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Bundle>, ClientError> {
        self.http
            .get(format!("{BUNDLES}/pagination"))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Search bundles by key or id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_bundles(
        &self,
        key: &str,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Bundle>, ClientError> {
        self.http
            .get(format!("{BUNDLES}/search/{}", encode_segment(key)))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Move a bundle to the account set on `bundle` and return the new bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// bundle id or account id, or an error if the request fails.
    pub async fn transfer_bundle(
        &self,
        bundle: &Bundle,
        requested_date: Option<NaiveDate>,
        billing_policy: Option<BillingActionPolicy>,
        opts: &RequestOptions,
    ) -> Result<Bundle, ClientError> {
        const OPERATION: &str = "transfer_bundle";
        opts.require_created_by(OPERATION)?;
        let bundle_id = required(bundle.bundle_id, "bundleId", OPERATION)?;
        required(bundle.account_id, "accountId", OPERATION)?;

        self.http
            .post(format!("{BUNDLES}/{bundle_id}"))
            .query(
                QueryParams::new()
                    .with_date("requestedDate", requested_date)
                    .with_opt("billingPolicy", billing_policy),
            )
            .json(bundle)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Pause every subscription of a bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn pause_bundle(
        &self,
        bundle_id: BundleId,
        requested_date: Option<NaiveDate>,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("pause_bundle")?;
        self.http
            .put(format!("{BUNDLES}/{bundle_id}/pause"))
            .query(QueryParams::new().with_date("requestedDate", requested_date))
            .send_unit(opts)
            .await
    }

    /// Resume a paused bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn resume_bundle(
        &self,
        bundle_id: BundleId,
        requested_date: Option<NaiveDate>,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("resume_bundle")?;
        self.http
            .put(format!("{BUNDLES}/{bundle_id}/resume"))
            .query(QueryParams::new().with_date("requestedDate", requested_date))
            .send_unit(opts)
            .await
    }
}
