//! Custom fields across every object type.

use killbill_model::{AuditLevel, CustomField};

use super::CUSTOM_FIELDS;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// Custom field listing and search.
#[derive(Debug, Clone)]
pub struct CustomFieldApi {
    http: KillBillHttpClient,
}

impl CustomFieldApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// List custom fields page by page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_custom_fields(
        &self,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<CustomField>, ClientError> {
        self.http
            .get(format!("{CUSTOM_FIELDS}/pagination"))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Search custom fields by name or value.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_custom_fields(
        &self,
        key: &str,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<CustomField>, ClientError> {
        self.http
            .get(format!("{CUSTOM_FIELDS}/search/{}", encode_segment(key)))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }
}
