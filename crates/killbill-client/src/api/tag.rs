//! Tags across every object type.

use killbill_model::{AuditLevel, Tag};

use super::TAGS;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, Pagination, QueryParams};

/// Tag listing and search.
#[derive(Debug, Clone)]
pub struct TagApi {
    http: KillBillHttpClient,
}

impl TagApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// List tags page by page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_tags(
        &self,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Tag>, ClientError> {
        self.http
            .get(format!("{TAGS}/pagination"))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }

    /// Search tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn search_tags(
        &self,
        key: &str,
        page: Pagination,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Vec<Tag>, ClientError> {
        self.http
            .get(format!("{TAGS}/search/{}", encode_segment(key)))
            .query(QueryParams::new().with_page(page).with_audit(audit))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }
}
