//! Account data export.

use killbill_model::AccountId;

use super::EXPORT;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;

/// Export operations.
#[derive(Debug, Clone)]
pub struct ExportApi {
    http: KillBillHttpClient,
}

impl ExportApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Dump every table row of an account as text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn export_data_for_account(
        &self,
        account_id: AccountId,
        opts: &RequestOptions,
    ) -> Result<Option<String>, ClientError> {
        opts.require_created_by("export_data_for_account")?;
        self.http
            .get(format!("{EXPORT}/{account_id}"))
            .accept("text/plain")
            .send_text(opts)
            .await
    }
}
