//! Account credits.

use killbill_model::{AuditLevel, Credit, CreditId};

use super::CREDITS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::QueryParams;

/// Credit operations.
#[derive(Debug, Clone)]
pub struct CreditApi {
    http: KillBillHttpClient,
}

impl CreditApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Get a credit by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_credit(
        &self,
        credit_id: CreditId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Credit>, ClientError> {
        self.http
            .get(format!("{CREDITS}/{credit_id}"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
    }

    /// Credit an account and return the credit as stored. Without
    /// `auto_commit` the credit lands on a draft invoice.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// account id or amount, or an error if the request fails.
    pub async fn create_credit(
        &self,
        credit: &Credit,
        auto_commit: bool,
        opts: &RequestOptions,
    ) -> Result<Credit, ClientError> {
        const OPERATION: &str = "create_credit";
        opts.require_created_by(OPERATION)?;
        required(credit.account_id, "accountId", OPERATION)?;
        required(credit.credit_amount, "creditAmount", OPERATION)?;

        self.http
            .post(CREDITS)
            .query(QueryParams::new().with("autoCommit", auto_commit))
            .json(credit)?
            .follow_location()
            .send_json(opts)
            .await
    }
}
