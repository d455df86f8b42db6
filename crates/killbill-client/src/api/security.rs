//! Permissions of the calling user.

use super::SECURITY;
use crate::error::ClientError;
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;

/// Security operations.
#[derive(Debug, Clone)]
pub struct SecurityApi {
    http: KillBillHttpClient,
}

impl SecurityApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Permissions granted to the authenticated user, e.g. `account:create`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_current_user_permissions(
        &self,
        opts: &RequestOptions,
    ) -> Result<Vec<String>, ClientError> {
        self.http
            .get(format!("{SECURITY}/permissions"))
            .send_optional(opts)
            .await
            .map(Option::unwrap_or_default)
    }
}
