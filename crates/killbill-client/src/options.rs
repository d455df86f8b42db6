//! Per-request options: credentials overrides, tenant, audit trail and
//! follow-location behavior.

use crate::error::ClientError;
use crate::query::QueryParams;

/// Options attached to a single call.
///
/// Mutating calls need at least `created_by`; it is recorded by the server in
/// the audit log of every object the call touches, together with `reason`
/// and `comment`.
///
/// ```
/// use killbill_client::RequestOptions;
///
/// let opts = RequestOptions::audit("admin", "new customer", "created from signup")
///     .with_tenant("bob", "lazar");
/// assert_eq!(opts.created_by.as_deref(), Some("admin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Sent as `X-Request-Id`.
    pub request_id: Option<String>,
    /// Overrides the configured basic-auth user.
    pub user: Option<String>,
    /// Overrides the configured basic-auth password.
    pub password: Option<String>,
    /// Overrides the configured tenant api key.
    pub tenant_api_key: Option<String>,
    /// Overrides the configured tenant api secret.
    pub tenant_api_secret: Option<String>,
    /// Sent as `X-Killbill-CreatedBy`.
    pub created_by: Option<String>,
    /// Sent as `X-Killbill-Reason`.
    pub reason: Option<String>,
    /// Sent as `X-Killbill-Comment`.
    pub comment: Option<String>,
    /// Extra headers.
    pub headers: Vec<(String, String)>,
    /// Extra query parameters, sent before the ones the operation adds.
    pub query_params: QueryParams,
    /// Whether to GET the `Location` of a `201 Created`. `None` keeps the
    /// operation's default.
    pub follow_location: Option<bool>,
    /// Query parameters of that follow-up GET.
    pub query_params_for_follow: QueryParams,
}

impl RequestOptions {
    /// Options with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying an audit trail.
    #[must_use]
    pub fn audit(
        created_by: impl Into<String>,
        reason: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            created_by: Some(created_by.into()),
            reason: Some(reason.into()),
            comment: Some(comment.into()),
            ..Self::default()
        }
    }

    /// Set the author of the change.
    #[must_use]
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Set the reason of the change.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Set the comment of the change.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Set the request id.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Override the basic-auth credentials.
    #[must_use]
    pub fn with_credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    /// Override the tenant.
    #[must_use]
    pub fn with_tenant(mut self, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        self.tenant_api_key = Some(api_key.into());
        self.tenant_api_secret = Some(api_secret.into());
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query_params.push(key, value);
        self
    }

    /// Force following, or not following, the `Location` of a create.
    #[must_use]
    pub fn with_follow_location(mut self, follow: bool) -> Self {
        self.follow_location = Some(follow);
        self
    }

    /// Add a query parameter to the follow-up GET.
    #[must_use]
    pub fn with_query_param_for_follow(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query_params_for_follow.push(key, value);
        self
    }

    /// The author of the change, required by mutating operations.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] when `created_by` is absent.
    pub fn require_created_by(&self, operation: &'static str) -> Result<&str, ClientError> {
        self.created_by
            .as_deref()
            .ok_or(ClientError::MissingParameter {
                parameter: "createdBy",
                operation,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_constructor() {
        let opts = RequestOptions::audit("me", "why", "note");
        assert_eq!(opts.created_by.as_deref(), Some("me"));
        assert_eq!(opts.reason.as_deref(), Some("why"));
        assert_eq!(opts.comment.as_deref(), Some("note"));
        assert!(opts.follow_location.is_none());
        assert_eq!(opts.require_created_by("create_account").unwrap(), "me");
    }

    #[test]
    fn missing_created_by() {
        let err = RequestOptions::new()
            .with_reason("why")
            .require_created_by("close_account")
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::MissingParameter {
                parameter: "createdBy",
                operation: "close_account"
            }
        ));
    }

    #[test]
    fn builders_accumulate() {
        let opts = RequestOptions::new()
            .with_header("X-Trace", "1")
            .with_header("X-Trace", "2")
            .with_query_param("pluginProperty", "a=b")
            .with_query_param_for_follow("withPluginInfo", true)
            .with_follow_location(false);

        assert_eq!(opts.headers.len(), 2);
        assert_eq!(opts.query_params.get("pluginProperty"), Some("a=b"));
        assert_eq!(opts.query_params_for_follow.get("withPluginInfo"), Some("true"));
        assert_eq!(opts.follow_location, Some(false));
    }
}
