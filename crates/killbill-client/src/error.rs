//! Client error types.

use serde::{Deserialize, Serialize};

/// Errors that can occur when using the Kill Bill client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a failure status.
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
        /// The body decoded as a server exception, when it is one.
        billing_exception: Option<BillingException>,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A required argument or model field is absent.
    #[error("Missing the required parameter '{parameter}' when calling {operation}")]
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
        /// Operation that required it.
        operation: &'static str,
    },

    /// An argument has a value the operation does not accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The server created a resource but sent no `Location` header to follow.
    #[error("missing Location header in 201 response")]
    MissingLocation,

    /// A response body was required but none came back.
    #[error("empty response body")]
    EmptyResponse,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A model value failed validation, e.g. an unknown currency code.
    #[error(transparent)]
    Model(#[from] killbill_model::ModelError),
}

impl ClientError {
    /// HTTP status of an API error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Error code reported by the server, e.g. `1001` for an unknown account.
    #[must_use]
    pub fn billing_code(&self) -> Option<i32> {
        match self {
            Self::Api {
                billing_exception: Some(exception),
                ..
            } => exception.code,
            _ => None,
        }
    }
}

/// Exception payload the server sends with failure statuses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingException {
    /// Server-side class of the exception.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Server error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    /// Message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Class of the root cause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_class_name: Option<String>,
    /// Message of the root cause.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_message: Option<String>,
    /// Server-side stack trace.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<serde_json::Value>,
}

/// Unwraps a required argument or model field.
pub(crate) fn required<T>(
    value: Option<T>,
    parameter: &'static str,
    operation: &'static str,
) -> Result<T, ClientError> {
    value.ok_or(ClientError::MissingParameter {
        parameter,
        operation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_message() {
        let err = required::<u8>(None, "accountId", "create_credit").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing the required parameter 'accountId' when calling create_credit"
        );
    }

    #[test]
    fn billing_code_from_exception() {
        let exception: BillingException = serde_json::from_str(
            r#"{
                "className": "org.killbill.billing.account.api.AccountApiException",
                "code": 1001,
                "message": "Account does not exist",
                "stackTrace": []
            }"#,
        )
        .unwrap();
        let err = ClientError::Api {
            status: 404,
            body: String::new(),
            billing_exception: Some(exception),
        };

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.billing_code(), Some(1001));
        assert_eq!(ClientError::EmptyResponse.billing_code(), None);
    }
}
