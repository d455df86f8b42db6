//! Error types for the model crate.

/// Errors raised while parsing model values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The input is not a valid UUID.
    #[error("invalid UUID format: {0}")]
    InvalidUuid(String),

    /// The input is not a three-letter currency code.
    #[error("invalid currency code: {0}")]
    InvalidCurrency(String),

    /// The input does not name a known enumeration value.
    #[error("unknown {kind} value: {value}")]
    UnknownVariant {
        /// The enumeration being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}
