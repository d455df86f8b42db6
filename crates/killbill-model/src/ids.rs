//! Identifier types for Kill Bill resources.
//!
//! Every server-side entity is keyed by a UUID. Each resource gets its own
//! newtype so an invoice id cannot be passed where an account id is expected.
//!
//! # Macro-based ID Types
//!
//! The `uuid_id_type!` macro reduces boilerplate for the identifier types,
//! keeping serialization, parsing and display consistent across all of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Macro to define a UUID-based identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `uuid::Uuid` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (as string)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`, `From<uuid::Uuid>`
macro_rules! uuid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Create a new identifier from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier (primarily for testing).
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Return the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// View this identifier as the resource-agnostic [`ObjectId`].
            #[must_use]
            pub const fn as_object_id(&self) -> ObjectId {
                ObjectId::from_uuid(self.0)
            }
        }

        impl FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid =
                    uuid::Uuid::parse_str(s).map_err(|_| ModelError::InvalidUuid(s.to_string()))?;
                Ok(Self(uuid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

uuid_id_type!(AccountId, "An account identifier.");
uuid_id_type!(BundleId, "A subscription bundle identifier.");
uuid_id_type!(SubscriptionId, "A subscription identifier.");
uuid_id_type!(InvoiceId, "An invoice identifier.");
uuid_id_type!(InvoiceItemId, "An invoice item identifier.");
uuid_id_type!(PaymentId, "A payment identifier.");
uuid_id_type!(PaymentMethodId, "A payment method identifier.");
uuid_id_type!(TransactionId, "A payment transaction identifier.");
uuid_id_type!(PaymentAttemptId, "A payment attempt identifier.");
uuid_id_type!(TagId, "A tag identifier.");
uuid_id_type!(
    TagDefinitionId,
    "A tag definition identifier.\n\nControl tags such as `AUTO_PAY_OFF` have fixed, well-known ids."
);
uuid_id_type!(CustomFieldId, "A custom field identifier.");
uuid_id_type!(CreditId, "A credit identifier.");
uuid_id_type!(TenantId, "A tenant identifier.");
uuid_id_type!(
    ObjectId,
    "A resource-agnostic identifier.\n\nTags, custom fields and audit logs point at the object they decorate through this type."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_roundtrip() {
        let id = AccountId::generate();
        let parsed = AccountId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn invoice_id_serializes_as_plain_string() {
        let id: InvoiceId = "6b6b6f40-6a47-4b0b-a1a4-4e1ee0a07ba1".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6b6b6f40-6a47-4b0b-a1a4-4e1ee0a07ba1\"");
    }

    #[test]
    fn rejects_malformed_uuid() {
        let err = PaymentId::from_str("not-a-uuid").unwrap_err();
        assert_eq!(err, ModelError::InvalidUuid("not-a-uuid".to_string()));

        let parsed: Result<PaymentId, _> = serde_json::from_str("\"nope\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn object_id_shares_the_uuid() {
        let account = AccountId::generate();
        assert_eq!(account.as_object_id().as_uuid(), account.as_uuid());
    }

    #[test]
    fn debug_names_the_type() {
        let uuid = uuid::Uuid::nil();
        let id = TenantId::from_uuid(uuid);
        assert_eq!(
            format!("{id:?}"),
            "TenantId(00000000-0000-0000-0000-000000000000)"
        );
    }
}
