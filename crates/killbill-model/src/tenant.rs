//! Tenants and tenant key-value entries.

use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::ids::TenantId;

/// A tenant. The secret is only ever sent, never returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<TenantId>,
    /// Caller-chosen unique key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_key: Option<String>,
    /// Api key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Api secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

impl Tenant {
    /// A tenant to create with the given credentials.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            api_secret: Some(api_secret.into()),
            ..Self::default()
        }
    }
}

/// Values stored under one tenant key, e.g. push notification callbacks
/// or a plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantKeyValue {
    /// Key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Values.
    #[serde(default)]
    pub values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tenant_carries_credentials() {
        let tenant = Tenant::new("bob", "lazar");
        assert_eq!(
            serde_json::to_value(&tenant).unwrap(),
            serde_json::json!({"apiKey": "bob", "apiSecret": "lazar"})
        );
    }

    #[test]
    fn key_value_defaults_values() {
        let kv: TenantKeyValue = serde_json::from_str(r#"{"key": "PUSH_NOTIFICATION_CB"}"#).unwrap();
        assert!(kv.values.is_empty());
    }
}
