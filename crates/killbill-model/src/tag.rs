//! Tags, tag definitions and custom fields.

use serde::{Deserialize, Serialize};

use crate::audit::AuditLog;
use crate::enums::ObjectType;
use crate::ids::{CustomFieldId, ObjectId, TagDefinitionId, TagId};

/// A tag attached to an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<TagId>,
    /// Kind of the tagged object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    /// Tagged object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Definition the tag instantiates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_definition_id: Option<TagDefinitionId>,
    /// Name of that definition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_definition_name: Option<String>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// A tag definition, either built in or user defined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDefinition {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TagDefinitionId>,
    /// Whether the server controls it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_control_tag: Option<bool>,
    /// Unique name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object kinds the tag may be applied to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applicable_object_types: Vec<ObjectType>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

/// A name/value pair attached to an object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Server-assigned id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_field_id: Option<CustomFieldId>,
    /// Object the field is attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Kind of that object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    /// Field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Field value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Audit history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audit_logs: Vec<AuditLog>,
}

impl CustomField {
    /// A new field to attach; the object is taken from the request path.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_custom_field_serializes_name_and_value_only() {
        let field = CustomField::new("tier", "gold");
        assert_eq!(
            serde_json::to_value(&field).unwrap(),
            serde_json::json!({"name": "tier", "value": "gold"})
        );
    }

    #[test]
    fn tag_definition_object_types() {
        let def: TagDefinition = serde_json::from_str(
            r#"{
                "id": "00000000-0000-0000-0000-000000000001",
                "isControlTag": true,
                "name": "AUTO_PAY_OFF",
                "applicableObjectTypes": ["ACCOUNT"]
            }"#,
        )
        .unwrap();
        assert_eq!(def.is_control_tag, Some(true));
        assert_eq!(def.applicable_object_types, vec![ObjectType::Account]);
    }
}
