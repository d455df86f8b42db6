//! Audit log entries attached to returned objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::ObjectType;
use crate::ids::ObjectId;

/// One entry of an object's audit history.
///
/// Only present when the request asked for an audit level other than
/// [`AuditLevel::None`](crate::AuditLevel::None).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    /// `INSERT`, `UPDATE` or `DELETE`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,
    /// When the change happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_date: Option<DateTime<Utc>>,
    /// Kind of object that changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_type: Option<ObjectType>,
    /// Id of the object that changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// The `X-Killbill-CreatedBy` value of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changed_by: Option<String>,
    /// The `X-Killbill-Reason` value of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason_code: Option<String>,
    /// The `X-Killbill-Comment` value of the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Request id the change was made under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_token: Option<String>,
    /// Snapshot of the record, when requested with full history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<serde_json::Value>,
}
