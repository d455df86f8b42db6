//! Usage records sent to the server and rolled-up usage read back.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::SubscriptionId;

/// Usage of one subscription, grouped by unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUsageRecord {
    /// Subscription the usage belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<SubscriptionId>,
    /// Caller key used to deduplicate submissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_id: Option<String>,
    /// Records per unit.
    #[serde(default)]
    pub unit_usage_records: Vec<UnitUsageRecord>,
}

/// Usage of one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitUsageRecord {
    /// Unit name from the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    /// Amounts by day.
    #[serde(default)]
    pub usage_records: Vec<UsageRecord>,
}

/// Usage amount on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    /// Day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_date: Option<NaiveDate>,
    /// Amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

/// Usage of a subscription summed over a period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolledUpUsage {
    /// Subscription.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<SubscriptionId>,
    /// Period start, inclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Period end, exclusive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Totals per unit.
    #[serde(default)]
    pub rolled_up_units: Vec<RolledUpUnit>,
}

/// Total of one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolledUpUnit {
    /// Unit name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_type: Option<String>,
    /// Total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn usage_record_dates_are_plain_days() {
        let record = UsageRecord {
            record_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            amount: Some(dec!(12)),
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"recordDate": "2024-03-01", "amount": 12.0})
        );
    }
}
