//! Usage recording and roll-ups for usage-billed plans.

use chrono::NaiveDate;
use killbill_model::{RolledUpUsage, SubscriptionId, SubscriptionUsageRecord};

use super::USAGES;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{encode_segment, QueryParams};

/// Usage operations.
#[derive(Debug, Clone)]
pub struct UsageApi {
    http: KillBillHttpClient,
}

impl UsageApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Record usage of a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// subscription id or unit record, or an error if the request fails.
    pub async fn record_usage(
        &self,
        record: &SubscriptionUsageRecord,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        const OPERATION: &str = "record_usage";
        opts.require_created_by(OPERATION)?;
        required(record.subscription_id, "subscriptionId", OPERATION)?;
        required(record.unit_usage_records.first(), "unitUsageRecords", OPERATION)?;

        self.http.post(USAGES).json(record)?.send_unit(opts).await
    }

    /// Usage of one unit over `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_usage(
        &self,
        subscription_id: SubscriptionId,
        unit_type: &str,
        start: NaiveDate,
        end: NaiveDate,
        opts: &RequestOptions,
    ) -> Result<Option<RolledUpUsage>, ClientError> {
        self.http
            .get(format!(
                "{USAGES}/{subscription_id}/{}",
                encode_segment(unit_type)
            ))
            .query(date_range(start, end))
            .send_optional(opts)
            .await
    }

    /// Usage of every unit over `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_all_usage(
        &self,
        subscription_id: SubscriptionId,
        start: NaiveDate,
        end: NaiveDate,
        opts: &RequestOptions,
    ) -> Result<Option<RolledUpUsage>, ClientError> {
        self.http
            .get(format!("{USAGES}/{subscription_id}"))
            .query(date_range(start, end))
            .send_optional(opts)
            .await
    }
}

fn date_range(start: NaiveDate, end: NaiveDate) -> QueryParams {
    QueryParams::new()
        .with_date("startDate", Some(start))
        .with_date("endDate", Some(end))
}
