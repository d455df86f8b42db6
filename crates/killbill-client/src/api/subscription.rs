//! Subscriptions: create, change plan, cancel, uncancel and bill cycle day.
//!
//! Entitlement changes are processed asynchronously by the server. Pass
//! [`CallCompletion::wait`] to have the server hold the answer until the
//! change is visible; the HTTP timeout is raised to match.

use chrono::NaiveDate;
use killbill_model::{
    AuditLevel, BillingActionPolicy, EntitlementActionPolicy, Subscription, SubscriptionId,
};

use super::metadata::MetadataApi;
use super::SUBSCRIPTIONS;
use crate::error::{required, ClientError};
use crate::http::KillBillHttpClient;
use crate::options::RequestOptions;
use crate::query::{CallCompletion, QueryParams};

/// When and how a cancellation applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CancelPolicy {
    /// Date of the cancellation; today when absent.
    pub requested_date: Option<NaiveDate>,
    /// When the entitlement ends.
    pub entitlement_policy: Option<EntitlementActionPolicy>,
    /// When billing stops.
    pub billing_policy: Option<BillingActionPolicy>,
    /// Use `requested_date` for billing as well.
    pub use_requested_date_for_billing: bool,
}

/// Subscription operations.
#[derive(Debug, Clone)]
pub struct SubscriptionApi {
    http: KillBillHttpClient,
}

impl SubscriptionApi {
    /// Create the API over a transport.
    #[must_use]
    pub fn new(http: KillBillHttpClient) -> Self {
        Self { http }
    }

    /// Tags and custom fields of subscriptions.
    #[must_use]
    pub fn metadata(&self) -> MetadataApi<SubscriptionId> {
        MetadataApi::new(self.http.clone())
    }

    /// Get a subscription by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_subscription(
        &self,
        subscription_id: SubscriptionId,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Subscription>, ClientError> {
        self.http
            .get(format!("{SUBSCRIPTIONS}/{subscription_id}"))
            .query(QueryParams::new().with_audit(audit))
            .send_optional(opts)
            .await
    }

    /// Get a subscription by external key.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_subscription_by_key(
        &self,
        external_key: &str,
        audit: AuditLevel,
        opts: &RequestOptions,
    ) -> Result<Option<Subscription>, ClientError> {
        self.http
            .get(SUBSCRIPTIONS)
            .query(
                QueryParams::new()
                    .with("externalKey", external_key)
                    .with_audit(audit),
            )
            .send_optional(opts)
            .await
    }

    /// Create a subscription and return it as stored.
    ///
    /// The plan is given either by `plan_name`, or by product name,
    /// category, billing period and price list. A base subscription without
    /// `bundle_id` starts a new bundle.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// account id or plan, or an error if the request fails.
    pub async fn create_subscription(
        &self,
        subscription: &Subscription,
        entitlement_date: Option<NaiveDate>,
        billing_date: Option<NaiveDate>,
        completion: CallCompletion,
        opts: &RequestOptions,
    ) -> Result<Subscription, ClientError> {
        const OPERATION: &str = "create_subscription";
        opts.require_created_by(OPERATION)?;
        required(subscription.account_id, "accountId", OPERATION)?;
        if subscription.plan_name.is_none() {
            required(subscription.product_name.as_deref(), "productName", OPERATION)?;
            required(subscription.product_category, "productCategory", OPERATION)?;
            required(subscription.billing_period, "billingPeriod", OPERATION)?;
            required(subscription.price_list.as_deref(), "priceList", OPERATION)?;
        }

        self.http
            .post(SUBSCRIPTIONS)
            .query(
                QueryParams::new()
                    .with_date("entitlementDate", entitlement_date)
                    .with_date("billingDate", billing_date)
                    .with_call_completion(completion),
            )
            .call_completion(completion)
            .json(subscription)?
            .follow_location()
            .send_json(opts)
            .await
    }

    /// Change the plan of a subscription.
    ///
    /// The new plan is given either by `plan_name`, or by product name,
    /// billing period and price list. Returns the subscription when the
    /// server sends it back.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// subscription id or plan, or an error if the request fails.
    pub async fn change_subscription_plan(
        &self,
        subscription: &Subscription,
        requested_date: Option<NaiveDate>,
        billing_policy: Option<BillingActionPolicy>,
        completion: CallCompletion,
        opts: &RequestOptions,
    ) -> Result<Option<Subscription>, ClientError> {
        const OPERATION: &str = "change_subscription_plan";
        opts.require_created_by(OPERATION)?;
        let subscription_id = required(subscription.subscription_id, "subscriptionId", OPERATION)?;
        if subscription.plan_name.is_none() {
            required(subscription.product_name.as_deref(), "productName", OPERATION)?;
            required(subscription.billing_period, "billingPeriod", OPERATION)?;
            required(subscription.price_list.as_deref(), "priceList", OPERATION)?;
        }

        self.http
            .put(format!("{SUBSCRIPTIONS}/{subscription_id}"))
            .query(
                QueryParams::new()
                    .with_date("requestedDate", requested_date)
                    .with_opt("billingPolicy", billing_policy)
                    .with_call_completion(completion),
            )
            .call_completion(completion)
            .json(subscription)?
            .send_optional(opts)
            .await
    }

    /// Cancel a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn cancel_subscription(
        &self,
        subscription_id: SubscriptionId,
        policy: CancelPolicy,
        completion: CallCompletion,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("cancel_subscription")?;
        self.http
            .delete(format!("{SUBSCRIPTIONS}/{subscription_id}"))
            .query(
                QueryParams::new()
                    .with_date("requestedDate", policy.requested_date)
                    .with_opt("entitlementPolicy", policy.entitlement_policy)
                    .with_opt("billingPolicy", policy.billing_policy)
                    .with(
                        "useRequestedDateForBilling",
                        policy.use_requested_date_for_billing,
                    )
                    .with_call_completion(completion),
            )
            .call_completion(completion)
            .send_unit(opts)
            .await
    }

    /// Undo a pending cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author, or
    /// an error if the request fails.
    pub async fn uncancel_subscription(
        &self,
        subscription_id: SubscriptionId,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        opts.require_created_by("uncancel_subscription")?;
        self.http
            .put(format!("{SUBSCRIPTIONS}/{subscription_id}/uncancel"))
            .send_unit(opts)
            .await
    }

    /// Change the bill cycle day of a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingParameter`] without an audit author,
    /// subscription id or bill cycle day, or an error if the request fails.
    pub async fn update_subscription_bcd(
        &self,
        subscription: &Subscription,
        effective_from: Option<NaiveDate>,
        force_past_effective_date: bool,
        opts: &RequestOptions,
    ) -> Result<(), ClientError> {
        const OPERATION: &str = "update_subscription_bcd";
        opts.require_created_by(OPERATION)?;
        let subscription_id = required(subscription.subscription_id, "subscriptionId", OPERATION)?;
        required(subscription.bill_cycle_day_local, "billCycleDayLocal", OPERATION)?;

        self.http
            .put(format!("{SUBSCRIPTIONS}/{subscription_id}/bcd"))
            .query(
                QueryParams::new()
                    .with_date("effectiveFromDate", effective_from)
                    .with("forceNewBcdWithPastEffectiveDate", force_past_effective_date),
            )
            .json(subscription)?
            .send_unit(opts)
            .await
    }
}
