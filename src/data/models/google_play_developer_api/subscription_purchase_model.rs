#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{formats::Flexible, serde_as, DisplayFromStr, PickFirst, TimestampMilliSeconds};

use super::product_purchase_model::{AcknowledgementState, PurchaseType};

/// Data structure returned by the Google Play Developer API when querying for a
/// subscription purchase.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions#SubscriptionPurchase
///
/// Whether fields are nullable is not documented explicitly in the API
/// reference, so reasonable assumptions are made. The int64 fields are sent as
/// strings.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubscriptionPurchaseModel {
    /// This kind represents a subscriptionPurchase object in the
    /// androidpublisher service.
    pub(crate) kind: Option<String>,
    /// Time at which the subscription was granted, in milliseconds since the
    /// Epoch.
    #[serde_as(as = "TimestampMilliSeconds<String, Flexible>")]
    pub(crate) start_time_millis: DateTime<Utc>,
    /// Time at which the subscription will expire, in milliseconds since the
    /// Epoch.
    #[serde_as(as = "TimestampMilliSeconds<String, Flexible>")]
    pub(crate) expiry_time_millis: DateTime<Utc>,
    /// Time at which the subscription will be automatically resumed, in
    /// milliseconds since the Epoch. Only present if the user has requested to
    /// pause the subscription.
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) auto_resume_time_millis: Option<DateTime<Utc>>,
    /// Whether the subscription will automatically be renewed when it reaches
    /// its current expiry time.
    #[serde(default)]
    pub(crate) auto_renewing: bool,
    /// ISO 4217 currency code for the subscription price.
    pub(crate) price_currency_code: Option<String>,
    /// Price of the subscription, not including tax, in micro-units of the
    /// currency (1,000,000 micro-units represents one unit).
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) price_amount_micros: Option<i64>,
    /// ISO 3166-1 alpha-2 billing country/region code of the user at the time
    /// the subscription was granted.
    pub(crate) country_code: Option<String>,
    /// A developer-specified string that contains supplemental information
    /// about an order.
    pub(crate) developer_payload: Option<String>,
    /// The payment state of the subscription. Not present for canceled,
    /// expired subscriptions.
    pub(crate) payment_state: Option<PaymentState>,
    /// The reason why a subscription was canceled or is not auto-renewing.
    pub(crate) cancel_reason: Option<CancelReason>,
    /// The time at which the subscription was canceled by the user, in
    /// milliseconds since the epoch. Only present if cancelReason is 0.
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) user_cancellation_time_millis: Option<DateTime<Utc>>,
    /// The order id of the latest recurring order associated with the
    /// purchase of the subscription.
    pub(crate) order_id: Option<String>,
    /// The purchase token of the originating purchase if this subscription is
    /// one of the following: re-signup of a canceled but non-lapsed
    /// subscription, or an upgrade/downgrade from a previous subscription.
    pub(crate) linked_purchase_token: Option<String>,
    /// The type of purchase of the subscription. This field is only set if
    /// this purchase was not made using the standard in-app billing flow.
    pub(crate) purchase_type: Option<PurchaseType>,
    /// The acknowledgement state of the subscription product.
    pub(crate) acknowledgement_state: AcknowledgementState,
    /// An obfuscated version of the id that is uniquely associated with the
    /// user's account in your app.
    pub(crate) obfuscated_external_account_id: Option<String>,
    /// An obfuscated version of the id that is uniquely associated with the
    /// user's profile in your app.
    pub(crate) obfuscated_external_profile_id: Option<String>,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(from = "i32")]
pub(crate) enum PaymentState {
    Pending,
    Received,
    FreeTrial,
    PendingDeferredUpgradeDowngrade,
    Unknown(i32),
}

impl From<i32> for PaymentState {
    fn from(v: i32) -> Self {
        match v {
            0 => Self::Pending,
            1 => Self::Received,
            2 => Self::FreeTrial,
            3 => Self::PendingDeferredUpgradeDowngrade,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(from = "i32")]
pub(crate) enum CancelReason {
    /// User canceled the subscription.
    UserCanceled,
    /// Subscription was canceled by the system, for example because of a
    /// billing problem.
    SystemCanceled,
    /// Subscription was replaced with a new subscription.
    Replaced,
    /// Subscription was canceled by the developer.
    DeveloperCanceled,
    Unknown(i32),
}

impl From<i32> for CancelReason {
    fn from(v: i32) -> Self {
        match v {
            0 => Self::UserCanceled,
            1 => Self::SystemCanceled,
            2 => Self::Replaced,
            3 => Self::DeveloperCanceled,
            other => Self::Unknown(other),
        }
    }
}
