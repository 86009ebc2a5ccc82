use chrono::{DateTime, Utc};

use super::product_purchase::PurchaseType;

/// State of a subscription purchase, as recorded by Google Play.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionPurchase {
    /// Order id of the latest recurring order.
    pub order_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub expiry_time: DateTime<Utc>,
    pub auto_renewing: bool,
    pub auto_resume_time: Option<DateTime<Utc>>,
    pub price_info: Option<PriceInfo>,
    /// ISO 3166-1 alpha-3, if Google reported a recognisable country.
    pub country_iso3166_alpha_3: Option<String>,
    /// Not present for canceled or expired subscriptions.
    pub payment_state: Option<PaymentState>,
    pub cancel_reason: Option<CancelReason>,
    pub user_cancellation_time: Option<DateTime<Utc>>,
    pub is_acknowledged: bool,
    pub purchase_type: Option<PurchaseType>,
    pub linked_purchase_token: Option<String>,
    pub developer_payload: Option<String>,
    pub obfuscated_account_id: Option<String>,
    pub obfuscated_profile_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceInfo {
    /// Price excluding tax, in millionths of the currency unit.
    pub price_micros: i64,
    pub currency_iso_4217: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Pending,
    Received,
    FreeTrial,
    PendingDeferredUpgradeDowngrade,
    Unknown(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    UserCanceled,
    SystemCanceled,
    Replaced,
    DeveloperCanceled,
    Unknown(i32),
}

impl SubscriptionPurchase {
    /// Whether the subscription grants access at the given time.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now < self.expiry_time
    }

    pub fn is_sandbox(&self) -> bool {
        self.purchase_type == Some(PurchaseType::Test)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_is_active_at() {
        let s = SubscriptionPurchase {
            order_id: None,
            start_time: Utc.timestamp_millis_opt(1_000).unwrap(),
            expiry_time: Utc.timestamp_millis_opt(2_000).unwrap(),
            auto_renewing: true,
            auto_resume_time: None,
            price_info: None,
            country_iso3166_alpha_3: None,
            payment_state: Some(PaymentState::Received),
            cancel_reason: None,
            user_cancellation_time: None,
            is_acknowledged: true,
            purchase_type: None,
            linked_purchase_token: None,
            developer_payload: None,
            obfuscated_account_id: None,
            obfuscated_profile_id: None,
        };
        assert!(s.is_active_at(Utc.timestamp_millis_opt(1_500).unwrap()));
        assert!(!s.is_active_at(Utc.timestamp_millis_opt(2_000).unwrap()));
        assert!(!s.is_active_at(Utc.timestamp_millis_opt(500).unwrap()));
        assert!(!s.is_sandbox());
    }
}
