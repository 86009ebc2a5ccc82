use chrono::{DateTime, Utc};

/// State of a one-time product purchase, as recorded by Google Play.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPurchase {
    pub order_id: Option<String>,
    pub purchase_time: DateTime<Utc>,
    pub purchase_state: PurchaseState,
    pub is_consumed: bool,
    pub is_acknowledged: bool,
    /// Only set for purchases made outside the standard billing flow (test
    /// purchases, promo codes, rewarded products).
    pub purchase_type: Option<PurchaseType>,
    pub quantity: i64,
    pub refundable_quantity: Option<i64>,
    pub developer_payload: Option<String>,
    pub obfuscated_account_id: Option<String>,
    pub obfuscated_profile_id: Option<String>,
    /// ISO 3166-1 alpha-3, if Google reported a recognisable region.
    pub region_iso3166_alpha_3: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseState {
    Purchased,
    Canceled,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseType {
    Test,
    Promo,
    Rewarded,
    Unknown(i32),
}

impl ProductPurchase {
    pub fn is_active(&self) -> bool {
        self.purchase_state == PurchaseState::Purchased
    }

    pub fn is_sandbox(&self) -> bool {
        self.purchase_type == Some(PurchaseType::Test)
    }
}
