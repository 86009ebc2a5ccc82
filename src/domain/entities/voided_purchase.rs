use chrono::{DateTime, Utc};

/// A purchase that was canceled, refunded or charged back.
#[derive(Debug, Clone, PartialEq)]
pub struct VoidedPurchase {
    pub purchase_token: String,
    pub order_id: Option<String>,
    pub purchase_time: DateTime<Utc>,
    pub voided_time: DateTime<Utc>,
    pub voided_source: Option<VoidedSource>,
    pub voided_reason: Option<VoidedReason>,
    pub refund_type: Option<RefundType>,
    /// Zero for full refunds.
    pub voided_quantity: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidedSource {
    User,
    Developer,
    Google,
    Unknown(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidedReason {
    Other,
    Remorse,
    NotReceived,
    Defective,
    AccidentalPurchase,
    Fraud,
    FriendlyFraud,
    Chargeback,
    Unknown(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundType {
    FullRefund,
    QuantityBasedPartialRefund,
    Unknown(i32),
}

/// Which purchases to include in a voided purchases query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoidedPurchaseType {
    /// Only voided in-app product purchases.
    #[default]
    InAppOnly,
    /// Voided in-app and subscription purchases.
    InAppAndSubscriptions,
}

impl VoidedPurchaseType {
    pub(crate) fn as_query_value(&self) -> u8 {
        match self {
            Self::InAppOnly => 0,
            Self::InAppAndSubscriptions => 1,
        }
    }
}

/// Parameters of one purchases.voidedpurchases.list call.
#[derive(Debug, Clone, Default)]
pub struct VoidedPurchasesQuery {
    pub package_name: String,
    /// Defaults to 30 days ago on the server; cannot be older than 30 days.
    pub start_time: Option<DateTime<Utc>>,
    /// Defaults to the current time on the server.
    pub end_time: Option<DateTime<Utc>>,
    /// Server default is 1000.
    pub max_results: Option<u32>,
    pub voided_purchase_type: VoidedPurchaseType,
    pub include_quantity_based_partial_refund: bool,
    /// Continuation token returned with the previous page. Opaque.
    pub page_token: Option<String>,
}

impl VoidedPurchasesQuery {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            ..Default::default()
        }
    }

    /// Same query, continued from the given token.
    pub fn with_page_token(mut self, token: impl Into<String>) -> Self {
        self.page_token = Some(token.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoidedPurchasesPage {
    pub voided_purchases: Vec<VoidedPurchase>,
    /// `None` once the last page has been returned.
    pub next_page_token: Option<String>,
}

impl VoidedPurchasesPage {
    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none()
    }
}
