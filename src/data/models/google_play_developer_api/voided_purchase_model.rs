#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{formats::Flexible, serde_as, TimestampMilliSeconds};

/// Response of purchases.voidedpurchases.list.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.voidedpurchases/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoidedPurchasesListResponseModel {
    pub(crate) page_info: Option<PageInfo>,
    pub(crate) token_pagination: Option<TokenPagination>,
    #[serde(default)]
    pub(crate) voided_purchases: Vec<VoidedPurchaseModel>,
}

/// Information about the current page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PageInfo {
    pub(crate) total_results: Option<i32>,
    pub(crate) result_per_page: Option<i32>,
    pub(crate) start_index: Option<i32>,
}

/// Pagination information returned by a List operation when token pagination
/// is enabled.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenPagination {
    /// Tokens to pass to a standard list field 'page_token'. Whenever
    /// available, tokens are preferred over manipulating start_index.
    pub(crate) next_page_token: Option<String>,
    pub(crate) previous_page_token: Option<String>,
}

/// A VoidedPurchase resource indicates a purchase that was either
/// canceled/refunded/charged-back.
///
/// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.voidedpurchases#VoidedPurchase
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VoidedPurchaseModel {
    /// This kind represents a voided purchase object in the androidpublisher
    /// service.
    pub(crate) kind: Option<String>,
    /// The token which uniquely identifies a one-time purchase or
    /// subscription.
    pub(crate) purchase_token: String,
    /// The time at which the purchase was made, in milliseconds since the epoch
    /// (Jan 1, 1970).
    #[serde_as(as = "TimestampMilliSeconds<String, Flexible>")]
    pub(crate) purchase_time_millis: DateTime<Utc>,
    /// The time at which the purchase was canceled/refunded/charged-back, in
    /// milliseconds since the epoch (Jan 1, 1970).
    #[serde_as(as = "TimestampMilliSeconds<String, Flexible>")]
    pub(crate) voided_time_millis: DateTime<Utc>,
    /// The order id which uniquely identifies a one-time purchase, subscription
    /// purchase, or subscription renewal.
    pub(crate) order_id: Option<String>,
    /// The initiator of voided purchase.
    pub(crate) voided_source: Option<VoidedSource>,
    /// The reason why the purchase was voided.
    pub(crate) voided_reason: Option<VoidedReason>,
    /// The voided purchase was a full refund or a quantity-based partial
    /// refund.
    pub(crate) refund_type: Option<RefundType>,
    /// The voided quantity as the result of a quantity-based partial refund.
    /// Voided quantity of full refunds is 0.
    pub(crate) voided_quantity: Option<i32>,
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(from = "i32")]
pub(crate) enum VoidedSource {
    User,
    Developer,
    Google,
    Unknown(i32),
}

impl From<i32> for VoidedSource {
    fn from(v: i32) -> Self {
        match v {
            0 => Self::User,
            1 => Self::Developer,
            2 => Self::Google,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(from = "i32")]
pub(crate) enum VoidedReason {
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

impl From<i32> for VoidedReason {
    fn from(v: i32) -> Self {
        match v {
            0 => Self::Other,
            1 => Self::Remorse,
            2 => Self::NotReceived,
            3 => Self::Defective,
            4 => Self::AccidentalPurchase,
            5 => Self::Fraud,
            6 => Self::FriendlyFraud,
            7 => Self::Chargeback,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(from = "i32")]
pub(crate) enum RefundType {
    FullRefund,
    QuantityBasedPartialRefund,
    Unknown(i32),
}

impl From<i32> for RefundType {
    fn from(v: i32) -> Self {
        match v {
            1 => Self::FullRefund,
            2 => Self::QuantityBasedPartialRefund,
            other => Self::Unknown(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_response() {
        let m: VoidedPurchasesListResponseModel = serde_json::from_str(
            r#"{
                "pageInfo": {"totalResults": 2, "resultPerPage": 2, "startIndex": 0},
                "tokenPagination": {"nextPageToken": "next-1"},
                "voidedPurchases": [
                    {
                        "kind": "androidpublisher#voidedPurchase",
                        "purchaseToken": "token-a",
                        "purchaseTimeMillis": "1437564796303",
                        "voidedTimeMillis": "1437664796303",
                        "orderId": "GPA.1",
                        "voidedSource": 2,
                        "voidedReason": 7,
                        "refundType": 1
                    },
                    {
                        "purchaseToken": "token-b",
                        "purchaseTimeMillis": "1437564796303",
                        "voidedTimeMillis": "1437664796303",
                        "voidedReason": 42
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(
            m.token_pagination.unwrap().next_page_token.as_deref(),
            Some("next-1")
        );
        assert_eq!(m.voided_purchases.len(), 2);
        let a = &m.voided_purchases[0];
        assert_eq!(a.voided_source, Some(VoidedSource::Google));
        assert_eq!(a.voided_reason, Some(VoidedReason::Chargeback));
        assert_eq!(a.refund_type, Some(RefundType::FullRefund));
        assert_eq!(
            m.voided_purchases[1].voided_reason,
            Some(VoidedReason::Unknown(42))
        );
    }

    #[test]
    fn test_parse_empty_list_response() {
        let m: VoidedPurchasesListResponseModel = serde_json::from_str("{}").unwrap();
        assert!(m.voided_purchases.is_empty());
        assert!(m.token_pagination.is_none());
    }
}
