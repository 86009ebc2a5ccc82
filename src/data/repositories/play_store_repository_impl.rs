use async_trait::async_trait;

use crate::{
    data::{
        datasources::google_play_developer_api_datasource::GooglePlayDeveloperApiDatasource,
        models::google_play_developer_api::{
            api_request_models::AcknowledgeRequestModel, product_purchase_model as gp,
            subscription_purchase_model as gs, voided_purchase_model as gv,
        },
    },
    domain::{
        entities::{
            product_purchase::{ProductPurchase, PurchaseState, PurchaseType},
            subscription_purchase::{CancelReason, PaymentState, PriceInfo, SubscriptionPurchase},
            voided_purchase::{
                RefundType, VoidedPurchase, VoidedPurchasesPage, VoidedPurchasesQuery,
                VoidedReason, VoidedSource,
            },
        },
        repositories::play_store_repository::PlayStoreRepository,
    },
    errors::PlayStoreError,
};

pub struct PlayStoreRepositoryImpl<D> {
    google_play_developer_api_datasource: D,
}

#[async_trait]
impl<D: GooglePlayDeveloperApiDatasource> PlayStoreRepository for PlayStoreRepositoryImpl<D> {
    async fn acknowledge_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
        developer_payload: Option<&str>,
    ) -> Result<(), PlayStoreError> {
        self.google_play_developer_api_datasource
            .acknowledge_subscription(
                package_name,
                subscription_id,
                purchase_token,
                &AcknowledgeRequestModel { developer_payload },
            )
            .await
    }

    async fn acknowledge_product(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
        developer_payload: Option<&str>,
    ) -> Result<(), PlayStoreError> {
        self.google_play_developer_api_datasource
            .acknowledge_product(
                package_name,
                product_id,
                purchase_token,
                &AcknowledgeRequestModel { developer_payload },
            )
            .await
    }

    async fn verify_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<SubscriptionPurchase, PlayStoreError> {
        let m = self
            .google_play_developer_api_datasource
            .get_subscription_purchase(package_name, subscription_id, purchase_token)
            .await?;
        Ok(SubscriptionPurchase::from_google_subscription_purchase(m))
    }

    async fn verify_product(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<ProductPurchase, PlayStoreError> {
        let m = self
            .google_play_developer_api_datasource
            .get_product_purchase(package_name, product_id, purchase_token)
            .await?;
        Ok(ProductPurchase::from_google_product_purchase(m))
    }

    async fn cancel_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError> {
        self.google_play_developer_api_datasource
            .cancel_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    async fn refund_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError> {
        self.google_play_developer_api_datasource
            .refund_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    async fn revoke_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError> {
        self.google_play_developer_api_datasource
            .revoke_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    async fn get_voided_purchases(
        &self,
        query: &VoidedPurchasesQuery,
    ) -> Result<VoidedPurchasesPage, PlayStoreError> {
        let m = self
            .google_play_developer_api_datasource
            .list_voided_purchases(query)
            .await?;
        Ok(VoidedPurchasesPage::from_google_voided_purchases_list(m))
    }
}

impl<D: GooglePlayDeveloperApiDatasource> PlayStoreRepositoryImpl<D> {
    pub(crate) fn new(google_play_developer_api_datasource: D) -> Self {
        Self {
            google_play_developer_api_datasource,
        }
    }
}

/// Unrecognised codes are dropped rather than failing the whole lookup.
fn region_alpha_3(alpha_2: Option<&str>) -> Option<String> {
    let alpha_2 = alpha_2?;
    match rust_iso3166::from_alpha2(alpha_2) {
        Some(country) => Some(country.alpha3.to_string()),
        None => {
            tracing::debug!(region_code = alpha_2, "unrecognised region code");
            None
        }
    }
}

impl ProductPurchase {
    fn from_google_product_purchase(m: gp::ProductPurchaseModel) -> Self {
        ProductPurchase {
            region_iso3166_alpha_3: region_alpha_3(m.region_code.as_deref()),
            order_id: m.order_id,
            purchase_time: m.purchase_time_millis,
            purchase_state: match m.purchase_state {
                gp::PurchaseState::Purchased => PurchaseState::Purchased,
                gp::PurchaseState::Canceled => PurchaseState::Canceled,
                gp::PurchaseState::Pending => PurchaseState::Pending,
            },
            is_consumed: m.consumption_state == gp::ConsumptionState::Consumed,
            is_acknowledged: m.acknowledgement_state == gp::AcknowledgementState::Acknowledged,
            purchase_type: m.purchase_type.map(PurchaseType::from),
            quantity: m.quantity.map(i64::from).unwrap_or(1),
            refundable_quantity: m.refundable_quantity.map(i64::from),
            developer_payload: m.developer_payload,
            obfuscated_account_id: m.obfuscated_external_account_id,
            obfuscated_profile_id: m.obfuscated_external_profile_id,
        }
    }
}

impl SubscriptionPurchase {
    fn from_google_subscription_purchase(m: gs::SubscriptionPurchaseModel) -> Self {
        SubscriptionPurchase {
            country_iso3166_alpha_3: region_alpha_3(m.country_code.as_deref()),
            price_info: match (m.price_amount_micros, m.price_currency_code) {
                (Some(price_micros), Some(currency_iso_4217)) => Some(PriceInfo {
                    price_micros,
                    currency_iso_4217,
                }),
                _ => None,
            },
            order_id: m.order_id,
            start_time: m.start_time_millis,
            expiry_time: m.expiry_time_millis,
            auto_renewing: m.auto_renewing,
            auto_resume_time: m.auto_resume_time_millis,
            payment_state: m.payment_state.map(|s| match s {
                gs::PaymentState::Pending => PaymentState::Pending,
                gs::PaymentState::Received => PaymentState::Received,
                gs::PaymentState::FreeTrial => PaymentState::FreeTrial,
                gs::PaymentState::PendingDeferredUpgradeDowngrade => {
                    PaymentState::PendingDeferredUpgradeDowngrade
                }
                gs::PaymentState::Unknown(v) => PaymentState::Unknown(v),
            }),
            cancel_reason: m.cancel_reason.map(|r| match r {
                gs::CancelReason::UserCanceled => CancelReason::UserCanceled,
                gs::CancelReason::SystemCanceled => CancelReason::SystemCanceled,
                gs::CancelReason::Replaced => CancelReason::Replaced,
                gs::CancelReason::DeveloperCanceled => CancelReason::DeveloperCanceled,
                gs::CancelReason::Unknown(v) => CancelReason::Unknown(v),
            }),
            user_cancellation_time: m.user_cancellation_time_millis,
            is_acknowledged: m.acknowledgement_state == gp::AcknowledgementState::Acknowledged,
            purchase_type: m.purchase_type.map(PurchaseType::from),
            linked_purchase_token: m.linked_purchase_token,
            developer_payload: m.developer_payload,
            obfuscated_account_id: m.obfuscated_external_account_id,
            obfuscated_profile_id: m.obfuscated_external_profile_id,
        }
    }
}

impl From<gp::PurchaseType> for PurchaseType {
    fn from(t: gp::PurchaseType) -> Self {
        match t {
            gp::PurchaseType::Test => PurchaseType::Test,
            gp::PurchaseType::Promo => PurchaseType::Promo,
            gp::PurchaseType::Rewarded => PurchaseType::Rewarded,
            gp::PurchaseType::Unknown(v) => PurchaseType::Unknown(v),
        }
    }
}

impl VoidedPurchasesPage {
    fn from_google_voided_purchases_list(m: gv::VoidedPurchasesListResponseModel) -> Self {
        VoidedPurchasesPage {
            voided_purchases: m
                .voided_purchases
                .into_iter()
                .map(VoidedPurchase::from_google_voided_purchase)
                .collect(),
            // An empty token also marks the last page.
            next_page_token: m
                .token_pagination
                .and_then(|p| p.next_page_token)
                .filter(|t| !t.is_empty()),
        }
    }
}

impl VoidedPurchase {
    fn from_google_voided_purchase(m: gv::VoidedPurchaseModel) -> Self {
        VoidedPurchase {
            purchase_token: m.purchase_token,
            order_id: m.order_id,
            purchase_time: m.purchase_time_millis,
            voided_time: m.voided_time_millis,
            voided_source: m.voided_source.map(|s| match s {
                gv::VoidedSource::User => VoidedSource::User,
                gv::VoidedSource::Developer => VoidedSource::Developer,
                gv::VoidedSource::Google => VoidedSource::Google,
                gv::VoidedSource::Unknown(v) => VoidedSource::Unknown(v),
            }),
            voided_reason: m.voided_reason.map(|r| match r {
                gv::VoidedReason::Other => VoidedReason::Other,
                gv::VoidedReason::Remorse => VoidedReason::Remorse,
                gv::VoidedReason::NotReceived => VoidedReason::NotReceived,
                gv::VoidedReason::Defective => VoidedReason::Defective,
                gv::VoidedReason::AccidentalPurchase => VoidedReason::AccidentalPurchase,
                gv::VoidedReason::Fraud => VoidedReason::Fraud,
                gv::VoidedReason::FriendlyFraud => VoidedReason::FriendlyFraud,
                gv::VoidedReason::Chargeback => VoidedReason::Chargeback,
                gv::VoidedReason::Unknown(v) => VoidedReason::Unknown(v),
            }),
            refund_type: m.refund_type.map(|t| match t {
                gv::RefundType::FullRefund => RefundType::FullRefund,
                gv::RefundType::QuantityBasedPartialRefund => {
                    RefundType::QuantityBasedPartialRefund
                }
                gv::RefundType::Unknown(v) => RefundType::Unknown(v),
            }),
            voided_quantity: m.voided_quantity.map(i64::from),
        }
    }
}
