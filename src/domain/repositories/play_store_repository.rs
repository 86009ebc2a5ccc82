use async_trait::async_trait;

use crate::{
    domain::entities::{
        product_purchase::ProductPurchase,
        subscription_purchase::SubscriptionPurchase,
        voided_purchase::{VoidedPurchasesPage, VoidedPurchasesQuery},
    },
    errors::PlayStoreError,
};

/// Purchase-management operations backed by the Google Play Developer API.
/// Every method is a single remote call; nothing is retried or cached.
#[async_trait]
pub trait PlayStoreRepository: Send + Sync {
    async fn acknowledge_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
        developer_payload: Option<&str>,
    ) -> Result<(), PlayStoreError>;

    async fn acknowledge_product(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
        developer_payload: Option<&str>,
    ) -> Result<(), PlayStoreError>;

    async fn verify_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<SubscriptionPurchase, PlayStoreError>;

    async fn verify_product(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<ProductPurchase, PlayStoreError>;

    async fn cancel_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError>;

    async fn refund_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError>;

    async fn revoke_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError>;

    async fn get_voided_purchases(
        &self,
        query: &VoidedPurchasesQuery,
    ) -> Result<VoidedPurchasesPage, PlayStoreError>;
}
