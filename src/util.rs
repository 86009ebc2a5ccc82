use crate::{
    config::PlayStoreConfig,
    data::{
        datasources::{
            google_play_developer_api_datasource::GooglePlayDeveloperApiDatasourceImpl,
            service_account_datasource::ServiceAccountAccessTokenProvider,
        },
        repositories::play_store_repository_impl::PlayStoreRepositoryImpl,
    },
    domain::{
        entities::{
            product_purchase::ProductPurchase,
            subscription_purchase::SubscriptionPurchase,
            voided_purchase::{VoidedPurchasesPage, VoidedPurchasesQuery},
        },
        repositories::{
            access_token_provider::AccessTokenProvider, play_store_repository::PlayStoreRepository,
        },
    },
    errors::PlayStoreError,
};

/// Google Play purchase management for a backend service.
///
/// Each method is one call to the Google Play Developer API. Errors reported
/// by Google are returned as [`PlayStoreError::Api`] with their HTTP status and
/// reason code; nothing is retried.
pub struct PlayStoreUtil<
    R: PlayStoreRepository = PlayStoreRepositoryImpl<GooglePlayDeveloperApiDatasourceImpl>,
> {
    play_store_repository: R,
}

impl<R: PlayStoreRepository> PlayStoreUtil<R> {
    /// Wraps any repository implementation, e.g. a test double.
    pub fn from_repository(play_store_repository: R) -> Self {
        Self {
            play_store_repository,
        }
    }

    pub async fn acknowledge_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
        developer_payload: Option<&str>,
    ) -> Result<(), PlayStoreError> {
        self.play_store_repository
            .acknowledge_subscription(package_name, subscription_id, purchase_token, developer_payload)
            .await
    }

    pub async fn acknowledge_product(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
        developer_payload: Option<&str>,
    ) -> Result<(), PlayStoreError> {
        self.play_store_repository
            .acknowledge_product(package_name, product_id, purchase_token, developer_payload)
            .await
    }

    /// Fetches the current state of a subscription purchase.
    pub async fn verify_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<SubscriptionPurchase, PlayStoreError> {
        self.play_store_repository
            .verify_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    /// Fetches the current state of a one-time product purchase.
    pub async fn verify_product(
        &self,
        package_name: &str,
        product_id: &str,
        purchase_token: &str,
    ) -> Result<ProductPurchase, PlayStoreError> {
        self.play_store_repository
            .verify_product(package_name, product_id, purchase_token)
            .await
    }

    /// Stops renewal. The user keeps access until the current period ends.
    pub async fn cancel_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError> {
        self.play_store_repository
            .cancel_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    /// Refunds the current payment without ending the subscription.
    pub async fn refund_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError> {
        self.play_store_repository
            .refund_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    /// Refunds the current payment and ends access immediately.
    pub async fn revoke_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        purchase_token: &str,
    ) -> Result<(), PlayStoreError> {
        self.play_store_repository
            .revoke_subscription(package_name, subscription_id, purchase_token)
            .await
    }

    /// Fetches one page of voided purchases. Pass the returned
    /// `next_page_token` back in the query to continue; `None` means there
    /// are no more pages.
    pub async fn get_voided_purchases(
        &self,
        query: &VoidedPurchasesQuery,
    ) -> Result<VoidedPurchasesPage, PlayStoreError> {
        self.play_store_repository.get_voided_purchases(query).await
    }
}

impl PlayStoreUtil<PlayStoreRepositoryImpl<GooglePlayDeveloperApiDatasourceImpl>> {
    /// Authenticates with the service account key in `config`. Fails with
    /// [`PlayStoreError::CredentialError`] if the key is malformed or Google
    /// refuses to issue a token for it.
    pub async fn new(config: &PlayStoreConfig) -> Result<Self, PlayStoreError> {
        Self::new_with_client(config, reqwest::Client::new()).await
    }

    /// Like [`PlayStoreUtil::new`], but sends API requests through the given
    /// HTTP client (for custom timeouts, proxies, etc).
    pub async fn new_with_client(
        config: &PlayStoreConfig,
        client: reqwest::Client,
    ) -> Result<Self, PlayStoreError> {
        config.validate()?;
        let provider = ServiceAccountAccessTokenProvider::new(&config.service_account_key).await?;
        Ok(Self::with_access_token_provider(config, client, provider))
    }

    /// Uses a caller-supplied token source instead of the service account
    /// key. `config.service_account_key` is ignored.
    pub fn with_access_token_provider(
        config: &PlayStoreConfig,
        client: reqwest::Client,
        provider: impl AccessTokenProvider + 'static,
    ) -> Self {
        let datasource =
            GooglePlayDeveloperApiDatasourceImpl::new(client, config.base_url(), Box::new(provider));
        Self::from_repository(PlayStoreRepositoryImpl::new(datasource))
    }
}
