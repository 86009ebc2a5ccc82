use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::{
    constants::GOOGLE_PLAY_DEVELOPER_API_PATH,
    data::models::google_play_developer_api::{
        api_request_models::AcknowledgeRequestModel,
        product_purchase_model::ProductPurchaseModel,
        subscription_purchase_model::SubscriptionPurchaseModel,
        voided_purchase_model::VoidedPurchasesListResponseModel,
    },
    domain::{
        entities::voided_purchase::VoidedPurchasesQuery,
        repositories::access_token_provider::AccessTokenProvider,
    },
    errors::PlayStoreError,
};

use super::utils::api_error_from_response;

#[async_trait]
pub(crate) trait GooglePlayDeveloperApiDatasource: Send + Sync {
    /// purchases.subscriptions.acknowledge:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions/acknowledge
    ///
    /// packageName:
    ///   The package name of the application for which this subscription was
    ///   purchased (for example, 'com.some.thing').
    /// subscriptionId:
    ///   The purchased subscription ID (for example, 'monthly001').
    /// token:
    ///   The token provided to the user's device when the subscription was
    ///   purchased.
    async fn acknowledge_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        body: &AcknowledgeRequestModel<'_>,
    ) -> Result<(), PlayStoreError>;

    /// purchases.products.acknowledge:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products/acknowledge
    async fn acknowledge_product(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
        body: &AcknowledgeRequestModel<'_>,
    ) -> Result<(), PlayStoreError>;

    /// purchases.subscriptions.get:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions/get
    async fn get_subscription_purchase(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<SubscriptionPurchaseModel, PlayStoreError>;

    /// purchases.products.get:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products/get
    ///
    /// packageName:
    ///   The package name of the application the inapp product was sold in (for
    ///   example, 'com.some.thing').
    /// productId:
    ///   The inapp product SKU (for example, 'com.some.thing.inapp1').
    /// token:
    ///   The token provided to the user's device when the inapp product was
    ///   purchased.
    async fn get_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<ProductPurchaseModel, PlayStoreError>;

    /// purchases.subscriptions.cancel:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions/cancel
    ///
    /// The user keeps access until the end of the current billing period.
    async fn cancel_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<(), PlayStoreError>;

    /// purchases.subscriptions.refund:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions/refund
    ///
    /// Refunds the current payment; the subscription keeps renewing.
    async fn refund_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<(), PlayStoreError>;

    /// purchases.subscriptions.revoke:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.subscriptions/revoke
    ///
    /// Refunds and immediately terminates access.
    async fn revoke_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<(), PlayStoreError>;

    /// purchases.voidedpurchases.list:
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.voidedpurchases/list
    async fn list_voided_purchases(
        &self,
        query: &VoidedPurchasesQuery,
    ) -> Result<VoidedPurchasesListResponseModel, PlayStoreError>;
}

pub struct GooglePlayDeveloperApiDatasourceImpl {
    client: reqwest::Client,
    base_url: String,
    token_provider: Box<dyn AccessTokenProvider>,
}

#[async_trait]
impl GooglePlayDeveloperApiDatasource for GooglePlayDeveloperApiDatasourceImpl {
    async fn acknowledge_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        body: &AcknowledgeRequestModel<'_>,
    ) -> Result<(), PlayStoreError> {
        let last = format!("{token}:acknowledge");
        let url = self.url(
            package_name,
            &["purchases", "subscriptions", subscription_id, "tokens", last.as_str()],
        )?;
        let request = self.request(Method::POST, url).json(body);
        self.callout_empty(request, "purchases.subscriptions.acknowledge")
            .await
    }

    async fn acknowledge_product(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
        body: &AcknowledgeRequestModel<'_>,
    ) -> Result<(), PlayStoreError> {
        let last = format!("{token}:acknowledge");
        let url = self.url(
            package_name,
            &["purchases", "products", product_id, "tokens", last.as_str()],
        )?;
        let request = self.request(Method::POST, url).json(body);
        self.callout_empty(request, "purchases.products.acknowledge")
            .await
    }

    async fn get_subscription_purchase(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<SubscriptionPurchaseModel, PlayStoreError> {
        let url = self.url(
            package_name,
            &["purchases", "subscriptions", subscription_id, "tokens", token],
        )?;
        self.callout(self.request(Method::GET, url), "purchases.subscriptions.get")
            .await
    }

    async fn get_product_purchase(
        &self,
        package_name: &str,
        product_id: &str,
        token: &str,
    ) -> Result<ProductPurchaseModel, PlayStoreError> {
        let url = self.url(
            package_name,
            &["purchases", "products", product_id, "tokens", token],
        )?;
        self.callout(self.request(Method::GET, url), "purchases.products.get")
            .await
    }

    async fn cancel_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<(), PlayStoreError> {
        self.subscription_action(package_name, subscription_id, token, "cancel")
            .await
    }

    async fn refund_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<(), PlayStoreError> {
        self.subscription_action(package_name, subscription_id, token, "refund")
            .await
    }

    async fn revoke_subscription(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
    ) -> Result<(), PlayStoreError> {
        self.subscription_action(package_name, subscription_id, token, "revoke")
            .await
    }

    async fn list_voided_purchases(
        &self,
        query: &VoidedPurchasesQuery,
    ) -> Result<VoidedPurchasesListResponseModel, PlayStoreError> {
        let url = self.url(&query.package_name, &["purchases", "voidedpurchases"])?;
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(start_time) = query.start_time {
            params.push(("startTime", start_time.timestamp_millis().to_string()));
        }
        if let Some(end_time) = query.end_time {
            params.push(("endTime", end_time.timestamp_millis().to_string()));
        }
        if let Some(max_results) = query.max_results {
            params.push(("maxResults", max_results.to_string()));
        }
        if let Some(token) = query.page_token.as_deref().filter(|t| !t.is_empty()) {
            params.push(("token", token.to_string()));
        }
        params.push((
            "type",
            query.voided_purchase_type.as_query_value().to_string(),
        ));
        if query.include_quantity_based_partial_refund {
            params.push(("includeQuantityBasedPartialRefund", "true".to_string()));
        }
        let request = self.request(Method::GET, url).query(&params);
        self.callout(request, "purchases.voidedpurchases.list")
            .await
    }
}

impl GooglePlayDeveloperApiDatasourceImpl {
    pub(crate) fn new(
        client: reqwest::Client,
        base_url: &str,
        token_provider: Box<dyn AccessTokenProvider>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_provider,
        }
    }

    /// Caller-supplied values are percent-encoded as single path segments, so
    /// a `/`, `?` or `#` in a token cannot change the request target.
    fn url(&self, package_name: &str, segments: &[&str]) -> Result<Url, PlayStoreError> {
        let base = format!("{}{GOOGLE_PLAY_DEVELOPER_API_PATH}", self.base_url);
        let mut url = Url::parse(&base).map_err(|e| {
            PlayStoreError::Config(format!("invalid API base URL '{}': {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                PlayStoreError::Config(format!("API base URL '{}' has no path", self.base_url))
            })?
            .push(package_name)
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url)
    }

    async fn subscription_action(
        &self,
        package_name: &str,
        subscription_id: &str,
        token: &str,
        action: &str,
    ) -> Result<(), PlayStoreError> {
        let last = format!("{token}:{action}");
        let url = self.url(
            package_name,
            &["purchases", "subscriptions", subscription_id, "tokens", last.as_str()],
        )?;
        let request = self
            .request(Method::POST, url)
            .header(reqwest::header::CONTENT_LENGTH, 0);
        self.callout_empty(request, &format!("purchases.subscriptions.{action}"))
            .await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        function_name: &str,
    ) -> Result<reqwest::Response, PlayStoreError> {
        let access_token = self.token_provider.access_token().await?;
        tracing::debug!(function = function_name, "calling Google Play Developer API");
        let response = request
            .header(AUTHORIZATION, format!("Bearer {access_token}"))
            .send()
            .await
            .map_err(|e| PlayStoreError::transport(function_name, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = api_error_from_response(function_name, status.as_u16(), &body);
            tracing::warn!(function = function_name, %error, "Google Play Developer API returned an error");
            return Err(error);
        }
        Ok(response)
    }

    async fn callout<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        function_name: &str,
    ) -> Result<T, PlayStoreError> {
        let body = self
            .send(request, function_name)
            .await?
            .bytes()
            .await
            .map_err(|e| PlayStoreError::transport(function_name, e))?;
        serde_json::from_slice(&body).map_err(|e| {
            PlayStoreError::invalid_response(
                function_name,
                format!("failed to parse callout response: {e}"),
            )
        })
    }

    /// For methods whose success response has an empty body.
    async fn callout_empty(
        &self,
        request: RequestBuilder,
        function_name: &str,
    ) -> Result<(), PlayStoreError> {
        self.send(request, function_name).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::access_token_provider::StaticAccessToken;

    fn datasource(base_url: &str) -> GooglePlayDeveloperApiDatasourceImpl {
        GooglePlayDeveloperApiDatasourceImpl::new(
            reqwest::Client::new(),
            base_url,
            Box::new(StaticAccessToken("token".to_string())),
        )
    }

    #[test]
    fn test_url_joins_segments() {
        let url = datasource("https://androidpublisher.googleapis.com/")
            .url("com.example.app", &["purchases", "products", "coins", "tokens", "abc"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://androidpublisher.googleapis.com/androidpublisher/v3/applications/com.example.app/purchases/products/coins/tokens/abc"
        );
    }

    #[test]
    fn test_url_encodes_reserved_characters() {
        let url = datasource("https://androidpublisher.googleapis.com")
            .url("com.example.app", &["purchases", "products", "a/b", "tokens", "x?y#z:cancel"])
            .unwrap();
        assert_eq!(
            url.path(),
            "/androidpublisher/v3/applications/com.example.app/purchases/products/a%2Fb/tokens/x%3Fy%23z:cancel"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_url_rejects_unparseable_base() {
        let err = datasource("not a url")
            .url("com.example.app", &["purchases", "voidedpurchases"])
            .unwrap_err();
        assert!(matches!(err, PlayStoreError::Config(_)));
    }
}
