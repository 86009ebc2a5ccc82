use async_trait::async_trait;
use yup_oauth2::{
    authenticator::DefaultAuthenticator, parse_service_account_key, ServiceAccountAuthenticator,
};

use crate::{
    constants::GOOGLE_PLAY_DEVELOPER_API_SCOPE,
    domain::repositories::access_token_provider::AccessTokenProvider, errors::PlayStoreError,
};

/// Issues Google Play Developer API tokens for a service account. Tokens are
/// cached and refreshed by the underlying authenticator.
pub struct ServiceAccountAccessTokenProvider {
    authenticator: DefaultAuthenticator,
}

#[async_trait]
impl AccessTokenProvider for ServiceAccountAccessTokenProvider {
    async fn access_token(&self) -> Result<String, PlayStoreError> {
        Ok(self
            .authenticator
            .token(&[GOOGLE_PLAY_DEVELOPER_API_SCOPE])
            .await
            .map_err(|e| {
                PlayStoreError::CredentialError(format!(
                    "service account token could not be obtained: {e}"
                ))
            })?
            .token()
            .ok_or_else(|| {
                PlayStoreError::CredentialError("service account token is empty".to_string())
            })?
            .to_string())
    }
}

impl ServiceAccountAccessTokenProvider {
    /// Parses the key and fetches a first token, so that malformed or
    /// revoked credentials fail here rather than on the first API call.
    pub(crate) async fn new(service_account_key: &str) -> Result<Self, PlayStoreError> {
        if service_account_key.trim().is_empty() {
            return Err(PlayStoreError::CredentialError(
                "service account key is empty".to_string(),
            ));
        }
        let key = parse_service_account_key(service_account_key).map_err(|e| {
            PlayStoreError::CredentialError(format!("service account key could not be parsed: {e}"))
        })?;
        tracing::debug!(
            client_email = %key.client_email,
            "building Google Play service account authenticator"
        );
        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| {
                PlayStoreError::CredentialError(format!(
                    "service account authenticator could not be built: {e}"
                ))
            })?;
        let provider = Self { authenticator };
        provider.access_token().await?;
        Ok(provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_key() {
        let err = ServiceAccountAccessTokenProvider::new("").await.err().unwrap();
        assert!(matches!(err, PlayStoreError::CredentialError(_)));
    }

    #[tokio::test]
    async fn test_malformed_key() {
        for key in ["{}", "not json", r#"{"type":"service_account"}"#] {
            let err = ServiceAccountAccessTokenProvider::new(key)
                .await
                .err()
                .unwrap();
            assert!(
                matches!(err, PlayStoreError::CredentialError(_)),
                "unexpected error for {key}: {err}"
            );
        }
    }
}
