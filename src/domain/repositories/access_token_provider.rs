use async_trait::async_trait;

use crate::errors::PlayStoreError;

/// Supplies OAuth2 bearer tokens for the Google Play Developer API.
///
/// Called once per API request; implementations are expected to cache and
/// refresh tokens themselves.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, PlayStoreError>;
}

/// A bearer token obtained elsewhere. Never refreshed.
#[derive(Clone)]
pub struct StaticAccessToken(pub String);

impl std::fmt::Debug for StaticAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticAccessToken(..)")
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessToken {
    async fn access_token(&self) -> Result<String, PlayStoreError> {
        if self.0.is_empty() {
            return Err(PlayStoreError::CredentialError(
                "access token is empty".to_string(),
            ));
        }
        Ok(self.0.clone())
    }
}
