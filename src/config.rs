use serde::Deserialize;

use crate::{
    constants::{API_BASE_URL_ENV, GOOGLE_PLAY_DEVELOPER_API_BASE_URL, SERVICE_ACCOUNT_KEY_ENV},
    errors::PlayStoreError,
};

/// Settings for the Google Play purchase-management client.
#[derive(Clone, Deserialize)]
pub struct PlayStoreConfig {
    /// Service account key JSON, as downloaded from the Google Cloud console.
    /// Only used when the client authenticates with a service account.
    #[serde(default)]
    pub service_account_key: String,
    /// Scheme and host of the Google Play Developer API. Overridable for
    /// testing against a local server.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl std::fmt::Debug for PlayStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayStoreConfig")
            .field("service_account_key", &"..")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn default_api_base_url() -> String {
    GOOGLE_PLAY_DEVELOPER_API_BASE_URL.to_string()
}

impl PlayStoreConfig {
    pub fn new(service_account_key: impl Into<String>) -> Self {
        Self {
            service_account_key: service_account_key.into(),
            api_base_url: default_api_base_url(),
        }
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Reads `GOOGLE_PLAY_SERVICE_ACCOUNT_KEY` (required) and
    /// `GOOGLE_PLAY_API_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, PlayStoreError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PlayStoreError> {
        let key = lookup(SERVICE_ACCOUNT_KEY_ENV)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                PlayStoreError::Config(format!("{SERVICE_ACCOUNT_KEY_ENV} is not set"))
            })?;
        let mut config = Self::new(key);
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url;
        }
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), PlayStoreError> {
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(PlayStoreError::Config(format!(
                "API base URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        Ok(())
    }

    pub(crate) fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}
