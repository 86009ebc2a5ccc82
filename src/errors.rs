use thiserror::Error;

/// Reasons a receipt signature could not be evaluated at all.
///
/// A signature that is well-formed but does not match the receipt is not an
/// error; see [`crate::domain::entities::verification_result::VerificationResult`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptSignatureError {
    #[error("failed to decode public key")]
    InvalidKeyEncoding,
    #[error("failed to parse public key")]
    UnsupportedOrMalformedKey,
    #[error("failed to decode signature")]
    InvalidSignatureEncoding,
}

/// Errors surfaced by the Google Play purchase-management client.
#[derive(Debug, Error)]
pub enum PlayStoreError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The service account key is malformed, or Google refused to issue a
    /// token for it.
    #[error("Google Play Developer API credentials invalid: {0}")]
    CredentialError(String),

    #[error("{operation}: callout failed: {message}")]
    Transport { operation: String, message: String },

    /// Error reported by the Google Play Developer API, passed through as is.
    #[error("{operation}: Error {status}: {message}, {reason}")]
    Api {
        operation: String,
        status: u16,
        message: String,
        reason: String,
    },

    #[error("{operation}: invalid response: {message}")]
    InvalidResponse { operation: String, message: String },
}

impl PlayStoreError {
    pub(crate) fn transport(operation: &str, e: impl std::fmt::Display) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            message: e.to_string(),
        }
    }

    pub(crate) fn invalid_response(operation: &str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// HTTP status reported by the API, if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-readable reason code reported by the API (for example
    /// `invalid` or `applicationNotFound`).
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Api { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Whether the failure is worth retrying by the caller (network failures,
    /// rate limiting and 5xx responses). Nothing in this crate retries.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_error_messages() {
        assert_eq!(
            ReceiptSignatureError::InvalidKeyEncoding.to_string(),
            "failed to decode public key"
        );
        assert_eq!(
            ReceiptSignatureError::UnsupportedOrMalformedKey.to_string(),
            "failed to parse public key"
        );
        assert_eq!(
            ReceiptSignatureError::InvalidSignatureEncoding.to_string(),
            "failed to decode signature"
        );
    }

    #[test]
    fn test_api_error_display() {
        let e = PlayStoreError::Api {
            operation: "purchases.subscriptions.cancel".to_string(),
            status: 400,
            message: "Invalid Value".to_string(),
            reason: "invalid".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "purchases.subscriptions.cancel: Error 400: Invalid Value, invalid"
        );
        assert_eq!(e.status(), Some(400));
        assert_eq!(e.reason(), Some("invalid"));
        assert!(!e.is_transient());
    }

    #[test]
    fn test_transient_classification() {
        let api = |status| PlayStoreError::Api {
            operation: "op".to_string(),
            status,
            message: String::new(),
            reason: String::new(),
        };
        assert!(api(503).is_transient());
        assert!(api(429).is_transient());
        assert!(!api(404).is_transient());
        assert!(PlayStoreError::transport("op", "connection reset").is_transient());
        assert!(!PlayStoreError::CredentialError("bad".to_string()).is_transient());
        assert_eq!(PlayStoreError::Config("x".to_string()).status(), None);
    }
}
