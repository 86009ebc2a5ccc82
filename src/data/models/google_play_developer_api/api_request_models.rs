use serde::{Deserialize, Serialize};

/// Request body of purchases.subscriptions.acknowledge and
/// purchases.products.acknowledge.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AcknowledgeRequestModel<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) developer_payload: Option<&'a str>,
}

/// Error envelope returned by Google APIs on non-2xx responses.
///
/// https://cloud.google.com/apis/design/errors#http_mapping
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponseModel {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub(crate) code: Option<u16>,
    #[serde(default)]
    pub(crate) message: String,
    #[serde(default)]
    pub(crate) errors: Vec<ErrorItem>,
    pub(crate) status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorItem {
    #[serde(default)]
    pub(crate) reason: String,
}

impl ErrorResponseModel {
    /// The first specific reason code, falling back to the canonical status
    /// (e.g. INVALID_ARGUMENT) when no per-error reason is given.
    pub(crate) fn reason(&self) -> String {
        self.error
            .errors
            .iter()
            .map(|e| e.reason.as_str())
            .find(|r| !r.is_empty())
            .map(str::to_string)
            .or_else(|| self.error.status.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledge_body() {
        let body = AcknowledgeRequestModel {
            developer_payload: Some("user001"),
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"developerPayload":"user001"}"#
        );
        let empty = AcknowledgeRequestModel {
            developer_payload: None,
        };
        assert_eq!(serde_json::to_string(&empty).unwrap(), "{}");
    }

    #[test]
    fn test_error_reason() {
        let m: ErrorResponseModel = serde_json::from_str(
            r#"{"error":{"code":404,"message":"No application was found for the given package name.","errors":[{"message":"No application was found for the given package name.","domain":"global","reason":"applicationNotFound","location":"packageName","locationType":"parameter"}]}}"#,
        )
        .unwrap();
        assert_eq!(m.error.code, Some(404));
        assert_eq!(m.reason(), "applicationNotFound");

        let m: ErrorResponseModel = serde_json::from_str(
            r#"{"error":{"code":401,"message":"Request had invalid authentication credentials.","status":"UNAUTHENTICATED"}}"#,
        )
        .unwrap();
        assert_eq!(m.reason(), "UNAUTHENTICATED");
    }
}
