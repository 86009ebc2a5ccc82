use crate::{
    data::models::google_play_developer_api::api_request_models::ErrorResponseModel,
    errors::PlayStoreError,
};

/// Builds the error for a non-2xx response, keeping Google's status, message
/// and reason code. Bodies that aren't in Google's error format are kept
/// verbatim as the message.
pub(crate) fn api_error_from_response(
    function_name: &str,
    status: u16,
    body: &str,
) -> PlayStoreError {
    match serde_json::from_str::<ErrorResponseModel>(body) {
        Ok(m) => PlayStoreError::Api {
            operation: function_name.to_string(),
            status: m.error.code.unwrap_or(status),
            reason: m.reason(),
            message: m.error.message,
        },
        Err(_) => PlayStoreError::Api {
            operation: function_name.to_string(),
            status,
            message: body.trim().to_string(),
            reason: String::new(),
        },
    }
}
