pub(crate) const GOOGLE_PLAY_DEVELOPER_API_BASE_URL: &str = "https://androidpublisher.googleapis.com";
pub(crate) const GOOGLE_PLAY_DEVELOPER_API_PATH: &str = "/androidpublisher/v3/applications";
pub(crate) const GOOGLE_PLAY_DEVELOPER_API_SCOPE: &str =
    "https://www.googleapis.com/auth/androidpublisher";

pub(crate) const SERVICE_ACCOUNT_KEY_ENV: &str = "GOOGLE_PLAY_SERVICE_ACCOUNT_KEY";
pub(crate) const API_BASE_URL_ENV: &str = "GOOGLE_PLAY_API_BASE_URL";
