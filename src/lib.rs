pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod google_play_developer_api_datasource;
        pub(crate) mod service_account_datasource;
        mod utils;
    }
    pub(crate) mod models {
        pub(crate) mod google_play_developer_api {
            pub(crate) mod api_request_models;
            pub(crate) mod product_purchase_model;
            pub(crate) mod subscription_purchase_model;
            pub(crate) mod voided_purchase_model;
        }
    }
    pub(crate) mod repositories {
        pub(crate) mod play_store_repository_impl;
    }
}

pub mod domain {
    pub mod entities {
        pub mod product_purchase;
        pub mod subscription_purchase;
        pub mod verification_result;
        pub mod voided_purchase;
    }
    pub mod repositories {
        pub mod access_token_provider;
        pub mod play_store_repository;
    }
}

mod constants;

pub mod config;
pub mod errors;
pub mod signature;
pub mod util;

pub use config::PlayStoreConfig;
pub use domain::entities::verification_result::VerificationResult;
pub use domain::repositories::access_token_provider::{AccessTokenProvider, StaticAccessToken};
pub use errors::{PlayStoreError, ReceiptSignatureError};
pub use signature::verify_signature;
pub use util::PlayStoreUtil;
