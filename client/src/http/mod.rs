pub mod api_client;
pub mod endpoints;
pub mod errors;
pub mod navigator;

pub use api_client::{ApiClient, ApiClientConfig};
pub use endpoints::{
    CreateCollectionRequest, CreateSearchRequest, LoginRequest, MessageResponse, PhotoUpload,
    RegisterRequest,
};
pub use errors::ApiError;
pub use navigator::{Navigator, NoopNavigator, RecordingNavigator};
