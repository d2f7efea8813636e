use thiserror::Error;

/// Errors surfaced by [`ApiClient`](super::ApiClient).
///
/// # Error Categories
///
/// ## Client Configuration Errors
/// - [`ClientCreation`] - HTTP client initialization failures
///
/// ## Request Execution Errors
/// - [`Upload`] - a file could not be read or packed into the request
/// - [`RequestFailed`] - transport-level failure (DNS, TLS, connection reset)
/// - [`Timeout`] - the request exceeded the configured timeout
///
/// ## Response Errors
/// - [`Unauthorized`] - the backend answered `401`; the local session has
///   already been cleared and the navigator sent to the login route
/// - [`Status`] - any other non-success status, body preserved
/// - [`InvalidResponse`] - the body could not be decoded
///
/// [`ClientCreation`]: ApiError::ClientCreation
/// [`Upload`]: ApiError::Upload
/// [`RequestFailed`]: ApiError::RequestFailed
/// [`Timeout`]: ApiError::Timeout
/// [`Unauthorized`]: ApiError::Unauthorized
/// [`Status`]: ApiError::Status
/// [`InvalidResponse`]: ApiError::InvalidResponse
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP client creation failed: {reason}")]
    ClientCreation { reason: String },

    #[error("Could not upload {path}: {reason}")]
    Upload { path: String, reason: String },

    #[error("Request failed: {url} - {reason}")]
    RequestFailed { url: String, reason: String },

    #[error("Request timeout: {url}")]
    Timeout { url: String },

    #[error("Not authorized: {url}")]
    Unauthorized { url: String },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },
}

impl ApiError {
    pub fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout {
                url: url.to_string(),
            }
        } else {
            ApiError::RequestFailed {
                url: url.to_string(),
                reason: error.to_string(),
            }
        }
    }

    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// `detail` field of a FastAPI error body, if the body has one.
    pub fn detail(&self) -> Option<String> {
        match self {
            ApiError::Status { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()?
                .get("detail")?
                .as_str()
                .map(str::to_string),
            _ => None,
        }
    }
}
