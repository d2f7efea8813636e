use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or persisting authentication state
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Failed to access credential file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential file '{}' is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize credentials: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Credential store is unavailable: {0}")]
    StoreUnavailable(String),

    #[error("No configuration directory available for the credential file")]
    NoConfigDir,
}
