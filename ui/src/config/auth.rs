use client::auth::{AuthError, CredentialStore, FileCredentialStore, MemoryCredentialStore};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Session persistence settings (`[auth]` section)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthSettings {
    /// Keep the session between runs (default: true)
    persist: Option<bool>,
    /// Where the session is written; defaults to the user config directory
    credentials_file: Option<String>,
}

impl AuthSettings {
    pub fn persist(&self) -> bool {
        self.persist.unwrap_or(true)
    }

    pub fn credentials_file(&self) -> Option<&str> {
        self.credentials_file.as_deref()
    }

    pub fn credentials_path(&self) -> Result<PathBuf, AuthError> {
        match self.credentials_file() {
            Some(path) => Ok(PathBuf::from(path)),
            None => FileCredentialStore::default_path(),
        }
    }

    /// Store matching these settings: file-backed when persisting, in-memory otherwise.
    pub fn credential_store(&self) -> Result<Arc<dyn CredentialStore>, AuthError> {
        if !self.persist() {
            log::debug!("Session persistence disabled");
            return Ok(Arc::new(MemoryCredentialStore::new()));
        }
        let path = self.credentials_path()?;
        log::debug!("Using credential file {}", path.display());
        Ok(Arc::new(FileCredentialStore::new(path)))
    }
}
