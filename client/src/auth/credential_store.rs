use super::errors::AuthError;
use super::types::AuthSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const APP_DIR: &str = "facefinder";
const CREDENTIAL_FILE: &str = "auth.json";

/// Persistence backend for [`AuthSnapshot`]s.
///
/// Injected into [`AuthStateManager`](super::AuthStateManager) so that the
/// state can be loaded on start and saved on every change, and replaced by
/// [`MemoryCredentialStore`] in tests.
pub trait CredentialStore: Send + Sync {
    /// Returns the persisted snapshot, or `None` when nothing was saved.
    fn load(&self) -> Result<Option<AuthSnapshot>, AuthError>;

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config dir>/facefinder/auth.json`.
    pub fn in_config_dir() -> Result<Self, AuthError> {
        Self::default_path().map(Self::new)
    }

    pub fn default_path() -> Result<PathBuf, AuthError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CREDENTIAL_FILE))
            .ok_or(AuthError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> AuthError {
        AuthError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<AuthSnapshot>, AuthError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let snapshot: AuthSnapshot =
            serde_json::from_str(&contents).map_err(|source| AuthError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let contents = serde_json::to_string_pretty(snapshot).map_err(AuthError::Serialize)?;
        fs::write(&self.path, contents).map_err(|e| self.io_error(e))?;
        log::debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Removed credential file {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<AuthSnapshot>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: AuthSnapshot) -> Self {
        Self {
            slot: Mutex::new(Some(snapshot)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<AuthSnapshot>, AuthError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))
    }

    fn save(&self, snapshot: &AuthSnapshot) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::StoreUnavailable(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}
