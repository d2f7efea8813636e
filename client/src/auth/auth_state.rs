use super::credential_store::{CredentialStore, MemoryCredentialStore};
use super::errors::AuthError;
use super::types::{AuthSnapshot, Credentials};
use crate::model::UserProfile;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Centralized authentication state for the client.
///
/// Holds the session token, its expiry and the signed-in user, and writes
/// every change through to an injected [`CredentialStore`] so the session
/// survives restarts.
///
/// # Lifecycle
///
/// - [`load`](Self::load) once at start-up
/// - [`set_auth`](Self::set_auth) after login, [`clear_auth`](Self::clear_auth) on logout
/// - [`is_authenticated`](Self::is_authenticated) before entering protected screens;
///   an expired session is cleared as a side effect
///
/// # Persistence
///
/// The store is written while the state's write guard is held, so the
/// persisted snapshot never disagrees with the in-memory one. Stores are
/// called synchronously from async code and must stay quick; the file store
/// writes one small JSON file.
///
/// # Examples
///
/// ```no_run
/// use client::auth::{AuthStateManager, FileCredentialStore};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), client::auth::AuthError> {
/// let store = Arc::new(FileCredentialStore::in_config_dir()?);
/// let auth = Arc::new(AuthStateManager::load(store)?);
///
/// if !auth.is_authenticated().await {
///     // Send the user to the login screen
/// }
/// # Ok(())
/// # }
/// ```
pub struct AuthStateManager {
    inner: RwLock<AuthSnapshot>,
    store: Arc<dyn CredentialStore>,
}

impl AuthStateManager {
    /// Creates a signed-out manager backed by `store` without reading it.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            inner: RwLock::new(AuthSnapshot::default()),
            store,
        }
    }

    /// Creates a manager initialised from whatever `store` holds.
    pub fn load(store: Arc<dyn CredentialStore>) -> Result<Self, AuthError> {
        let snapshot = store.load()?.unwrap_or_default();
        if !snapshot.is_empty() {
            log::info!("Restored persisted session");
        }
        Ok(Self {
            inner: RwLock::new(snapshot),
            store,
        })
    }

    /// Manager with an in-memory store, for tests and one-off sessions.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Replaces the current session and persists it.
    pub async fn set_auth(&self, credentials: Credentials) -> Result<(), AuthError> {
        let snapshot = AuthSnapshot::from(credentials);
        let mut state = self.inner.write().await;
        self.store.save(&snapshot)?;
        *state = snapshot;
        log::info!("Session stored, expires at {:?}", state.expires_at);
        Ok(())
    }

    /// Signs out: resets the state and removes persisted credentials.
    pub async fn clear_auth(&self) -> Result<(), AuthError> {
        let mut state = self.inner.write().await;
        self.reset(&mut state)
    }

    fn reset(&self, state: &mut AuthSnapshot) -> Result<(), AuthError> {
        *state = AuthSnapshot::default();
        self.store.clear()?;
        log::info!("Session cleared");
        Ok(())
    }

    /// Whether a token exists and has not expired.
    ///
    /// An expired session is cleared; a signed-out state is left untouched.
    pub async fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now()).await
    }

    pub async fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        // Check and clear under one guard so a concurrent login is never wiped
        let mut state = self.inner.write().await;
        if state.is_valid_at(now) {
            return true;
        }
        if state.is_empty() {
            return false;
        }

        log::info!("Session expired at {:?}", state.expires_at);
        if let Err(e) = self.reset(&mut state) {
            log::warn!("Failed to clear expired session: {e}");
        }
        false
    }

    /// The raw token, regardless of expiry.
    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.inner.read().await.expires_at
    }

    pub async fn user(&self) -> Option<UserProfile> {
        self.inner.read().await.user.clone()
    }

    pub async fn snapshot(&self) -> AuthSnapshot {
        self.inner.read().await.clone()
    }
}

impl Default for AuthStateManager {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStore {
        clears: AtomicUsize,
    }

    impl CredentialStore for CountingStore {
        fn load(&self) -> Result<Option<AuthSnapshot>, AuthError> {
            Ok(None)
        }

        fn save(&self, _snapshot: &AuthSnapshot) -> Result<(), AuthError> {
            Ok(())
        }

        fn clear(&self) -> Result<(), AuthError> {
            self.clears.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn credentials(expires_in: Duration) -> Credentials {
        Credentials {
            token: "token-123".to_string(),
            expires_at: Utc::now() + expires_in,
            user: Some(UserProfile {
                id: Some(1),
                username: Some("ana".to_string()),
                email: Some("ana@example.com".to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn test_starts_signed_out() {
        let auth = AuthStateManager::in_memory();
        assert!(!auth.is_authenticated().await);
        assert!(auth.token().await.is_none());
        assert!(auth.user().await.is_none());
    }

    #[tokio::test]
    async fn test_set_auth_then_authenticated() {
        let auth = AuthStateManager::in_memory();
        auth.set_auth(credentials(Duration::minutes(30))).await.unwrap();

        assert!(auth.is_authenticated().await);
        assert_eq!(auth.token().await.as_deref(), Some("token-123"));
        assert_eq!(
            auth.user().await.and_then(|u| u.username).as_deref(),
            Some("ana")
        );
    }

    #[tokio::test]
    async fn test_expired_session_is_cleared() {
        let store = Arc::new(MemoryCredentialStore::new());
        let auth = AuthStateManager::new(store.clone());
        auth.set_auth(credentials(Duration::minutes(30))).await.unwrap();

        let later = Utc::now() + Duration::hours(1);
        assert!(!auth.is_authenticated_at(later).await);
        assert!(auth.token().await.is_none());
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_auth_removes_persisted_state() {
        let store = Arc::new(MemoryCredentialStore::new());
        let auth = AuthStateManager::new(store.clone());
        auth.set_auth(credentials(Duration::minutes(30))).await.unwrap();
        assert!(store.load().unwrap().is_some());

        auth.clear_auth().await.unwrap();
        assert!(store.load().unwrap().is_none());
        assert_eq!(auth.snapshot().await, AuthSnapshot::default());
    }

    #[tokio::test]
    async fn test_login_queued_behind_expiry_check_survives() {
        let store = Arc::new(MemoryCredentialStore::new());
        let auth = Arc::new(AuthStateManager::new(store.clone()));
        auth.set_auth(credentials(Duration::minutes(-5))).await.unwrap();

        // Hold the lock so both tasks queue up: the expiry check first, then the login
        let guard = auth.inner.write().await;
        let check = tokio::spawn({
            let auth = auth.clone();
            async move { auth.is_authenticated().await }
        });
        tokio::task::yield_now().await;
        let login = tokio::spawn({
            let auth = auth.clone();
            async move {
                auth.set_auth(Credentials {
                    token: "fresh-token".to_string(),
                    ..credentials(Duration::hours(1))
                })
                .await
            }
        });
        tokio::task::yield_now().await;
        drop(guard);

        assert!(!check.await.unwrap());
        login.await.unwrap().unwrap();

        assert_eq!(auth.token().await.as_deref(), Some("fresh-token"));
        assert_eq!(
            store.load().unwrap().and_then(|s| s.token).as_deref(),
            Some("fresh-token")
        );
        assert!(auth.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_signed_out_check_leaves_store_alone() {
        let store = Arc::new(CountingStore::default());
        let auth = AuthStateManager::new(store.clone());

        assert!(!auth.is_authenticated().await);
        assert!(!auth.is_authenticated().await);
        assert_eq!(store.clears.load(Ordering::SeqCst), 0);

        auth.set_auth(credentials(Duration::minutes(-1))).await.unwrap();
        assert!(!auth.is_authenticated().await);
        assert_eq!(store.clears.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_restores_persisted_session() {
        let persisted = AuthSnapshot::from(credentials(Duration::minutes(30)));
        let store = Arc::new(MemoryCredentialStore::with_snapshot(persisted.clone()));

        let auth = AuthStateManager::load(store).unwrap();
        assert_eq!(auth.snapshot().await, persisted);
        assert!(auth.is_authenticated().await);
    }
}
