use crate::model::UserProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session credentials issued by the backend on login or registration.
///
/// The backend answers `auth/login` and `auth/register` with the session
/// token and its expiry; the user profile is attached when known.
///
/// # Examples
///
/// ```no_run
/// use client::auth::Credentials;
/// use chrono::{Duration, Utc};
///
/// let credentials = Credentials {
///     token: "6f1c0d0e-4b8e-4f3a-9d62-0d7f2f1f8a10".to_string(),
///     expires_at: Utc::now() + Duration::minutes(60),
///     user: None,
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// Opaque bearer token
    pub token: String,
    /// Instant after which the backend rejects the token
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Persisted authentication state.
///
/// An empty snapshot (no token) means "signed out".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

impl AuthSnapshot {
    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }

    /// A token is present and `now` is strictly before its expiry.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        match (&self.token, self.expires_at) {
            (Some(_), Some(expires_at)) => now < expires_at,
            _ => false,
        }
    }
}

impl From<Credentials> for AuthSnapshot {
    fn from(credentials: Credentials) -> Self {
        Self {
            token: Some(credentials.token),
            expires_at: Some(credentials.expires_at),
            user: credentials.user,
        }
    }
}
