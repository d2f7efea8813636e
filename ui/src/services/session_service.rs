use crate::error::{AppError, AppResult};
use crate::forms::{LoginForm, RegisterForm};
use chrono::{DateTime, Utc};
use client::auth::{AuthStateManager, Credentials};
use client::http::ApiClient;
use client::model::UserProfile;
use client::validation::Locale;
use serde::Serialize;
use std::sync::Arc;

/// Snapshot of the local session for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
    pub user: Option<UserProfile>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Sign-in, registration and sign-out on top of the API client.
///
/// Forms are validated locally first; an invalid form never reaches the
/// backend and comes back as [`AppError::InvalidInput`].
pub struct SessionService {
    api: ApiClient,
    locale: Locale,
}

impl SessionService {
    pub fn new(api: ApiClient, locale: Locale) -> Self {
        Self { api, locale }
    }

    fn auth(&self) -> &Arc<AuthStateManager> {
        self.api.auth()
    }

    pub async fn login(&self, form: LoginForm) -> AppResult<Credentials> {
        let report = form.validate(self.locale)?;
        if !report.status {
            return Err(AppError::InvalidInput(report));
        }

        let credentials = self.api.login(&form.into_request()).await?;
        log::info!("Signed in, session valid until {}", credentials.expires_at);
        Ok(credentials)
    }

    pub async fn register(&self, form: RegisterForm) -> AppResult<Credentials> {
        let report = form.validate(self.locale)?;
        if !report.status {
            return Err(AppError::InvalidInput(report));
        }

        let credentials = self.api.register(&form.into_request()).await?;
        log::info!("Account created, session valid until {}", credentials.expires_at);
        Ok(credentials)
    }

    /// Signs out; a session the backend no longer knows still ends locally.
    pub async fn logout(&self) -> AppResult<()> {
        if !self.auth().is_authenticated().await {
            log::info!("No active session to end");
            return Ok(());
        }

        match self.api.logout().await {
            Ok(response) => {
                log::info!("Signed out: {}", response.message);
                Ok(())
            }
            Err(e) if e.is_unauthorized() => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn status(&self) -> SessionStatus {
        let authenticated = self.auth().is_authenticated().await;
        let snapshot = self.auth().snapshot().await;
        SessionStatus {
            authenticated,
            user: snapshot.user,
            expires_at: snapshot.expires_at,
        }
    }
}
