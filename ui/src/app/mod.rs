//! Application context and command execution.

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::router::{NavigationState, RouteTable, default_routes};
use crate::services::SessionService;
use client::auth::AuthStateManager;
use client::http::ApiClient;
use client::validation::Locale;
use std::sync::Arc;

pub mod commands;
pub mod output;

/// Everything a command needs, built once from the configuration.
pub struct App {
    locale: Locale,
    auth: Arc<AuthStateManager>,
    navigation: Arc<NavigationState>,
    api: ApiClient,
    sessions: SessionService,
    routes: RouteTable,
}

impl App {
    /// Restores the persisted session and wires the API client to it.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let store = config.auth().credential_store()?;
        let auth = Arc::new(AuthStateManager::load(store)?);
        Self::with_auth(config, auth)
    }

    /// Same as [`new`](Self::new) with an already built session state.
    pub fn with_auth(config: &AppConfig, auth: Arc<AuthStateManager>) -> AppResult<Self> {
        let navigation = Arc::new(NavigationState::new(config.api().login_path()));
        let api = ApiClient::new(
            &config.api().client_config(),
            auth.clone(),
            navigation.clone(),
        )?;
        let sessions = SessionService::new(api.clone(), config.locale());
        let routes = RouteTable::build(&default_routes());

        Ok(Self {
            locale: config.locale(),
            auth,
            navigation,
            api,
            sessions,
            routes,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn auth(&self) -> &Arc<AuthStateManager> {
        &self.auth
    }

    pub fn navigation(&self) -> &Arc<NavigationState> {
        &self.navigation
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}
