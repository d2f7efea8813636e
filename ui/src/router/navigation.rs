use client::http::Navigator;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Location {
    current: Option<String>,
    history: Vec<String>,
    login_pending: bool,
}

/// Current location of the client, driven by the HTTP layer.
///
/// When the backend rejects the session the API client navigates to the
/// login route; the pending flag lets the front-end tell the user once.
#[derive(Debug)]
pub struct NavigationState {
    login_path: String,
    location: Mutex<Location>,
}

impl NavigationState {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            location: Mutex::new(Location::default()),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn redirect_to_login(&self) {
        self.navigate(&self.login_path);
    }

    pub fn current(&self) -> Option<String> {
        self.location
            .lock()
            .ok()
            .and_then(|location| location.current.clone())
    }

    pub fn history(&self) -> Vec<String> {
        self.location
            .lock()
            .map(|location| location.history.clone())
            .unwrap_or_default()
    }

    pub fn login_pending(&self) -> bool {
        self.location
            .lock()
            .map(|location| location.login_pending)
            .unwrap_or(false)
    }

    /// Returns whether a login redirect was pending and resets the flag.
    pub fn take_login_redirect(&self) -> bool {
        match self.location.lock() {
            Ok(mut location) => std::mem::take(&mut location.login_pending),
            Err(_) => false,
        }
    }
}

impl Navigator for NavigationState {
    fn navigate(&self, path: &str) {
        log::debug!("Navigating to {path}");
        if let Ok(mut location) = self.location.lock() {
            location.current = Some(path.to_string());
            location.history.push(path.to_string());
            if path == self.login_path {
                location.login_pending = true;
            }
        }
    }
}
