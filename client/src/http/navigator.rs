use std::sync::Mutex;

/// Receives navigation requests from the HTTP layer.
///
/// The API client calls [`navigate`](Navigator::navigate) with the login
/// route when the backend rejects the session.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        log::debug!("Ignoring navigation to {path}");
    }
}

/// Navigator that remembers every requested path.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .map(|visited| visited.clone())
            .unwrap_or_default()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(path.to_string());
        }
    }
}
