use client::http::ApiClientConfig;
use serde::Deserialize;
use std::time::Duration;

/// Backend connection settings (`[api]` section)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ApiSettings {
    base_url: Option<String>,
    api_prefix: Option<String>,
    timeout_secs: Option<u64>,
    login_path: Option<String>,
}

impl ApiSettings {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or("http://localhost:8080")
    }

    pub fn api_prefix(&self) -> &str {
        self.api_prefix.as_deref().unwrap_or("/api")
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs())
    }

    pub fn login_path(&self) -> &str {
        self.login_path.as_deref().unwrap_or("/login")
    }

    pub fn client_config(&self) -> ApiClientConfig {
        ApiClientConfig {
            base_url: self.base_url().to_string(),
            api_prefix: self.api_prefix().to_string(),
            timeout: self.timeout(),
            login_path: self.login_path().to_string(),
        }
    }
}
