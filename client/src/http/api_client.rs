use super::errors::ApiError;
use super::navigator::Navigator;
use crate::auth::AuthStateManager;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_API_PREFIX: &str = "/api";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`ApiClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClientConfig {
    /// Origin serving the web client, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Prefix prepended to every API path
    pub api_prefix: String,
    pub timeout: Duration,
    /// Route the navigator is sent to when the session is rejected
    pub login_path: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl ApiClientConfig {
    /// `base_url` joined with `api_prefix`, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}

/// JSON client for the FaceFinder backend.
///
/// - every request is sent below the `/api` root
/// - the session token, when present, is sent as `Authorization: Bearer <token>`
/// - successful responses are decoded straight into the caller's type
/// - a `401` clears the local session and sends the navigator to the login route
///
/// # Examples
///
/// ```no_run
/// use client::auth::AuthStateManager;
/// use client::http::{ApiClient, ApiClientConfig, NoopNavigator};
/// use client::model::Collection;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), client::http::ApiError> {
/// let auth = Arc::new(AuthStateManager::in_memory());
/// let api = ApiClient::new(&ApiClientConfig::default(), auth, Arc::new(NoopNavigator))?;
/// let collections: Vec<Collection> = api.get("collections/list").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_root: String,
    login_path: String,
    auth: Arc<AuthStateManager>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &ApiClientConfig,
        auth: Arc<AuthStateManager>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::ClientCreation {
                reason: e.to_string(),
            })?;

        Ok(Self {
            http,
            api_root: config.api_root(),
            login_path: config.login_path.clone(),
            auth,
            navigator,
        })
    }

    /// Absolute URL for an API path such as `collections/list`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }

    pub fn auth(&self) -> &Arc<AuthStateManager> {
        &self.auth
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        self.execute(self.http.get(&url), &url).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.execute(self.http.post(&url).json(body), &url).await
    }

    /// Posts a multipart form. The form's own `Content-Type` (with its
    /// boundary) replaces the JSON default.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        self.execute(self.http.post(&url).multipart(form), &url).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        self.execute(self.http.put(&url).json(body), &url).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        self.execute(self.http.delete(&url), &url).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        url: &str,
    ) -> Result<T, ApiError> {
        let request = match self.auth.token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        log::debug!("Sending request to {url}");
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;

        self.handle_response(url, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        url: &str,
        response: Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            log::warn!("Session rejected by {url}; signing out");
            if let Err(e) = self.auth.clear_auth().await {
                log::error!("Failed to clear session after 401: {e}");
            }
            self.navigator.navigate(&self.login_path);
            return Err(ApiError::Unauthorized {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("Request to {url} failed: {status} - {body}");
            return Err(ApiError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(url, e))?;
        // Empty bodies decode as JSON null so `()` and `Option<_>` work.
        let payload: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };

        serde_json::from_slice(payload).map_err(|e| ApiError::InvalidResponse {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_root_joins_prefix() {
        let config = ApiClientConfig {
            base_url: "http://example.com/".to_string(),
            ..ApiClientConfig::default()
        };
        assert_eq!(config.api_root(), "http://example.com/api");

        let config = ApiClientConfig {
            api_prefix: String::new(),
            ..ApiClientConfig::default()
        };
        assert_eq!(config.api_root(), "http://localhost:8080");
    }

    #[test]
    fn test_url_for_path() {
        let api = ApiClient::new(
            &ApiClientConfig::default(),
            Arc::new(AuthStateManager::in_memory()),
            Arc::new(crate::http::NoopNavigator),
        )
        .unwrap();

        assert_eq!(
            api.url("/collections/list"),
            "http://localhost:8080/api/collections/list"
        );
        assert_eq!(
            api.url("searches/show/3"),
            "http://localhost:8080/api/searches/show/3"
        );
    }
}
