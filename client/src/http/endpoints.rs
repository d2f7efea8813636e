//! Typed calls for the backend routes used by the client.
//!
//! `collections` and `searches` share the same CRUD surface
//! (`list`, `show/{id}`, `create`, `update/{id}`, `delete/{id}`), so the
//! generic calls take a [`ResourceKind`] and the typed helpers pin the record
//! type. Searches are the exception on `create`: the photo to search for is
//! uploaded as multipart form data.

use super::api_client::ApiClient;
use super::errors::ApiError;
use crate::auth::Credentials;
use crate::model::{Collection, ResourceKind, Search, UserProfile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateCollectionRequest {
    pub name: String,
}

/// Parameters of a new face search, sent as JSON in the `params` form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateSearchRequest {
    pub name: String,
    /// Similarity threshold, in percent
    pub tolerance_level: i64,
    pub collections: Vec<i64>,
}

/// A photo held in memory, ready to be sent as a multipart `file` part.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PhotoUpload {
    pub async fn read(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| ApiError::Upload {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("photo")
            .to_string();
        Ok(Self { file_name, bytes })
    }

    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("webp") => "image/webp",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            _ => "application/octet-stream",
        }
    }

    fn into_part(self) -> Result<Part, ApiError> {
        let mime = self.mime_type();
        let file_name = self.file_name.clone();
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(mime)
            .map_err(|e| ApiError::Upload {
                path: file_name,
                reason: e.to_string(),
            })
    }
}

/// `{"message": ...}` acknowledgement returned by `auth/logout`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

impl ApiClient {
    /// Exchanges email and password for a session and stores it.
    ///
    /// The backend only returns the token, so the stored user is filled in
    /// from the request.
    pub async fn login(&self, request: &LoginRequest) -> Result<Credentials, ApiError> {
        let mut credentials: Credentials = self.post("auth/login", request).await?;
        credentials.user.get_or_insert_with(|| UserProfile {
            email: Some(request.email.clone()),
            ..UserProfile::default()
        });
        self.store_session(&credentials).await;
        Ok(credentials)
    }

    /// Creates an account and stores the session the backend opens for it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Credentials, ApiError> {
        let mut credentials: Credentials = self.post("auth/register", request).await?;
        credentials.user.get_or_insert_with(|| UserProfile {
            id: None,
            username: Some(request.username.clone()),
            email: Some(request.email.clone()),
        });
        self.store_session(&credentials).await;
        Ok(credentials)
    }

    /// Ends the session on the backend, then locally.
    ///
    /// The local session is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<MessageResponse, ApiError> {
        let result = self.post("auth/logout", &Value::Null).await;
        if let Err(e) = self.auth().clear_auth().await {
            log::error!("Failed to clear session on logout: {e}");
        }
        result
    }

    pub async fn list<T: DeserializeOwned>(&self, kind: ResourceKind) -> Result<Vec<T>, ApiError> {
        self.get(&format!("{kind}/list")).await
    }

    pub async fn show<T: DeserializeOwned>(&self, kind: ResourceKind, id: i64) -> Result<T, ApiError> {
        self.get(&format!("{kind}/show/{id}")).await
    }

    /// Sends `params` as the body of `{kind}/create` and returns the new record.
    pub async fn create<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        params: &Value,
    ) -> Result<T, ApiError> {
        self.post(&format!("{kind}/create"), params).await
    }

    /// Sends `params` as the update body and returns the stored record.
    pub async fn update<T: DeserializeOwned>(
        &self,
        kind: ResourceKind,
        id: i64,
        params: &Value,
    ) -> Result<T, ApiError> {
        self.put(&format!("{kind}/update/{id}"), params).await
    }

    pub async fn delete_record(&self, kind: ResourceKind, id: i64) -> Result<(), ApiError> {
        let _: Value = self.delete(&format!("{kind}/delete/{id}")).await?;
        log::info!("Deleted {kind} record {id}");
        Ok(())
    }

    pub async fn list_collections(&self) -> Result<Vec<Collection>, ApiError> {
        self.list(ResourceKind::Collections).await
    }

    pub async fn show_collection(&self, id: i64) -> Result<Collection, ApiError> {
        self.show(ResourceKind::Collections, id).await
    }

    /// Creates an empty collection; photos are added to it afterwards.
    pub async fn create_collection(
        &self,
        request: &CreateCollectionRequest,
    ) -> Result<Collection, ApiError> {
        let collection: Collection = self.post("collections/create", request).await?;
        log::info!("Created collection {} ({})", collection.id, collection.name);
        Ok(collection)
    }

    pub async fn list_searches(&self) -> Result<Vec<Search>, ApiError> {
        self.list(ResourceKind::Searches).await
    }

    pub async fn show_search(&self, id: i64) -> Result<Search, ApiError> {
        self.show(ResourceKind::Searches, id).await
    }

    /// Starts a face search for the faces in `photo`.
    ///
    /// The backend answers `400` with a `detail` when the photo has no faces;
    /// that surfaces as [`ApiError::Status`].
    pub async fn create_search(
        &self,
        request: &CreateSearchRequest,
        photo: PhotoUpload,
    ) -> Result<Search, ApiError> {
        let params = serde_json::to_string(request).map_err(|e| ApiError::Upload {
            path: photo.file_name.clone(),
            reason: e.to_string(),
        })?;
        let form = Form::new()
            .part("file", photo.into_part()?)
            .text("params", params);

        let search: Search = self.post_multipart("searches/create", form).await?;
        log::info!("Started search {} ({})", search.id, search.name);
        Ok(search)
    }

    async fn store_session(&self, credentials: &Credentials) {
        if let Err(e) = self.auth().set_auth(credentials.clone()).await {
            log::error!("Failed to persist session: {e}");
        }
    }
}
