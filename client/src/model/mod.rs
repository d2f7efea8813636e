pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use status::{ProcessingStatus, StatusDisplay, UnknownStatusCode};

/// Resource families exposed by the backend under the same list/show/update/delete routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Collections,
    Searches,
}

impl ResourceKind {
    /// URL segment of the resource, e.g. `collections`.
    pub fn segment(self) -> &'static str {
        match self {
            ResourceKind::Collections => "collections",
            ResourceKind::Searches => "searches",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A photo collection uploaded by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    /// Unpacking / indexing progress
    #[serde(default)]
    pub status: ProcessingStatus,
    #[serde(default)]
    pub photo_quantity: i64,
    #[serde(default)]
    pub thumbnail_photo_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A face search run against one or more collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Search {
    pub id: i64,
    pub name: String,
    /// Similarity threshold, in percent
    #[serde(default)]
    pub tolerance_level: i64,
    /// Ids of the collections being searched
    #[serde(default)]
    pub collections: Vec<i64>,
    /// Uploaded photo holding the faces to look for
    #[serde(default)]
    pub photo_id: Option<i64>,
    #[serde(default)]
    pub status: Option<ProcessingStatus>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Identity of the signed-in user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_from_backend_json() {
        let collection: Collection = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Formatura 2024",
                "status": 1,
                "photo_quantity": 320,
                "thumbnail_photo_id": null,
                "user_id": 3,
                "created_at": "2025-03-09T12:47:33.123456+00:00",
                "updated_at": "2025-03-09T12:47:33.123456+00:00"
            }"#,
        )
        .unwrap();

        assert_eq!(collection.id, 7);
        assert_eq!(collection.status, ProcessingStatus::InProgress);
        assert_eq!(collection.photo_quantity, 320);
        assert!(collection.created_at.is_some());
    }

    #[test]
    fn test_search_defaults_missing_fields() {
        let search: Search =
            serde_json::from_str(r#"{"id": 1, "name": "Ana", "tolerance_level": 70}"#).unwrap();
        assert!(search.collections.is_empty());
        assert_eq!(search.status, None);
    }

    #[test]
    fn test_resource_segments() {
        assert_eq!(ResourceKind::Collections.segment(), "collections");
        assert_eq!(ResourceKind::Searches.to_string(), "searches");
    }
}
