//! GraphQL types for the uploads domain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::Upload;

/// Input for creating an upload. Content arrives base64-encoded; the
/// content type is sniffed from the filename when not supplied.
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLInputObject)]
pub struct UploadInput {
    pub title: String,
    pub base64data: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub language: Option<String>,
}

/// A stored upload as exposed over GraphQL.
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct UploadData {
    pub id: Uuid,
    pub title: String,
    pub content_type: String,
    pub language: String,
    pub size: i32,
    pub hash: String,
    pub url: String,
    pub creation_time: DateTime<Utc>,
}

impl From<Upload> for UploadData {
    fn from(upload: Upload) -> Self {
        Self {
            id: upload.id,
            title: upload.title,
            content_type: upload.content_type,
            language: upload.language,
            size: upload.size as i32,
            hash: upload.hash,
            url: upload.url,
            creation_time: upload.creation_time,
        }
    }
}
