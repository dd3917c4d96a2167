//! Upload storage.

use base64::Engine;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::warn;
use uuid::Uuid;

use crate::common::{EngagementError, ServiceDeps};
use crate::domains::messaging::{Flavour, UPLOAD_CREATED_TOPIC};

use super::data::UploadInput;
use super::models::Upload;

const DEFAULT_LANGUAGE: &str = "en";

/// Hex SHA-256 of the raw content bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn resolve_content_type(input: &UploadInput) -> String {
    if let Some(content_type) = &input.content_type {
        return content_type.clone();
    }
    match &input.filename {
        Some(filename) => mime_guess::from_path(filename)
            .first_or_octet_stream()
            .to_string(),
        None => "application/octet-stream".to_string(),
    }
}

/// Store an upload and return the persisted record.
pub async fn upload(input: UploadInput, deps: &ServiceDeps) -> Result<Upload, EngagementError> {
    if input.title.trim().is_empty() {
        return Err(EngagementError::validation("upload title is empty"));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(input.base64data.as_bytes())
        .map_err(|err| {
            EngagementError::validation(format!("invalid base64 content: {}", err))
        })?;
    if bytes.is_empty() {
        return Err(EngagementError::validation("upload content is empty"));
    }

    let id = Uuid::new_v4();
    let hash = content_hash(&bytes);
    let content_type = resolve_content_type(&input);
    let language = input
        .language
        .clone()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let url = format!("/internal/upload/{}", id);

    let stored = Upload::create(
        id,
        &input.title,
        &content_type,
        &language,
        bytes.len() as i64,
        &hash,
        &input.base64data,
        &url,
        &deps.pool,
    )
    .await?;

    let publish = deps
        .publisher
        .notify(
            UPLOAD_CREATED_TOPIC,
            &id.to_string(),
            Flavour::Consumer,
            json!({ "hash": hash, "size": stored.size }),
            Default::default(),
        )
        .await;
    if let Err(err) = publish {
        warn!(error = %err, upload_id = %id, "failed to publish upload.created event");
    }

    Ok(stored)
}

/// Fetch a stored upload by id.
pub async fn find_upload_by_id(
    id: Uuid,
    deps: &ServiceDeps,
) -> Result<Upload, EngagementError> {
    Upload::find_by_id(id, &deps.pool)
        .await?
        .ok_or_else(|| EngagementError::not_found(format!("upload {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_stable_hex_sha256() {
        let hash = content_hash(b"hello world");
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn content_type_prefers_explicit_value() {
        let input = UploadInput {
            title: "scan".to_string(),
            base64data: String::new(),
            filename: Some("scan.png".to_string()),
            content_type: Some("image/webp".to_string()),
            language: None,
        };
        assert_eq!(resolve_content_type(&input), "image/webp");
    }

    #[test]
    fn content_type_is_sniffed_from_filename() {
        let input = UploadInput {
            title: "scan".to_string(),
            base64data: String::new(),
            filename: Some("scan.png".to_string()),
            content_type: None,
            language: None,
        };
        assert_eq!(resolve_content_type(&input), "image/png");
    }

    #[test]
    fn content_type_falls_back_to_octet_stream() {
        let input = UploadInput {
            title: "blob".to_string(),
            base64data: String::new(),
            filename: None,
            content_type: None,
            language: None,
        };
        assert_eq!(resolve_content_type(&input), "application/octet-stream");
    }
}
