//! Image upload handling for sneaker photos.
//!
//! Uploads arrive base64-encoded in the mutation payload, are validated
//! for type and size before anything touches disk, and are written under
//! the configured media root at a unique, sanitized, dated path, e.g.
//! `sneakers/2025/07/14/air-jordan-1-a1b2c3d4.jpg`.

use std::path::Path;

use base64::Engine as _;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::errors::ServiceError;
use crate::validators::{validate_image_filename, validate_image_size};

/// Image payload attached to a create/update request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImageUpload {
    /// Original file name; only the extension is kept
    pub filename: String,
    /// Base64-encoded file content
    pub content_base64: String,
}

impl ImageUpload {
    /// Validates type and size and returns the decoded bytes.
    ///
    /// Failures surface as field-level errors on `primary_image` so they
    /// merge into the same structured detail as the rest of the input.
    pub fn validate_and_decode(&self) -> Result<Vec<u8>, ServiceError> {
        let mut errors = ValidationErrors::new();

        if let Err(e) = validate_image_filename(&self.filename) {
            errors.add("primary_image", e);
        }

        let bytes = match base64::engine::general_purpose::STANDARD.decode(&self.content_base64) {
            Ok(bytes) => bytes,
            Err(_) => {
                let mut e = validator::ValidationError::new("invalid_image_encoding");
                e.message = Some("Image content must be valid base64".into());
                errors.add("primary_image", e);
                return Err(errors.into());
            }
        };

        if let Err(e) = validate_image_size(bytes.len()) {
            errors.add("primary_image", e);
        }

        if errors.is_empty() {
            Ok(bytes)
        } else {
            Err(errors.into())
        }
    }
}

/// Lowercases a sneaker name into a filesystem-safe slug.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "sneaker".to_string()
    } else {
        slug
    }
}

/// Builds the media-root-relative storage path for an upload.
pub fn image_storage_path(sneaker_name: &str, filename: &str, now: DateTime<Utc>) -> String {
    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let unique_id = &Uuid::new_v4().simple().to_string()[..8];

    format!(
        "sneakers/{:04}/{:02}/{:02}/{}-{}.{}",
        now.year(),
        now.month(),
        now.day(),
        slugify(sneaker_name),
        unique_id,
        extension
    )
}

/// Validates and persists an upload, returning the stored relative path.
pub async fn store_image(
    media_root: &Path,
    sneaker_name: &str,
    upload: &ImageUpload,
) -> Result<String, ServiceError> {
    let bytes = upload.validate_and_decode()?;
    let relative = image_storage_path(sneaker_name, &upload.filename, Utc::now());
    let target = media_root.join(&relative);

    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            error!(path = %target.display(), error = %e, "Failed to create media directory");
            ServiceError::Storage(format!("Failed to store image for sneaker '{}'", sneaker_name))
        })?;
    }

    tokio::fs::write(&target, &bytes).await.map_err(|e| {
        error!(path = %target.display(), error = %e, "Failed to write image file");
        ServiceError::Storage(format!("Failed to store image for sneaker '{}'", sneaker_name))
    })?;

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str, bytes: &[u8]) -> ImageUpload {
        ImageUpload {
            filename: filename.to_string(),
            content_base64: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    #[test]
    fn slugify_sanitizes_names() {
        assert_eq!(slugify("Air Jordan 1"), "air-jordan-1");
        assert_eq!(slugify("  Chuck 70 (Hi) "), "chuck-70-hi");
        assert_eq!(slugify("日本語"), "sneaker");
    }

    #[test]
    fn storage_path_is_dated_and_unique() {
        let now = Utc::now();
        let a = image_storage_path("Air Jordan 1", "photo.JPG", now);
        let b = image_storage_path("Air Jordan 1", "photo.JPG", now);

        let prefix = format!("sneakers/{:04}/{:02}/{:02}/air-jordan-1-", now.year(), now.month(), now.day());
        assert!(a.starts_with(&prefix), "unexpected path: {}", a);
        assert!(a.ends_with(".jpg"));
        assert_ne!(a, b);
    }

    #[test]
    fn decode_accepts_valid_png() {
        assert!(upload("shoe.png", b"fake-png-bytes").validate_and_decode().is_ok());
    }

    #[test]
    fn decode_rejects_bad_type_and_encoding() {
        assert!(upload("shoe.gif", b"bytes").validate_and_decode().is_err());

        let broken = ImageUpload {
            filename: "shoe.png".to_string(),
            content_base64: "not base64!!!".to_string(),
        };
        assert!(broken.validate_and_decode().is_err());
    }

    #[test]
    fn decode_rejects_oversized_payload() {
        let big = vec![0u8; crate::validators::MAX_IMAGE_BYTES + 1];
        assert!(upload("shoe.png", &big).validate_and_decode().is_err());
    }

    #[tokio::test]
    async fn store_writes_under_media_root() {
        let root = std::env::temp_dir().join(format!("kickdex-media-{}", Uuid::new_v4()));
        let path = store_image(&root, "Test Sneaker", &upload("shoe.png", b"png"))
            .await
            .unwrap();

        let stored = tokio::fs::read(root.join(&path)).await.unwrap();
        assert_eq!(stored, b"png");
        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
