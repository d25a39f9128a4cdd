//! File storage uploads.
//!
//! A bucket accepts a binary blob under an object path and answers with a
//! publicly resolvable URL for it.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Deserialize;

use crate::BackendClient;
use crate::error::ApiError;
use crate::error::Error;
use crate::error::StorageError;

/// A place files can be uploaded to.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Uploads `bytes` to `path`, replacing any existing object, and returns
    /// the object's public URL.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError>;
}

/// Checks that an object path stays inside its bucket.
pub fn validate_object_path(path: &str) -> Result<(), StorageError> {
    let escapes = path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if path.trim().is_empty() || escapes {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Guesses a content type from a file extension.
pub fn content_type_for(path: &str) -> &'static str {
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "csv" => "text/csv",
        "txt" => "text/plain",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// A storage bucket on the backend.
#[derive(Debug, Clone)]
pub struct Bucket {
    client: BackendClient,
    name: String,
}

impl BackendClient {
    /// Returns a handle to a storage bucket.
    pub fn bucket(&self, name: impl Into<String>) -> Bucket {
        Bucket {
            client: self.clone(),
            name: name.into(),
        }
    }
}

impl Bucket {
    /// Returns the bucket name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the public retrieval URL of an object.
    pub fn public_url(&self, path: &str) -> String {
        self.client
            .storage_url(&format!("object/public/{}/{}", self.name, encode_path(path)))
    }
}

/// Percent-encodes each path segment, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Debug, Deserialize)]
struct StorageErrorBody {
    message: Option<String>,
    error: Option<String>,
}

#[async_trait]
impl ObjectStore for Bucket {
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        validate_object_path(path)?;

        let url = self
            .client
            .storage_url(&format!("object/{}/{}", self.name, encode_path(path)));

        let mut headers = HeaderMap::new();
        headers.insert("x-upsert", HeaderValue::from_static("true"));
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert("Content-Type", value);
        }

        let size = bytes.len();
        let response = self
            .client
            .send(Method::POST, &url, headers, Some(bytes))
            .await
            .map_err(|e| match e {
                Error::Api(ApiError::Network(e)) => StorageError::Network(e),
                other => StorageError::Unreachable(other.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<StorageErrorBody>(&body)
                .ok()
                .and_then(|b| b.message.or(b.error));
            log::warn!("Upload of {} to {} failed: {}", path, self.name, status);
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        log::info!("Uploaded {} ({} bytes) to bucket {}", path, size, self.name);
        Ok(self.public_url(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_object_path() {
        assert!(validate_object_path("decks/acme.pdf").is_ok());
        assert!(validate_object_path("").is_err());
        assert!(validate_object_path("/decks/acme.pdf").is_err());
        assert!(validate_object_path("decks/../secrets").is_err());
        assert!(validate_object_path("decks//acme.pdf").is_err());
    }

    #[test]
    fn test_public_url_encodes_segments() {
        let client = BackendClient::builder()
            .url("https://project.example.co")
            .api_key("key")
            .build()
            .unwrap();
        let bucket = client.bucket("uploads");

        assert_eq!(
            bucket.public_url("decks/Acme Pitch.pdf"),
            "https://project.example.co/storage/v1/object/public/uploads/decks/Acme%20Pitch.pdf"
        );
    }

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("deck.PDF"), "application/pdf");
        assert_eq!(content_type_for("logo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("README"), "application/octet-stream");
    }
}
