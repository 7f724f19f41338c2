//! Object storage client for avatars and attachments.
//!
//! Thin wrapper over the managed storage service's REST interface: upload
//! bytes under a generated unique path, resolve the public URL for a path,
//! and delete by path. Every request carries the api key and bearer
//! authorization headers.

use crate::errors::{Error, Result};
use reqwest::Client;
use tracing::{debug, info};
use uuid::Uuid;

/// Client for the remote object storage service.
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

/// Builds a unique object path for an upload: `{user}/{uuid}.{ext}`.
///
/// The extension is taken from the original file name when present so the
/// public URL keeps a recognizable suffix; the uuid guarantees two uploads
/// of the same file never collide.
#[must_use]
pub fn object_path(user_id: &str, original_name: &str) -> String {
    let id = Uuid::new_v4();
    match original_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => {
            format!("{user_id}/{id}.{extension}")
        }
        _ => format!("{user_id}/{id}"),
    }
}

impl StorageClient {
    /// Creates a client for the given service endpoint and bucket.
    #[must_use]
    pub fn new(base_url: String, api_key: String, bucket: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            bucket,
        }
    }

    /// Creates a client from `STORAGE_URL`, `STORAGE_API_KEY`, and
    /// `STORAGE_BUCKET` environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("STORAGE_URL").map_err(|_| Error::Config {
            message: "STORAGE_URL not set".to_string(),
        })?;
        let api_key = std::env::var("STORAGE_API_KEY").map_err(|_| Error::Config {
            message: "STORAGE_API_KEY not set".to_string(),
        })?;
        let bucket = std::env::var("STORAGE_BUCKET").map_err(|_| Error::Config {
            message: "STORAGE_BUCKET not set".to_string(),
        })?;
        Ok(Self::new(base_url, api_key, bucket))
    }

    /// Uploads the given bytes under `path`.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, path);
        let size = bytes.len();

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Storage {
                message: format!("upload of {path} failed: {status} - {text}"),
            });
        }

        info!(path, size, "Uploaded object");
        Ok(())
    }

    /// Public URL for an uploaded object.
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.base_url, self.bucket, path)
    }

    /// Deletes the object at `path`.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}/object/{}/{}", self.base_url, self.bucket, path);

        let resp = self
            .client
            .delete(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(Error::Storage {
                message: format!("delete of {path} failed: {status} - {text}"),
            });
        }

        debug!(path, "Deleted object");
        Ok(())
    }
}
