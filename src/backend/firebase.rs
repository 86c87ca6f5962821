

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info};
use url::Url;

use super::base::{EraseError, ObjectEraser};
use crate::core::config::PurgeConfig;
use crate::core::error::Result;
use crate::deletion::models::MediaReference;

const FIREBASE_HOST: &str = "firebasestorage.googleapis.com";

const GCS_HOST: &str = "storage.googleapis.com";


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    pub bucket: String,
    pub path: String,
}

impl StorageObject {
    /// Resolves a reference the same way the storage SDK resolves `ref(url)`:
    /// `gs://` URIs, Firebase download URLs, GCS public URLs, or a bare path
    /// inside `default_bucket`.
    pub fn resolve(
        reference: &MediaReference,
        default_bucket: Option<&str>,
    ) -> std::result::Result<Self, EraseError> {
        let raw = reference.as_str().trim();
        let invalid = || EraseError::InvalidReference(raw.to_string());

        let (bucket, path) = if let Some(rest) = raw.strip_prefix("gs://") {
            let (bucket, path) = rest.split_once('/').ok_or_else(invalid)?;
            (bucket.to_string(), path.to_string())
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            let url = Url::parse(raw).map_err(|_| invalid())?;
            let segments: Vec<&str> = url.path_segments().ok_or_else(invalid)?.collect();

            match url.host_str() {
                Some(host) if host == FIREBASE_HOST || segments.starts_with(&["v0", "b"]) => {
                    match segments.as_slice() {
                        ["v0", "b", bucket, "o", rest @ ..] if !rest.is_empty() => {
                            (bucket.to_string(), decode(&rest.join("/"))?)
                        }
                        _ => return Err(invalid()),
                    }
                }
                Some(GCS_HOST) => match segments.split_first() {
                    Some((bucket, rest)) if !rest.is_empty() => {
                        (bucket.to_string(), decode(&rest.join("/"))?)
                    }
                    _ => return Err(invalid()),
                },
                _ => return Err(invalid()),
            }
        } else {
            let bucket = default_bucket.ok_or_else(|| {
                EraseError::InvalidReference(format!("{} (no storage bucket configured)", raw))
            })?;
            (bucket.to_string(), raw.trim_start_matches('/').to_string())
        };

        if bucket.is_empty() || path.is_empty() {
            return Err(invalid());
        }

        Ok(Self { bucket, path })
    }
}

fn decode(segment: &str) -> std::result::Result<String, EraseError> {
    urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .map_err(|e| EraseError::InvalidReference(format!("{}: {}", segment, e)))
}


/// Erases media objects through the Firebase Storage REST endpoint.
pub struct FirebaseStorageEraser {
    base_url: String,
    default_bucket: Option<String>,
    client: Client,
}

impl FirebaseStorageEraser {

    pub fn new(base_url: impl Into<String>, default_bucket: Option<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!(
            "Firebase storage eraser initialized (url={}, bucket={})",
            base_url,
            default_bucket.as_deref().unwrap_or("<from reference>")
        );
        Self {
            base_url,
            default_bucket,
            client,
        }
    }


    pub fn from_config(config: &PurgeConfig) -> Result<Self> {
        Ok(Self::new(
            config.storage_base_url.clone(),
            config.storage_bucket.clone(),
            config.http_client()?,
        ))
    }


    pub fn object_url(&self, object: &StorageObject) -> String {
        format!(
            "{}/v0/b/{}/o/{}",
            self.base_url,
            object.bucket,
            urlencoding::encode(&object.path)
        )
    }
}

#[async_trait]
impl ObjectEraser for FirebaseStorageEraser {
    async fn erase(&self, reference: &MediaReference) -> std::result::Result<(), EraseError> {
        let object = StorageObject::resolve(reference, self.default_bucket.as_deref())?;
        debug!("Deleting gs://{}/{}", object.bucket, object.path);

        let response = self.client.delete(self.object_url(&object)).send().await?;

        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(EraseError::NotFound(object.path)),
            status => Err(EraseError::Status(status.as_u16())),
        }
    }
}
