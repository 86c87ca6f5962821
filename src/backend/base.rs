

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::deletion::models::{ListingId, ListingMediaSet, ListingStatus, MediaReference};


#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend responded with status {0}")]
    Status(u16),

    #[error("Malformed listing payload: {0}")]
    Malformed(String),
}


#[derive(Error, Debug)]
pub enum EraseError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage responded with status {0}")]
    Status(u16),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid media reference: {0}")]
    InvalidReference(String),
}


#[derive(Error, Debug)]
pub enum CommitError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend responded with status {0}")]
    Status(u16),
}


#[async_trait]
pub trait MetadataReader: Send + Sync {

    async fn fetch(&self, id: &ListingId) -> Result<ListingMediaSet, FetchError>;
}


#[async_trait]
pub trait ObjectEraser: Send + Sync {

    async fn erase(&self, reference: &MediaReference) -> Result<(), EraseError>;
}


#[async_trait]
pub trait StatusCommitter: Send + Sync {

    async fn set_status(&self, id: &ListingId, status: ListingStatus) -> Result<(), CommitError>;
}


#[async_trait]
impl MetadataReader for Arc<dyn MetadataReader> {
    async fn fetch(&self, id: &ListingId) -> Result<ListingMediaSet, FetchError> {
        (**self).fetch(id).await
    }
}

#[async_trait]
impl ObjectEraser for Arc<dyn ObjectEraser> {
    async fn erase(&self, reference: &MediaReference) -> Result<(), EraseError> {
        (**self).erase(reference).await
    }
}

#[async_trait]
impl StatusCommitter for Arc<dyn StatusCommitter> {
    async fn set_status(&self, id: &ListingId, status: ListingStatus) -> Result<(), CommitError> {
        (**self).set_status(id, status).await
    }
}
