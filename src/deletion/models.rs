use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};
use thiserror::Error;

use crate::backend::{CommitError, FetchError};


#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListingId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}


/// Locator of one stored object: a download URL, a `gs://` URI or a bare
/// object path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaReference(String);

impl MediaReference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaReference {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}


#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingMediaSet {
    pub primary: Option<MediaReference>,
    pub secondary: Vec<MediaReference>,
}

impl ListingMediaSet {
    pub fn new(primary: Option<MediaReference>, secondary: Vec<MediaReference>) -> Self {
        Self { primary, secondary }
    }

    /// Primary reference first, then the secondaries in listing order.
    pub fn references(&self) -> Vec<MediaReference> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        usize::from(self.primary.is_some()) + self.secondary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// Listing status as stored by the property backend. Only `Deleted` is ever
/// written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum ListingStatus {
    #[strum(serialize = "0")]
    Deleted,
    #[strum(serialize = "1")]
    Active,
}

impl ListingStatus {
    pub fn wire_value(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deleted => f.write_str("deleted"),
            Self::Active => f.write_str("active"),
        }
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionOutcome {
    pub reference: MediaReference,
    pub success: bool,
    pub error: Option<String>,
}

impl DeletionOutcome {
    pub fn erased(reference: MediaReference) -> Self {
        Self {
            reference,
            success: true,
            error: None,
        }
    }

    pub fn failed(reference: MediaReference, error: impl Into<String>) -> Self {
        Self {
            reference,
            success: false,
            error: Some(error.into()),
        }
    }
}


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletionReport {
    pub listing_id: ListingId,
    pub outcomes: Vec<DeletionOutcome>,
    pub deleted_at: DateTime<Utc>,
}

impl DeletionReport {
    pub fn erased(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.erased()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DeletionOutcome> {
        self.outcomes.iter().filter(|o| !o.success)
    }

    /// True when every media object was erased.
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }
}


#[derive(Debug, Error)]
pub enum DeletionError {
    #[error("Failed to fetch details for listing {listing_id}: {source}")]
    MetadataFetchFailed {
        listing_id: ListingId,
        #[source]
        source: FetchError,
    },

    #[error(
        "Failed to mark listing {listing_id} as deleted ({erased} media erased, {failed} failed): {source}"
    )]
    StatusCommitFailed {
        listing_id: ListingId,
        erased: usize,
        failed: usize,
        #[source]
        source: CommitError,
    },
}

impl DeletionError {
    pub fn listing_id(&self) -> &ListingId {
        match self {
            Self::MetadataFetchFailed { listing_id, .. } => listing_id,
            Self::StatusCommitFailed { listing_id, .. } => listing_id,
        }
    }

    /// Whether any stored media may already be gone.
    pub fn media_touched(&self) -> bool {
        matches!(self, Self::StatusCommitFailed { erased, .. } if *erased > 0)
    }
}
