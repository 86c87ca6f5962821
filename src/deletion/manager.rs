use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::fanout::erase_all;
use super::models::{DeletionError, DeletionReport, ListingId, ListingStatus};
use crate::backend::{
    FirebaseStorageEraser, MetadataReader, ObjectEraser, PropertyApiClient, StatusCommitter,
};
use crate::core::config::PurgeConfig;
use crate::core::error::Result;


/// Permanently deletes listings: looks up their media, erases it on a
/// best-effort basis, then marks the listing deleted.
pub struct DeletionManager {
    reader: Arc<dyn MetadataReader>,
    eraser: Arc<dyn ObjectEraser>,
    committer: Arc<dyn StatusCommitter>,
}

impl DeletionManager {
    pub fn new(
        reader: Arc<dyn MetadataReader>,
        eraser: Arc<dyn ObjectEraser>,
        committer: Arc<dyn StatusCommitter>,
    ) -> Self {
        info!("Initializing DeletionManager");
        Self {
            reader,
            eraser,
            committer,
        }
    }


    pub fn from_config(config: &PurgeConfig) -> Result<Self> {
        config.validate()?;
        let api = Arc::new(PropertyApiClient::from_config(config)?);
        let eraser = Arc::new(FirebaseStorageEraser::from_config(config)?);
        Ok(Self::new(api.clone(), eraser, api))
    }

    /// Runs the whole workflow once. Nothing is retried.
    ///
    /// Media that cannot be erased is reported in the returned
    /// `DeletionReport` and does not fail the call. Media is erased before
    /// the status commit, so a `StatusCommitFailed` leaves the listing live
    /// with some of its media possibly gone.
    pub async fn delete_listing(&self, id: &ListingId) -> std::result::Result<DeletionReport, DeletionError> {
        warn!("PERMANENT DELETE requested for listing {}", id);

        let media = match self.reader.fetch(id).await {
            Ok(media) => media,
            Err(e) => {
                error!("Failed to fetch details for listing {}: {}", id, e);
                return Err(DeletionError::MetadataFetchFailed {
                    listing_id: id.clone(),
                    source: e,
                });
            }
        };

        let references = media.references();
        debug!("Listing {} has {} media objects to erase", id, references.len());

        let outcomes = erase_all(self.eraser.as_ref(), &references).await;

        let erased = outcomes.iter().filter(|o| o.success).count();
        let failed = outcomes.len() - erased;

        if let Err(e) = self.committer.set_status(id, ListingStatus::Deleted).await {
            error!(
                "Failed to mark listing {} as deleted after erasing {} of {} media: {}",
                id,
                erased,
                outcomes.len(),
                e
            );
            return Err(DeletionError::StatusCommitFailed {
                listing_id: id.clone(),
                erased,
                failed,
                source: e,
            });
        }

        if failed > 0 {
            warn!(
                "Listing {} deleted with {} orphaned media objects",
                id, failed
            );
        } else {
            info!("Listing {} deleted ({} media erased)", id, erased);
        }

        Ok(DeletionReport {
            listing_id: id.clone(),
            outcomes,
            deleted_at: Utc::now(),
        })
    }
}
