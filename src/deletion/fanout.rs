use futures::future::join_all;
use tracing::{debug, info, warn};

use super::models::{DeletionOutcome, MediaReference};
use crate::backend::ObjectEraser;
use crate::utils::strip_query;


/// Erases every reference concurrently and waits for all attempts to settle.
///
/// Each attempt is folded into a `DeletionOutcome` before the join, so a
/// failed erase never cuts the others short. Outcomes keep the input order.
pub async fn erase_all<E>(eraser: &E, references: &[MediaReference]) -> Vec<DeletionOutcome>
where
    E: ObjectEraser + ?Sized,
{
    if references.is_empty() {
        debug!("No media to erase");
        return Vec::new();
    }

    debug!("Erasing {} media objects", references.len());

    let attempts = references
        .iter()
        .map(|reference| erase_one(eraser, reference));

    let outcomes = join_all(attempts).await;

    let failed = outcomes.iter().filter(|o| !o.success).count();
    info!(
        "Media erase complete: {}/{} erased, {} failed",
        outcomes.len() - failed,
        outcomes.len(),
        failed
    );

    outcomes
}

async fn erase_one<E>(eraser: &E, reference: &MediaReference) -> DeletionOutcome
where
    E: ObjectEraser + ?Sized,
{
    match eraser.erase(reference).await {
        Ok(()) => {
            debug!("Erased media {}", strip_query(reference.as_str()));
            DeletionOutcome::erased(reference.clone())
        }
        Err(e) => {
            warn!("Failed to erase media {}: {}", strip_query(reference.as_str()), e);
            DeletionOutcome::failed(reference.clone(), e.to_string())
        }
    }
}
