

pub mod backend;
pub mod core;
pub mod deletion;
pub mod utils;


pub use backend::{
    CommitError, EraseError, FetchError, FirebaseStorageEraser, MetadataReader, ObjectEraser,
    PropertyApiClient, StatusCommitter,
};
pub use crate::core::config::PurgeConfig;
pub use crate::core::error::{PurgeError, Result};
pub use deletion::{
    DeletionError, DeletionManager, DeletionOutcome, DeletionReport, ListingId, ListingMediaSet,
    ListingStatus, MediaReference,
};
