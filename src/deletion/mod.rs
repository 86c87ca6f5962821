pub mod fanout;
pub mod manager;
pub mod models;


pub use fanout::erase_all;
pub use manager::DeletionManager;
pub use models::{
    DeletionError, DeletionOutcome, DeletionReport, ListingId, ListingMediaSet, ListingStatus,
    MediaReference,
};
