

pub mod base;
pub mod firebase;
pub mod property_api;

#[cfg(test)]
pub(crate) mod test_support;

pub use base::{CommitError, EraseError, FetchError, MetadataReader, ObjectEraser, StatusCommitter};
pub use firebase::{FirebaseStorageEraser, StorageObject};
pub use property_api::PropertyApiClient;
