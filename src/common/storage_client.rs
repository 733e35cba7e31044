// StorageClient trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::{
    BucketNames,
    ObjectEntry,
};

/// `StorageClient` represents the object storage operations needed to tally
/// bucket usage.
///
/// This trait should be implemented by all `Client`s performing these tasks.
#[async_trait]
pub trait StorageClient {
    /// Returns the names of the buckets in the account.
    async fn list_buckets(&self) -> Result<BucketNames>;

    /// Returns the objects, with their sizes, stored in `bucket`.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectEntry>>;
}
