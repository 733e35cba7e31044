// Implement the StorageClient trait for the s3::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    BucketNames,
    ObjectEntry,
    StorageClient,
};
use super::client::Client;
use tracing::debug;

#[async_trait]
impl StorageClient for Client {
    /// Return bucket names discovered in S3.
    ///
    /// This list is filtered by the `bucket` argument provided on the command
    /// line, if any.
    async fn list_buckets(&self) -> Result<BucketNames> {
        debug!("list_buckets: Listing...");

        Client::list_buckets(self).await
    }

    /// Return the objects stored in `bucket`.
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectEntry>> {
        debug!("list_objects: Listing objects in '{}'", bucket);

        let objects = Client::list_objects(self, bucket).await?;

        debug!(
            "list_objects: '{}' returned {} objects",
            bucket,
            objects.len(),
        );

        Ok(objects)
    }
}
