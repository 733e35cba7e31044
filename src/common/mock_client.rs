// In-memory StorageClient used by tests
use anyhow::{
    anyhow,
    Result,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::Arc;
use std::time::Duration;
use super::{
    BucketNames,
    ObjectEntry,
    StorageClient,
};

// What listing a given bucket should produce.
enum Listing {
    Objects(Vec<ObjectEntry>),
    Error(String),
    Panic,
}

/// A `StorageClient` serving canned bucket listings.
#[derive(Default)]
pub struct MockClient {
    buckets:      BucketNames,
    listings:     HashMap<String, Listing>,
    delays:       HashMap<String, Duration>,
    fail_buckets: Option<String>,

    /// Number of `list_objects` calls made.
    pub calls: Arc<AtomicUsize>,

    in_flight: AtomicUsize,

    /// Highest number of concurrent `list_objects` calls observed.
    pub max_in_flight: Arc<AtomicUsize>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bucket whose objects have the given sizes.
    pub fn with_bucket(mut self, name: &str, sizes: &[Option<u64>]) -> Self {
        let objects = sizes
            .iter()
            .enumerate()
            .map(|(i, size)| ObjectEntry::new(format!("object-{}", i), *size))
            .collect();

        self.buckets.push(name.into());
        self.listings.insert(name.into(), Listing::Objects(objects));
        self
    }

    /// Adds a bucket whose listing fails with `message`.
    pub fn with_failing_bucket(mut self, name: &str, message: &str) -> Self {
        self.buckets.push(name.into());
        self.listings.insert(name.into(), Listing::Error(message.into()));
        self
    }

    /// Adds a bucket whose listing panics.
    pub fn with_panicking_bucket(mut self, name: &str) -> Self {
        self.buckets.push(name.into());
        self.listings.insert(name.into(), Listing::Panic);
        self
    }

    /// Makes listing `name` take `delay` before answering.
    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.into(), delay);
        self
    }

    /// Makes `list_buckets` itself fail.
    pub fn with_list_buckets_error(mut self, message: &str) -> Self {
        self.fail_buckets = Some(message.into());
        self
    }
}

#[async_trait]
impl StorageClient for MockClient {
    async fn list_buckets(&self) -> Result<BucketNames> {
        match &self.fail_buckets {
            Some(message) => Err(anyhow!("{}", message)),
            None          => Ok(self.buckets.clone()),
        }
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(in_flight, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(bucket) {
            tokio::time::sleep(*delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.listings.get(bucket) {
            Some(Listing::Objects(objects)) => Ok(objects.clone()),
            Some(Listing::Error(message))   => Err(anyhow!("{}", message)),
            Some(Listing::Panic)            => panic!("listing '{}' panicked", bucket),
            None => Err(anyhow!("NoSuchBucket: {}", bucket)),
        }
    }
}
