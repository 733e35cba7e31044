// Fans bucket listings out over a fixed pool of workers
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Result,
};
use crate::common::{
    BucketNames,
    BucketRecord,
    FailedBucketRecord,
    StorageClient,
};
use std::sync::Arc;
use std::time::Duration;
use super::pending_buckets;
use tokio::sync::{
    mpsc,
    Mutex,
};
use tokio::task::JoinSet;
use tracing::{
    debug,
    info,
    warn,
};

type Queue = Arc<Mutex<mpsc::Receiver<String>>>;

/// Everything the workers write to. Guarded by a single lock.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Records for buckets scanned during this run, in completion order.
    pub results: Vec<BucketRecord>,

    /// Previously succeeded buckets plus those from this run.
    pub succeeded: Vec<BucketRecord>,

    /// Previously failed buckets plus those from this run.
    pub failed: Vec<FailedBucketRecord>,
}

impl ScanOutcome {
    fn record_success(&mut self, record: BucketRecord) {
        self.succeeded.push(record.clone());
        self.results.push(record);
    }

    fn record_failure(&mut self, record: FailedBucketRecord) {
        self.failed.push(record);
    }
}

/// Lists pending buckets with at most `workers` listings in flight.
pub struct ScanCoordinator<C> {
    client:  Arc<C>,
    state:   Arc<Mutex<ScanOutcome>>,
    timeout: Option<Duration>,
    workers: usize,
}

impl<C> ScanCoordinator<C>
where
    C: StorageClient + Send + Sync + 'static,
{
    /// Returns a new `ScanCoordinator` running `workers` concurrent workers.
    ///
    /// A `workers` of zero is treated as one.
    pub fn new(client: C, workers: usize) -> Self {
        Self {
            client:  Arc::new(client),
            state:   Arc::new(Mutex::new(ScanOutcome::default())),
            timeout: None,
            workers: workers.max(1),
        }
    }

    /// Gives each bucket listing a deadline. Expiry counts as a failure.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Seeds the coordinator with records from earlier runs.
    ///
    /// These buckets are skipped and carried through to the outcome.
    pub fn with_previous(
        self,
        failed:    Vec<FailedBucketRecord>,
        succeeded: Vec<BucketRecord>,
    ) -> Self {
        let state = ScanOutcome {
            results:   Vec::new(),
            succeeded: succeeded,
            failed:    failed,
        };

        Self {
            state: Arc::new(Mutex::new(state)),
            ..self
        }
    }

    /// Scans every bucket in `bucket_names` that wasn't processed before.
    ///
    /// Returns once every worker has drained the queue.
    pub async fn run(self, bucket_names: BucketNames) -> ScanOutcome {
        let pending = {
            let state = self.state.lock().await;

            pending_buckets(&bucket_names, &state.failed, &state.succeeded)
        };

        info!(
            "Scanning {} of {} buckets with {} workers",
            pending.len(),
            bucket_names.len(),
            self.workers,
        );

        let (tx, rx) = mpsc::channel(self.workers);
        let queue: Queue = Arc::new(Mutex::new(rx));

        let mut workers = JoinSet::new();

        for id in 0..self.workers {
            workers.spawn(worker(
                id,
                Arc::clone(&self.client),
                Arc::clone(&queue),
                Arc::clone(&self.state),
                self.timeout,
            ));
        }

        // Workers hold the only receivers, if they all exit the sends below
        // fail rather than wait forever.
        drop(queue);

        for name in pending {
            // Only fails if every worker is gone, nothing left to do then.
            if tx.send(name).await.is_err() {
                warn!("All workers exited before the queue was drained");

                break;
            }
        }

        // Closing the channel lets the workers finish once it's empty.
        drop(tx);

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                warn!("Scan worker stopped unexpectedly: {}", e);
            }
        }

        let mut state = self.state.lock().await;

        std::mem::take(&mut *state)
    }
}

// Lists a single bucket, honouring the deadline if there is one.
async fn scan_bucket<C>(
    client:  &C,
    bucket:  &str,
    timeout: Option<Duration>,
) -> Result<BucketRecord>
where
    C: StorageClient + Send + Sync,
{
    let listing = client.list_objects(bucket);

    let objects = match timeout {
        Some(timeout) => {
            tokio::time::timeout(timeout, listing)
                .await
                .map_err(|_| anyhow!("timed out after {}s", timeout.as_secs()))??
        },
        None => listing.await?,
    };

    Ok(BucketRecord::from_objects(bucket, &objects))
}

async fn worker<C>(
    id:      usize,
    client:  Arc<C>,
    queue:   Queue,
    state:   Arc<Mutex<ScanOutcome>>,
    timeout: Option<Duration>,
)
where
    C: StorageClient + Send + Sync,
{
    debug!("worker {}: Starting", id);

    loop {
        // The queue lock is only held while waiting for the next name.
        let bucket = queue.lock().await.recv().await;

        let Some(bucket) = bucket else {
            break;
        };

        debug!("worker {}: Scanning '{}'", id, bucket);

        let outcome = scan_bucket(client.as_ref(), &bucket, timeout).await;

        // Never held across the listing above.
        let mut state = state.lock().await;

        match outcome {
            Ok(record) => {
                debug!(
                    "worker {}: '{}' has {} objects totalling {} bytes",
                    id,
                    bucket,
                    record.item_count,
                    record.total_size,
                );

                state.record_success(record);
            },
            Err(e) => {
                let failure = format!("{:#}", e);

                warn!("Failed to retrieve objects for bucket '{}': {}",
                    bucket,
                    failure,
                );

                state.record_failure(FailedBucketRecord::new(bucket, failure));
            },
        }
    }

    debug!("worker {}: Queue drained", id);
}
