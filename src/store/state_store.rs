// The failed and success record files kept in a state directory
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::{
    BucketRecord,
    FailedBucketRecord,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use super::RecordFile;
use tracing::{
    debug,
    warn,
};

/// File name for buckets whose listing failed.
pub const FAILED_BUCKETS_FILE: &str = "failed_buckets.json";

/// File name for buckets whose listing succeeded.
pub const SUCCESS_BUCKETS_FILE: &str = "success_buckets.json";

/// Loads and saves the records of previously processed buckets.
///
/// Both operations are best effort. Problems are logged and the run carries
/// on, either with empty sets or without persisting its progress.
#[derive(Debug)]
pub struct StateStore {
    failed:    RecordFile<FailedBucketRecord>,
    succeeded: RecordFile<BucketRecord>,
}

// Loading never aborts a run.
fn load_or_empty<R>(file: &RecordFile<R>) -> Vec<R>
where
    R: DeserializeOwned + Serialize,
{
    match file.load() {
        Ok(records) => records,
        Err(e) => {
            warn!("Failed to read {}, continuing with an empty list: {}",
                file.path().display(),
                e,
            );

            Vec::new()
        },
    }
}

fn save_or_warn<R>(file: &RecordFile<R>, records: &[R]) -> bool
where
    R: DeserializeOwned + Serialize,
{
    match file.save(records) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to write {}: {}", file.path().display(), e);

            false
        },
    }
}

impl StateStore {
    /// Returns a `StateStore` keeping its files in `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();

        debug!("new: StateStore in '{}'", dir.display());

        Self {
            failed:    RecordFile::new(dir.join(FAILED_BUCKETS_FILE)),
            succeeded: RecordFile::new(dir.join(SUCCESS_BUCKETS_FILE)),
        }
    }

    /// Previously failed buckets, or an empty list if they can't be read.
    pub fn load_failed(&self) -> Vec<FailedBucketRecord> {
        load_or_empty(&self.failed)
    }

    /// Previously succeeded buckets, or an empty list if they can't be read.
    pub fn load_succeeded(&self) -> Vec<BucketRecord> {
        load_or_empty(&self.succeeded)
    }

    /// Rewrites both files. Returns `true` if both were written.
    pub fn save(
        &self,
        failed:    &[FailedBucketRecord],
        succeeded: &[BucketRecord],
    ) -> bool {
        let failed_ok    = save_or_warn(&self.failed, failed);
        let succeeded_ok = save_or_warn(&self.succeeded, succeeded);

        failed_ok && succeeded_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_state_store_round_trip() {
        let dir   = tempdir().unwrap();
        let store = StateStore::new(dir.path());

        assert!(store.load_failed().is_empty());
        assert!(store.load_succeeded().is_empty());

        let failed = vec![FailedBucketRecord::new("beta", "access denied")];
        let succeeded = vec![
            BucketRecord {
                name:       "alpha".into(),
                item_count: 3,
                total_size: 600,
            },
        ];

        assert!(store.save(&failed, &succeeded));

        let store = StateStore::new(dir.path());

        assert_eq!(store.load_failed(), failed);
        assert_eq!(store.load_succeeded(), succeeded);
        assert!(dir.path().join(FAILED_BUCKETS_FILE).exists());
        assert!(dir.path().join(SUCCESS_BUCKETS_FILE).exists());
    }

    #[test]
    fn test_state_store_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join(FAILED_BUCKETS_FILE), "[{").unwrap();

        let store = StateStore::new(dir.path());

        assert!(store.load_failed().is_empty());
    }

    #[test]
    fn test_state_store_unwritable_dir() {
        let dir  = tempdir().unwrap();
        let file = dir.path().join("not-a-dir");

        // A plain file where the state directory should be.
        fs::write(&file, "").unwrap();

        let store = StateStore::new(&file);

        assert!(store.load_failed().is_empty());
        assert!(!store.save(&[], &[]));
    }
}
