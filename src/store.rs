// Persistence of processed buckets between runs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// `RecordFile`, a JSON array of records on disk.
mod record_file;

/// `StateStore`, the pair of failed and success record files.
mod state_store;

pub use record_file::*;
pub use state_store::*;
