// Bounded concurrency scanning of buckets
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// `ScanCoordinator`, the worker pool listing pending buckets.
mod coordinator;

/// Working out which buckets still need scanning.
mod pending;

pub use coordinator::*;
pub use pending::*;
