// ScanConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::SizeUnit;
use std::path::PathBuf;
use std::time::Duration;

/// Number of concurrent workers used when none is requested.
pub const DEFAULT_CONCURRENCY: usize = 7;

/// Configuration for a single scan run.
#[derive(Debug)]
pub struct ScanConfig {
    /// Number of buckets listed concurrently.
    pub concurrency: usize,

    /// Ignore previously persisted records and scan every bucket.
    pub refresh: bool,

    /// Directory holding the failed and success record files.
    pub state_dir: PathBuf,

    /// Deadline for listing a single bucket, if any.
    pub timeout: Option<Duration>,

    /// How sizes are rendered in the report.
    pub unit: SizeUnit,
}

impl Default for ScanConfig {
    /// Returns a default `ScanConfig`.
    ///
    /// ```rust
    /// ScanConfig {
    ///     concurrency: 7,
    ///     refresh:     false,
    ///     state_dir:   PathBuf::from("."),
    ///     timeout:     None,
    ///     unit:        SizeUnit::Human,
    /// }
    /// ```
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            refresh:     false,
            state_dir:   PathBuf::from("."),
            timeout:     None,
            unit:        SizeUnit::Human,
        }
    }
}
