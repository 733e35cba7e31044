// ClientConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::Region;

/// Storage client configuration.
#[derive(Debug, Default)]
pub struct ClientConfig {
    /// The bucket name that the client should report on.
    ///
    /// If this isn't given, all discovered S3 buckets are considered.
    pub bucket_name: Option<String>,

    /// Custom endpoint URL for S3 compatible storage.
    ///
    /// When set, path style addressing is used.
    pub endpoint: Option<String>,

    /// The region that our AWS client should be created in.
    pub region: Region,
}
