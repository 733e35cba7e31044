// Bucket and object records
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use serde::{
    Deserialize,
    Serialize,
};

/// Anything that is identified by a bucket name.
pub trait Named {
    /// Returns the bucket name.
    fn name(&self) -> &str;
}

/// A single object descriptor returned by a bucket listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObjectEntry {
    /// The object key.
    pub key: String,

    /// Size of the object in bytes, if the listing reported one.
    pub size: Option<u64>,
}

impl ObjectEntry {
    /// Returns a new `ObjectEntry`.
    pub fn new(key: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            key:  key.into(),
            size: size,
        }
    }
}

/// Aggregate statistics for a bucket whose listing completed.
///
/// This is also the record persisted to the success file so that later runs
/// can skip the bucket.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BucketRecord {
    /// The bucket name.
    pub name: String,

    /// Number of objects listed in the bucket.
    pub item_count: u64,

    /// Sum of the sizes of all listed objects, in bytes.
    pub total_size: u64,
}

impl BucketRecord {
    /// Builds a `BucketRecord` by summarising a bucket listing.
    ///
    /// Objects without a size count towards `item_count` but add nothing to
    /// `total_size`.
    pub fn from_objects(name: impl Into<String>, objects: &[ObjectEntry]) -> Self {
        let total_size = objects
            .iter()
            .filter_map(|o| o.size)
            .sum();

        Self {
            name:       name.into(),
            item_count: objects.len() as u64,
            total_size: total_size,
        }
    }
}

impl Named for BucketRecord {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A bucket whose listing failed, along with the reason.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FailedBucketRecord {
    /// The bucket name.
    pub name: String,

    /// Textual description of the error.
    pub failure: String,
}

impl FailedBucketRecord {
    /// Returns a new `FailedBucketRecord`.
    pub fn new(name: impl Into<String>, failure: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            failure: failure.into(),
        }
    }
}

impl Named for FailedBucketRecord {
    fn name(&self) -> &str {
        &self.name
    }
}
