// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bucket;
mod client_config;
mod human_size;
mod region;
mod scan_config;
mod size_unit;
mod storage_client;

#[cfg(test)]
pub mod mock_client;

pub use bucket::*;
pub use client_config::*;
pub use human_size::*;
pub use region::*;
pub use scan_config::*;
pub use size_unit::*;
pub use storage_client::*;

// Used by the storage client and the scan coordinator.
pub type BucketNames = Vec<String>;
