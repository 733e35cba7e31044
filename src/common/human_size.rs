// HumanSize trait and implementations
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::SizeUnit;
use humansize::{
    format_size,
    BINARY,
    DECIMAL,
};
use tracing::debug;

const KIB: u64 = 1024;
const MIB: u64 = KIB * 1024;
const GIB: u64 = MIB * 1024;

/// `HumanSize` trait.
pub trait HumanSize {
    /// Return `self` formatted according to `unit`.
    fn humansize(&self, unit: &SizeUnit) -> String;
}

// Tiered rendering used by the default report. Everything from a GiB upwards
// stays in GB.
fn tiered(size: u64) -> String {
    let size_f = size as f64;

    match size {
        s if s >= GIB => format!("{:.2} GB", size_f / GIB as f64),
        s if s >= MIB => format!("{:.2} MB", size_f / MIB as f64),
        s if s >= KIB => format!("{:.2} KB", size_f / KIB as f64),
        s             => format!("{} bytes", s),
    }
}

/// `HumanSize` trait implementation for `u64`.
impl HumanSize for u64 {
    /// Return `self` as a human friendly size if requested by `unit`.
    fn humansize(&self, unit: &SizeUnit) -> String {
        debug!("humansize: size {}, unit {:?}", self, unit);

        match unit {
            SizeUnit::Binary  => format_size(*self, BINARY),
            SizeUnit::Bytes   => self.to_string(),
            SizeUnit::Decimal => format_size(*self, DECIMAL),
            SizeUnit::Human   => tiered(*self),
        }
    }
}
