// Size sorted report of scanned buckets
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::common::{
    BucketRecord,
    HumanSize,
    SizeUnit,
};
use std::io::{
    self,
    Write,
};
use tracing::debug;

/// Completed bucket records, largest first.
#[derive(Debug)]
pub struct Report {
    records: Vec<BucketRecord>,
}

impl Report {
    /// Returns a `Report` of `records` sorted by total size, descending.
    ///
    /// The sort is stable, buckets of equal size keep the order they were
    /// given in.
    pub fn new(mut records: Vec<BucketRecord>) -> Self {
        records.sort_by(|a, b| b.total_size.cmp(&a.total_size));

        Self {
            records,
        }
    }

    /// The records in report order.
    #[cfg(test)]
    pub fn records(&self) -> &[BucketRecord] {
        &self.records
    }

    /// Renders one record as a report line.
    pub fn line(record: &BucketRecord, unit: &SizeUnit) -> String {
        format!(
            "Size: {}, Item Count: {}, Bucket Name: {}",
            record.total_size.humansize(unit),
            record.item_count,
            record.name,
        )
    }

    /// Writes every line of the report to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W, unit: &SizeUnit) -> io::Result<()> {
        debug!("write_to: Writing {} records", self.records.len());

        for record in &self.records {
            writeln!(writer, "{}", Self::line(record, unit))?;
        }

        Ok(())
    }
}
