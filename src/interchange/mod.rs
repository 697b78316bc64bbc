//! Tabular import and export of usage logs
//!
//! Records use the fixed column order `time, cpu, memory, gpu, network_kb`.
//! Importing is all-or-nothing: one unparseable row fails the whole import with
//! [`Error::MalformedRecord`](crate::Error::MalformedRecord).

mod csv_codec;

pub use csv_codec::CsvCodec;

use std::path::Path;

use crate::core::metrics::MetricSample;
use crate::error::Result;

/// Column names in record order
pub const COLUMNS: [&str; 5] = ["time", "cpu", "memory", "gpu", "network_kb"];

/// Encodes and decodes sequences of samples
pub trait InterchangeCodec: Send + Sync {
    fn export(&self, records: &[MetricSample]) -> Result<Vec<u8>>;

    /// Decodes every record, failing on the first malformed row
    fn import(&self, bytes: &[u8]) -> Result<Vec<MetricSample>>;

    fn export_file(&self, path: &Path, records: &[MetricSample]) -> Result<()> {
        let bytes = self.export(records)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    fn import_file(&self, path: &Path) -> Result<Vec<MetricSample>> {
        let bytes = std::fs::read(path)?;
        self.import(&bytes)
    }
}
