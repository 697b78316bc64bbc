//! Durable storage boundary
//!
//! The sampler talks to storage only through [`PersistenceGateway`]. Failures are
//! returned to the caller as [`Error::Persistence`](crate::Error::Persistence) and
//! never touch in-memory pipeline state. [`SqliteStore`] is the bundled
//! implementation.

mod sqlite;

pub use sqlite::SqliteStore;

#[cfg(test)]
use mockall::automock;

use crate::core::metrics::MetricSample;
use crate::core::types::{HardwareProfile, Setting};
use crate::error::Result;

/// Storage for usage samples, settings and hardware profiles
#[cfg_attr(test, automock)]
pub trait PersistenceGateway: Send {
    /// Creates the schema if it does not exist yet; safe to call repeatedly
    fn init(&self) -> Result<()>;

    fn insert_usage(&self, sample: &MetricSample) -> Result<()>;

    /// Inserts several samples, keeping their order
    fn insert_usage_batch(&self, samples: &[MetricSample]) -> Result<()> {
        for sample in samples {
            self.insert_usage(sample)?;
        }
        Ok(())
    }

    /// Every stored sample, in insertion order
    fn fetch_all_usage(&self) -> Result<Vec<MetricSample>>;

    /// Inserts a setting or overwrites the value stored under its name
    fn upsert_setting(&self, setting: &Setting) -> Result<()>;

    fn fetch_settings(&self) -> Result<Vec<Setting>>;

    fn insert_hardware(&self, profile: &HardwareProfile) -> Result<()>;

    /// Every recorded profile, in insertion order
    fn fetch_hardware(&self) -> Result<Vec<HardwareProfile>>;

    /// The most recently recorded profile
    fn latest_hardware(&self) -> Result<Option<HardwareProfile>> {
        Ok(self.fetch_hardware()?.pop())
    }
}

#[cfg(test)]
mod tests;
