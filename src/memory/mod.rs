//! Memory usage provider
//!
//! Reports physical memory totals and current utilisation through `sysinfo`.
//!
//! ```no_run
//! use usage_sampler::memory::Memory;
//! use usage_sampler::traits::MetricProvider;
//!
//! #[tokio::main]
//! async fn main() -> usage_sampler::Result<()> {
//!     let memory = Memory::new();
//!     let usage = memory.get_usage().await?;
//!     println!("Memory: {:.1}% used", usage.percent);
//!     Ok(())
//! }
//! ```

mod types;

pub use types::*;

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::System;

use crate::error::{Error, Result};
use crate::traits::{MetricProvider, ProviderKind};

/// Bytes in one GiB
pub const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Memory provider
#[derive(Debug, Clone)]
pub struct Memory {
    system: Arc<Mutex<System>>,
}

impl Memory {
    pub fn new() -> Self {
        Self { system: Arc::new(Mutex::new(System::new())) }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricProvider for Memory {
    type Info = MemoryInfo;
    type Usage = MemoryUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Memory
    }

    async fn get_info(&self) -> Result<MemoryInfo> {
        let mut system = self.system.lock();
        system.refresh_memory();
        match system.total_memory() {
            0 => Err(Error::provider_query(ProviderKind::Memory, "total memory reported as zero")),
            total_bytes => Ok(MemoryInfo { total_bytes }),
        }
    }

    async fn get_usage(&self) -> Result<MemoryUsage> {
        let mut system = self.system.lock();
        system.refresh_memory();

        let total = system.total_memory();
        if total == 0 {
            return Err(Error::provider_query(ProviderKind::Memory, "total memory reported as zero"));
        }

        let used = system.used_memory();
        let available = system.available_memory();
        Ok(MemoryUsage { used_bytes: used, available_bytes: available, percent: used as f64 / total as f64 * 100.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_from_bytes() {
        let usage = MemoryUsage::from_bytes(3, 1);
        assert_eq!(usage.percent, 75.0);
        assert_eq!(MemoryUsage::from_bytes(0, 0).percent, 0.0);
    }

    #[test]
    fn test_total_gb_is_rounded() {
        let info = MemoryInfo { total_bytes: 16 * 1024 * 1024 * 1024 + 1 };
        assert_eq!(info.total_gb(), 16.0);
    }
}
