mod constants;
mod types;

pub use constants::*;
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use sysinfo::System;

use crate::error::{Error, Result};
use crate::traits::{MetricProvider, ProviderKind};

/// Processor provider backed by `sysinfo`
///
/// CPU load is a delta measurement: the provider refreshes the counters, waits for the
/// configured sample interval and refreshes them again. That wait happens on tokio's
/// blocking pool so it never stalls the runtime, but it does delay the caller by the
/// interval (500 ms by default).
///
/// ## Example
///
/// ```no_run
/// use std::time::Duration;
/// use usage_sampler::cpu::Processor;
/// use usage_sampler::traits::MetricProvider;
///
/// #[tokio::main]
/// async fn main() -> usage_sampler::Result<()> {
///     let cpu = Processor::new(Duration::from_millis(500));
///     let usage = cpu.get_usage().await?;
///     println!("CPU: {:.1}%", usage.usage_percent);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Processor {
    system: Arc<Mutex<System>>,
    sample_interval: Duration,
}

impl Processor {
    /// Creates a processor provider measuring load over `sample_interval`
    pub fn new(sample_interval: Duration) -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        Self { system: Arc::new(Mutex::new(system)), sample_interval }
    }

    /// The interval the provider blocks for when measuring load
    pub fn sample_interval(&self) -> Duration {
        self.sample_interval
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_SAMPLE_INTERVAL_MS))
    }
}

#[async_trait]
impl MetricProvider for Processor {
    type Info = CpuInfo;
    type Usage = CpuUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Processor
    }

    async fn get_info(&self) -> Result<CpuInfo> {
        let system = self.system.lock();
        let cpus = system.cpus();
        if cpus.is_empty() {
            return Err(Error::provider_query(ProviderKind::Processor, "no processors reported"));
        }

        let name = cpus
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| DEFAULT_CPU_NAME.to_string());

        Ok(CpuInfo {
            name,
            physical_cores: system.physical_core_count(),
            logical_cores: cpus.len(),
            max_frequency_mhz: cpus.iter().map(|cpu| cpu.frequency()).max().filter(|mhz| *mhz > 0),
        })
    }

    async fn get_usage(&self) -> Result<CpuUsage> {
        let system = Arc::clone(&self.system);
        let interval = self.sample_interval;

        tokio::task::spawn_blocking(move || {
            let mut system = system.lock();
            system.refresh_cpu();
            std::thread::sleep(interval);
            system.refresh_cpu();

            let frequency = system.cpus().first().map(|cpu| cpu.frequency());
            CpuUsage::new(f64::from(system.global_cpu_info().cpu_usage()), frequency)
        })
        .await
        .map_err(|e| Error::provider_query(ProviderKind::Processor, format!("load measurement failed: {e}")))
    }
}
