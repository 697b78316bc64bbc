use std::sync::atomic::AtomicU64;

use chrono::NaiveDate;
use usage_sampler::core::MetricSample;
use usage_sampler::system::SystemMonitor;

use super::providers::{StubDisk, StubGpu, StubMemory, StubNetwork, StubProcessor};

const GIB: u64 = 1024 * 1024 * 1024;

/// Builds a [`SystemMonitor`] over stub providers
///
/// The stub disk always fails, so every usage query reports the disk as degraded.
pub struct TestMonitorBuilder {
    cpu_name: String,
    cpu_percent: f64,
    total_memory_gb: u64,
    used_memory_gb: u64,
    network_step: u64,
    gpu: Option<(String, f64)>,
    os_name: String,
}

impl TestMonitorBuilder {
    pub fn new() -> Self {
        Self {
            cpu_name: "Stub CPU".into(),
            cpu_percent: 10.0,
            total_memory_gb: 8,
            used_memory_gb: 2,
            network_step: 1024,
            gpu: None,
            os_name: "StubOS 1.0".into(),
        }
    }

    pub fn cpu(mut self, name: &str, percent: f64) -> Self {
        self.cpu_name = name.into();
        self.cpu_percent = percent;
        self
    }

    pub fn memory_gb(mut self, used: u64, total: u64) -> Self {
        self.used_memory_gb = used;
        self.total_memory_gb = total;
        self
    }

    pub fn network_step(mut self, bytes: u64) -> Self {
        self.network_step = bytes;
        self
    }

    pub fn gpu(mut self, name: &str, load_percent: f64) -> Self {
        self.gpu = Some((name.into(), load_percent));
        self
    }

    pub fn build(self) -> SystemMonitor {
        SystemMonitor::from_providers(
            Box::new(StubProcessor { name: self.cpu_name, usage_percent: self.cpu_percent }),
            Box::new(StubMemory { total_bytes: self.total_memory_gb * GIB, used_bytes: self.used_memory_gb * GIB }),
            Box::new(StubDisk),
            Box::new(StubNetwork { step: self.network_step, calls: AtomicU64::new(0) }),
            Box::new(StubGpu { device: self.gpu }),
        )
        .with_os_name(self.os_name)
    }
}

/// `count` records five seconds apart with a rising CPU load
pub fn sample_history(count: u32) -> Vec<MetricSample> {
    let start = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap().and_hms_opt(10, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let timestamp = start + chrono::Duration::seconds(i64::from(i) * 5);
            MetricSample::new(timestamp, f64::from(i), 50.0, 0.0, f64::from(i) * 0.5)
        })
        .collect()
}
