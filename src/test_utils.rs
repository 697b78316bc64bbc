use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::cpu::{CpuInfo, CpuUsage};
use crate::disk::{DiskInfo, DiskUsage};
use crate::error::{Error, Result};
use crate::gpu::{GpuInfo, GpuInventory, GpuReading, GpuUsage};
use crate::memory::{MemoryInfo, MemoryUsage};
use crate::network::{NetworkInfo, NetworkUsage};
use crate::system::SystemMonitor;
use crate::traits::{MetricProvider, ProviderKind};

const GIB: u64 = 1024 * 1024 * 1024;

pub struct FixedProcessor {
    pub usage_percent: f64,
}

#[async_trait]
impl MetricProvider for FixedProcessor {
    type Info = CpuInfo;
    type Usage = CpuUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Processor
    }

    async fn get_info(&self) -> Result<CpuInfo> {
        Ok(CpuInfo { name: "Fake CPU".into(), physical_cores: Some(4), logical_cores: 8, max_frequency_mhz: Some(3600) })
    }

    async fn get_usage(&self) -> Result<CpuUsage> {
        Ok(CpuUsage::new(self.usage_percent, Some(2400)))
    }
}

/// Processor whose usage query takes `delay` to answer
pub struct SlowProcessor {
    pub delay: Duration,
    pub usage_percent: f64,
}

#[async_trait]
impl MetricProvider for SlowProcessor {
    type Info = CpuInfo;
    type Usage = CpuUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Processor
    }

    async fn get_info(&self) -> Result<CpuInfo> {
        Ok(CpuInfo { name: "Slow CPU".into(), physical_cores: Some(1), logical_cores: 1, max_frequency_mhz: None })
    }

    async fn get_usage(&self) -> Result<CpuUsage> {
        tokio::time::sleep(self.delay).await;
        Ok(CpuUsage::new(self.usage_percent, None))
    }
}

pub struct FixedMemory;

#[async_trait]
impl MetricProvider for FixedMemory {
    type Info = MemoryInfo;
    type Usage = MemoryUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Memory
    }

    async fn get_info(&self) -> Result<MemoryInfo> {
        Ok(MemoryInfo { total_bytes: 16 * GIB })
    }

    async fn get_usage(&self) -> Result<MemoryUsage> {
        Ok(MemoryUsage::from_bytes(8 * GIB, 8 * GIB))
    }
}

pub struct FixedDisk;

#[async_trait]
impl MetricProvider for FixedDisk {
    type Info = DiskInfo;
    type Usage = DiskUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Disk
    }

    async fn get_info(&self) -> Result<DiskInfo> {
        Ok(DiskInfo { partitions: vec!["fake0".into()] })
    }

    async fn get_usage(&self) -> Result<DiskUsage> {
        Ok(DiskUsage::new("/", 1000, 500))
    }
}

/// Network counters that grow by `step` bytes each way on every query
pub struct CountingNetwork {
    step: u64,
    calls: AtomicU64,
}

impl CountingNetwork {
    pub fn new(step: u64) -> Self {
        Self { step, calls: AtomicU64::new(0) }
    }
}

#[async_trait]
impl MetricProvider for CountingNetwork {
    type Info = NetworkInfo;
    type Usage = NetworkUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Network
    }

    async fn get_info(&self) -> Result<NetworkInfo> {
        Ok(NetworkInfo { interfaces: vec!["fake0".into()] })
    }

    async fn get_usage(&self) -> Result<NetworkUsage> {
        let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(NetworkUsage::new(calls * self.step, calls * self.step))
    }
}

pub struct FixedGpu {
    inventory: GpuInventory,
    reading: GpuReading,
}

impl FixedGpu {
    pub fn available(name: &str, load_percent: f64) -> Self {
        Self {
            inventory: GpuInventory::Available { devices: vec![GpuInfo { name: name.into(), driver: None }] },
            reading: GpuReading::Available {
                devices: vec![GpuUsage {
                    load_percent,
                    memory_total_mb: Some(8192.0),
                    memory_used_mb: Some(512.0),
                    temperature_c: Some(45.0),
                }],
            },
        }
    }

    pub fn unavailable() -> Self {
        let reason = "no GPU telemetry on this host".to_string();
        Self {
            inventory: GpuInventory::Unavailable { reason: reason.clone() },
            reading: GpuReading::Unavailable { reason },
        }
    }
}

#[async_trait]
impl MetricProvider for FixedGpu {
    type Info = GpuInventory;
    type Usage = GpuReading;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpu
    }

    async fn get_info(&self) -> Result<GpuInventory> {
        Ok(self.inventory.clone())
    }

    async fn get_usage(&self) -> Result<GpuReading> {
        Ok(self.reading.clone())
    }
}

/// A provider whose every query fails
pub struct FailingProvider<I, U> {
    kind: ProviderKind,
    _types: PhantomData<fn() -> (I, U)>,
}

impl<I, U> FailingProvider<I, U> {
    pub fn new(kind: ProviderKind) -> Self {
        Self { kind, _types: PhantomData }
    }
}

#[async_trait]
impl<I, U> MetricProvider for FailingProvider<I, U>
where
    I: Clone + Send + Sync + 'static,
    U: Clone + Default + Send + Sync + 'static,
{
    type Info = I;
    type Usage = U;

    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn get_info(&self) -> Result<I> {
        Err(Error::provider_query(self.kind, "simulated failure"))
    }

    async fn get_usage(&self) -> Result<U> {
        Err(Error::provider_query(self.kind, "simulated failure"))
    }
}

/// Monitor over fixed providers: 25% CPU, 50% memory, no GPU, 1 KiB per query each way
pub fn fake_monitor() -> SystemMonitor {
    SystemMonitor::from_providers(
        Box::new(FixedProcessor { usage_percent: 25.0 }),
        Box::new(FixedMemory),
        Box::new(FixedDisk),
        Box::new(CountingNetwork::new(1024)),
        Box::new(FixedGpu::unavailable()),
    )
}
