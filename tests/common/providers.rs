use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use usage_sampler::cpu::{CpuInfo, CpuUsage};
use usage_sampler::disk::{DiskInfo, DiskUsage};
use usage_sampler::gpu::{GpuInfo, GpuInventory, GpuReading, GpuUsage};
use usage_sampler::memory::{MemoryInfo, MemoryUsage};
use usage_sampler::network::{NetworkInfo, NetworkUsage};
use usage_sampler::traits::{MetricProvider, ProviderKind};
use usage_sampler::{Error, Result};

pub struct StubProcessor {
    pub name: String,
    pub usage_percent: f64,
}

#[async_trait]
impl MetricProvider for StubProcessor {
    type Info = CpuInfo;
    type Usage = CpuUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Processor
    }

    async fn get_info(&self) -> Result<CpuInfo> {
        Ok(CpuInfo { name: self.name.clone(), physical_cores: Some(2), logical_cores: 4, max_frequency_mhz: None })
    }

    async fn get_usage(&self) -> Result<CpuUsage> {
        Ok(CpuUsage::new(self.usage_percent, None))
    }
}

pub struct StubMemory {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

#[async_trait]
impl MetricProvider for StubMemory {
    type Info = MemoryInfo;
    type Usage = MemoryUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Memory
    }

    async fn get_info(&self) -> Result<MemoryInfo> {
        Ok(MemoryInfo { total_bytes: self.total_bytes })
    }

    async fn get_usage(&self) -> Result<MemoryUsage> {
        Ok(MemoryUsage::from_bytes(self.used_bytes, self.total_bytes - self.used_bytes))
    }
}

pub struct StubDisk;

#[async_trait]
impl MetricProvider for StubDisk {
    type Info = DiskInfo;
    type Usage = DiskUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Disk
    }

    async fn get_info(&self) -> Result<DiskInfo> {
        Ok(DiskInfo::default())
    }

    async fn get_usage(&self) -> Result<DiskUsage> {
        Err(Error::ProviderQuery { provider: ProviderKind::Disk, message: "stub disk has no filesystem".into() })
    }
}

/// Counters growing by `step` bytes each way per query
pub struct StubNetwork {
    pub step: u64,
    pub calls: AtomicU64,
}

#[async_trait]
impl MetricProvider for StubNetwork {
    type Info = NetworkInfo;
    type Usage = NetworkUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Network
    }

    async fn get_info(&self) -> Result<NetworkInfo> {
        Ok(NetworkInfo { interfaces: vec!["stub0".into()] })
    }

    async fn get_usage(&self) -> Result<NetworkUsage> {
        let calls = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(NetworkUsage::new(calls * self.step, calls * self.step))
    }
}

pub struct StubGpu {
    pub device: Option<(String, f64)>,
}

#[async_trait]
impl MetricProvider for StubGpu {
    type Info = GpuInventory;
    type Usage = GpuReading;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpu
    }

    async fn get_info(&self) -> Result<GpuInventory> {
        Ok(match &self.device {
            Some((name, _)) => GpuInventory::Available { devices: vec![GpuInfo { name: name.clone(), driver: None }] },
            None => GpuInventory::Unavailable { reason: "stub host has no GPU".into() },
        })
    }

    async fn get_usage(&self) -> Result<GpuReading> {
        Ok(match &self.device {
            Some((_, load_percent)) => GpuReading::Available {
                devices: vec![GpuUsage {
                    load_percent: *load_percent,
                    memory_total_mb: None,
                    memory_used_mb: None,
                    temperature_c: None,
                }],
            },
            None => GpuReading::Unavailable { reason: "stub host has no GPU".into() },
        })
    }
}
