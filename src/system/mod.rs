//! Aggregation over all hardware providers
//!
//! [`SystemMonitor`] owns one provider per domain and answers the composite
//! queries the sampler needs. A failing provider never fails the composite call:
//! its domain falls back to the default value and is listed in `degraded`.

use sysinfo::System;
use tracing::warn;

use crate::config::SamplerConfig;
use crate::core::types::HardwareProfile;
use crate::cpu::{CpuInfo, CpuUsage, Processor, DEFAULT_CPU_NAME};
use crate::disk::{Disk, DiskInfo, DiskUsage};
use crate::gpu::{Gpu, GpuInventory, GpuReading};
use crate::memory::{Memory, MemoryInfo, MemoryUsage};
use crate::network::{Network, NetworkInfo, NetworkUsage};
use crate::traits::{
    DiskProvider, GraphicsProvider, MemoryProvider, MetricProvider, NetworkProvider, ProcessorProvider, ProviderKind,
};

/// OS name reported when the host does not describe itself
pub const UNKNOWN_OS: &str = "Unknown OS";

/// GPU name recorded in a hardware profile when no GPU is visible
pub const NO_GPU_NAME: &str = "Unavailable";

/// Usage snapshot of every domain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemUsage {
    pub cpu: CpuUsage,
    pub memory: MemoryUsage,
    pub disk: DiskUsage,
    pub network: NetworkUsage,
    pub gpu: GpuReading,
    /// Domains whose query failed and were replaced by their default
    pub degraded: Vec<ProviderKind>,
}

impl SystemUsage {
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

/// Static description of every domain
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub cpu: Option<CpuInfo>,
    pub memory: Option<MemoryInfo>,
    pub disk: Option<DiskInfo>,
    pub network: Option<NetworkInfo>,
    pub gpu: GpuInventory,
    pub os_name: String,
    pub degraded: Vec<ProviderKind>,
}

/// Composite view over the processor, memory, disk, network and GPU providers
pub struct SystemMonitor {
    processor: ProcessorProvider,
    memory: MemoryProvider,
    disk: DiskProvider,
    network: NetworkProvider,
    gpu: GraphicsProvider,
    os_name: String,
}

impl std::fmt::Debug for SystemMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemMonitor").field("os_name", &self.os_name).finish_non_exhaustive()
    }
}

impl SystemMonitor {
    /// Creates a monitor backed by the host providers
    pub fn new(config: &SamplerConfig) -> Self {
        Self::from_providers(
            Box::new(Processor::new(config.cpu_sample_interval())),
            Box::new(Memory::new()),
            Box::new(Disk::new(config.disk_path.clone())),
            Box::new(Network::new()),
            Box::new(Gpu::detect()),
        )
    }

    /// Creates a monitor from explicit providers
    pub fn from_providers(
        processor: ProcessorProvider,
        memory: MemoryProvider,
        disk: DiskProvider,
        network: NetworkProvider,
        gpu: GraphicsProvider,
    ) -> Self {
        Self {
            processor,
            memory,
            disk,
            network,
            gpu,
            os_name: System::long_os_version().unwrap_or_else(|| UNKNOWN_OS.to_string()),
        }
    }

    pub fn with_processor(mut self, provider: impl MetricProvider<Info = CpuInfo, Usage = CpuUsage> + 'static) -> Self {
        self.processor = Box::new(provider);
        self
    }

    pub fn with_memory(
        mut self,
        provider: impl MetricProvider<Info = MemoryInfo, Usage = MemoryUsage> + 'static,
    ) -> Self {
        self.memory = Box::new(provider);
        self
    }

    pub fn with_disk(mut self, provider: impl MetricProvider<Info = DiskInfo, Usage = DiskUsage> + 'static) -> Self {
        self.disk = Box::new(provider);
        self
    }

    pub fn with_network(
        mut self,
        provider: impl MetricProvider<Info = NetworkInfo, Usage = NetworkUsage> + 'static,
    ) -> Self {
        self.network = Box::new(provider);
        self
    }

    pub fn with_gpu(mut self, provider: impl MetricProvider<Info = GpuInventory, Usage = GpuReading> + 'static) -> Self {
        self.gpu = Box::new(provider);
        self
    }

    pub fn with_os_name(mut self, os_name: impl Into<String>) -> Self {
        self.os_name = os_name.into();
        self
    }

    pub fn os_name(&self) -> &str {
        &self.os_name
    }

    /// Queries the usage of every domain, one provider after the other
    pub async fn get_all_usage(&self) -> SystemUsage {
        let mut degraded = Vec::new();

        let cpu = usage_or_default(self.processor.as_ref(), &mut degraded).await;
        let memory = usage_or_default(self.memory.as_ref(), &mut degraded).await;
        let disk = usage_or_default(self.disk.as_ref(), &mut degraded).await;
        let network = usage_or_default(self.network.as_ref(), &mut degraded).await;
        let gpu = usage_or_default(self.gpu.as_ref(), &mut degraded).await;

        SystemUsage { cpu, memory, disk, network, gpu, degraded }
    }

    /// Queries the static description of every domain
    pub async fn get_all_info(&self) -> SystemInfo {
        let mut degraded = Vec::new();

        let cpu = info_or_none(self.processor.as_ref(), &mut degraded).await;
        let memory = info_or_none(self.memory.as_ref(), &mut degraded).await;
        let disk = info_or_none(self.disk.as_ref(), &mut degraded).await;
        let network = info_or_none(self.network.as_ref(), &mut degraded).await;
        let gpu = match self.gpu.get_info().await {
            Ok(inventory) => inventory,
            Err(e) => {
                warn!(provider = %ProviderKind::Gpu, error = %e, "info query failed");
                degraded.push(ProviderKind::Gpu);
                GpuInventory::Unavailable { reason: e.to_string() }
            },
        };

        SystemInfo { cpu, memory, disk, network, gpu, os_name: self.os_name.clone(), degraded }
    }

    /// Summarises the host for the hardware profile table
    pub async fn hardware_profile(&self) -> HardwareProfile {
        let info = self.get_all_info().await;

        HardwareProfile {
            cpu_name: info.cpu.map(|cpu| cpu.name).unwrap_or_else(|| DEFAULT_CPU_NAME.to_string()),
            gpu_name: info.gpu.primary_name().unwrap_or(NO_GPU_NAME).to_string(),
            ram_size_gb: info.memory.map(|memory| memory.total_gb()).unwrap_or(0.0),
            os_name: info.os_name,
        }
    }
}

async fn usage_or_default<P>(provider: &P, degraded: &mut Vec<ProviderKind>) -> P::Usage
where
    P: MetricProvider + ?Sized,
{
    match provider.get_usage().await {
        Ok(usage) => usage,
        Err(e) => {
            warn!(provider = %provider.kind(), error = %e, "usage query failed, using default");
            degraded.push(provider.kind());
            P::Usage::default()
        },
    }
}

async fn info_or_none<P>(provider: &P, degraded: &mut Vec<ProviderKind>) -> Option<P::Info>
where
    P: MetricProvider + ?Sized,
{
    match provider.get_info().await {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(provider = %provider.kind(), error = %e, "info query failed");
            degraded.push(provider.kind());
            None
        },
    }
}
