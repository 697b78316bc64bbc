use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::cpu::{CpuInfo, CpuUsage};
use crate::disk::{DiskInfo, DiskUsage};
use crate::error::Result;
use crate::gpu::{GpuInventory, GpuReading};
use crate::memory::{MemoryInfo, MemoryUsage};
use crate::network::{NetworkInfo, NetworkUsage};

/// The hardware domains a provider can cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    Processor,
    Memory,
    Disk,
    Network,
    Gpu,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processor => write!(f, "Processor"),
            Self::Memory => write!(f, "Memory"),
            Self::Disk => write!(f, "Disk"),
            Self::Network => write!(f, "Network"),
            Self::Gpu => write!(f, "GPU"),
        }
    }
}

/// Trait for a source of metrics from one hardware domain
///
/// Each provider produces a static "info" snapshot describing the hardware and a
/// "usage" snapshot describing its current state. Apart from the underlying OS query,
/// `get_usage` must be free of side effects and return within a bounded time.
///
/// A provider that fails returns an error; callers that aggregate several providers
/// (see [`crate::system::SystemMonitor`]) are expected to fall back to
/// `Self::Usage::default()` for that domain instead of aborting.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use usage_sampler::memory::{MemoryInfo, MemoryUsage};
/// use usage_sampler::traits::{MetricProvider, ProviderKind};
/// use usage_sampler::Result;
///
/// struct FixedMemory;
///
/// #[async_trait]
/// impl MetricProvider for FixedMemory {
///     type Info = MemoryInfo;
///     type Usage = MemoryUsage;
///
///     fn kind(&self) -> ProviderKind {
///         ProviderKind::Memory
///     }
///
///     async fn get_info(&self) -> Result<MemoryInfo> {
///         Ok(MemoryInfo { total_bytes: 1024 })
///     }
///
///     async fn get_usage(&self) -> Result<MemoryUsage> {
///         Ok(MemoryUsage::from_bytes(512, 512))
///     }
/// }
/// ```
#[async_trait]
pub trait MetricProvider: Send + Sync {
    /// Static description of the hardware
    type Info: Clone + Send + Sync + 'static;

    /// Point-in-time usage; `Default` is the degraded value used when a query fails
    type Usage: Clone + Default + Send + Sync + 'static;

    /// The hardware domain this provider covers
    fn kind(&self) -> ProviderKind;

    /// Get the static information snapshot
    async fn get_info(&self) -> Result<Self::Info>;

    /// Get the current usage snapshot
    async fn get_usage(&self) -> Result<Self::Usage>;
}

/// Boxed processor provider
pub type ProcessorProvider = Box<dyn MetricProvider<Info = CpuInfo, Usage = CpuUsage>>;

/// Boxed memory provider
pub type MemoryProvider = Box<dyn MetricProvider<Info = MemoryInfo, Usage = MemoryUsage>>;

/// Boxed disk provider
pub type DiskProvider = Box<dyn MetricProvider<Info = DiskInfo, Usage = DiskUsage>>;

/// Boxed network provider
pub type NetworkProvider = Box<dyn MetricProvider<Info = NetworkInfo, Usage = NetworkUsage>>;

/// Boxed GPU provider
pub type GraphicsProvider = Box<dyn MetricProvider<Info = GpuInventory, Usage = GpuReading>>;
