//! GPU telemetry provider
//!
//! GPU telemetry is a capability that many hosts lack. The provider therefore never
//! fails because telemetry is missing: it answers with [`GpuReading::Unavailable`]
//! and consumers read [`GpuReading::load_percent`] as `0`.
//!
//! NVIDIA devices are read through NVML when the crate is built with the `nvml`
//! feature. Without it every host is treated as having no GPU telemetry.

#[cfg(feature = "nvml")]
mod nvml;
mod types;

pub use types::*;

#[cfg(feature = "nvml")]
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

#[cfg(feature = "nvml")]
use crate::error::Error;
use crate::error::Result;
use crate::traits::{MetricProvider, ProviderKind};

#[derive(Clone)]
enum Backend {
    #[cfg(feature = "nvml")]
    Nvml(Arc<nvml_wrapper::Nvml>),
    Unavailable(String),
}

/// GPU provider
#[derive(Clone)]
pub struct Gpu {
    backend: Backend,
}

impl std::fmt::Debug for Gpu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            #[cfg(feature = "nvml")]
            Backend::Nvml(_) => f.debug_struct("Gpu").field("backend", &"nvml").finish(),
            Backend::Unavailable(reason) => f.debug_struct("Gpu").field("unavailable", reason).finish(),
        }
    }
}

impl Gpu {
    /// Probes the host for GPU telemetry
    #[cfg(feature = "nvml")]
    pub fn detect() -> Self {
        match nvml::initialize() {
            Ok(handle) => Self { backend: Backend::Nvml(Arc::new(handle)) },
            Err(reason) => {
                debug!(%reason, "GPU telemetry unavailable");
                Self::unavailable(reason)
            },
        }
    }

    /// Probes the host for GPU telemetry
    #[cfg(not(feature = "nvml"))]
    pub fn detect() -> Self {
        debug!("GPU telemetry support not compiled in");
        Self::unavailable("GPU telemetry support not compiled in (enable the `nvml` feature)")
    }

    /// A provider that always reports the capability as absent
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { backend: Backend::Unavailable(reason.into()) }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, Backend::Unavailable(_))
    }
}

impl Default for Gpu {
    fn default() -> Self {
        Self::detect()
    }
}

#[async_trait]
impl MetricProvider for Gpu {
    type Info = GpuInventory;
    type Usage = GpuReading;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gpu
    }

    async fn get_info(&self) -> Result<GpuInventory> {
        match &self.backend {
            #[cfg(feature = "nvml")]
            Backend::Nvml(handle) => nvml::inventory(handle)
                .map(|devices| GpuInventory::Available { devices })
                .map_err(|e| Error::provider_query(ProviderKind::Gpu, e.to_string())),
            Backend::Unavailable(reason) => Ok(GpuInventory::Unavailable { reason: reason.clone() }),
        }
    }

    async fn get_usage(&self) -> Result<GpuReading> {
        match &self.backend {
            #[cfg(feature = "nvml")]
            Backend::Nvml(handle) => nvml::usage(handle)
                .map(|devices| GpuReading::Available { devices })
                .map_err(|e| Error::provider_query(ProviderKind::Gpu, e.to_string())),
            Backend::Unavailable(reason) => Ok(GpuReading::Unavailable { reason: reason.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(load_percent: f64) -> GpuUsage {
        GpuUsage { load_percent, memory_total_mb: Some(8192.0), memory_used_mb: Some(1024.0), temperature_c: None }
    }

    #[test]
    fn test_load_percent_averages_devices() {
        let reading = GpuReading::Available { devices: vec![device(20.0), device(60.0)] };
        assert_eq!(reading.load_percent(), 40.0);
    }

    #[test]
    fn test_unavailable_and_empty_read_as_zero() {
        assert_eq!(GpuReading::Unavailable { reason: "none".into() }.load_percent(), 0.0);
        assert_eq!(GpuReading::Available { devices: vec![] }.load_percent(), 0.0);
        assert_eq!(GpuReading::default().load_percent(), 0.0);
    }

    #[tokio::test]
    async fn test_unavailable_provider_does_not_fail() {
        let gpu = Gpu::unavailable("no telemetry");
        assert!(!gpu.is_available());

        let reading = gpu.get_usage().await.unwrap();
        assert_eq!(reading, GpuReading::Unavailable { reason: "no telemetry".into() });

        let inventory = gpu.get_info().await.unwrap();
        assert_eq!(inventory.primary_name(), None);
    }

    #[test]
    fn test_reading_serializes_with_status_tag() {
        let json = serde_json::to_value(GpuReading::Unavailable { reason: "x".into() }).unwrap();
        assert_eq!(json["status"], "unavailable");
    }
}
