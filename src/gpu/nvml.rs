use nvml_wrapper::enum_wrappers::device::TemperatureSensor;
use nvml_wrapper::error::NvmlError;
use nvml_wrapper::Nvml;

use super::{GpuInfo, GpuUsage};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Initialises NVML; fails with a reason when the library is missing or no device is present
pub(crate) fn initialize() -> Result<Nvml, String> {
    let nvml = Nvml::init().map_err(|e| format!("NVML initialisation failed: {e}"))?;
    match nvml.device_count() {
        Ok(0) => Err("no NVIDIA GPU found".to_string()),
        Ok(_) => Ok(nvml),
        Err(e) => Err(format!("NVML device enumeration failed: {e}")),
    }
}

pub(crate) fn inventory(nvml: &Nvml) -> Result<Vec<GpuInfo>, NvmlError> {
    let driver = nvml.sys_driver_version().ok();
    (0..nvml.device_count()?)
        .map(|index| {
            let device = nvml.device_by_index(index)?;
            Ok(GpuInfo { name: device.name()?, driver: driver.clone() })
        })
        .collect()
}

pub(crate) fn usage(nvml: &Nvml) -> Result<Vec<GpuUsage>, NvmlError> {
    (0..nvml.device_count()?)
        .map(|index| {
            let device = nvml.device_by_index(index)?;
            let load = device.utilization_rates()?.gpu;
            let memory = device.memory_info().ok();

            Ok(GpuUsage {
                load_percent: f64::from(load).clamp(0.0, 100.0),
                memory_total_mb: memory.as_ref().map(|m| m.total as f64 / BYTES_PER_MB),
                memory_used_mb: memory.as_ref().map(|m| m.used as f64 / BYTES_PER_MB),
                temperature_c: device.temperature(TemperatureSensor::Gpu).ok().map(f64::from),
            })
        })
        .collect()
}
