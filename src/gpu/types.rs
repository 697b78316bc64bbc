use serde::{Deserialize, Serialize};

/// Reason reported when no GPU reading has been taken
pub const NO_READING: &str = "no GPU reading";

/// Static description of one GPU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInfo {
    pub name: String,
    pub driver: Option<String>,
}

/// Usage of one GPU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuUsage {
    /// Core utilisation (0-100)
    pub load_percent: f64,
    pub memory_total_mb: Option<f64>,
    pub memory_used_mb: Option<f64>,
    pub temperature_c: Option<f64>,
}

/// GPU inventory, or the reason there is none
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GpuInventory {
    Available { devices: Vec<GpuInfo> },
    Unavailable { reason: String },
}

impl GpuInventory {
    /// Name of the first GPU, if any
    pub fn primary_name(&self) -> Option<&str> {
        match self {
            Self::Available { devices } => devices.first().map(|gpu| gpu.name.as_str()),
            Self::Unavailable { .. } => None,
        }
    }
}

impl Default for GpuInventory {
    fn default() -> Self {
        Self::Unavailable { reason: NO_READING.to_string() }
    }
}

/// GPU usage, or the reason it could not be read
///
/// Hosts without GPU telemetry produce `Unavailable`; this is a normal outcome,
/// not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GpuReading {
    Available { devices: Vec<GpuUsage> },
    Unavailable { reason: String },
}

impl GpuReading {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// Mean load across all GPUs; 0 when unavailable or when no device was reported
    pub fn load_percent(&self) -> f64 {
        match self {
            Self::Available { devices } if !devices.is_empty() => {
                devices.iter().map(|gpu| gpu.load_percent).sum::<f64>() / devices.len() as f64
            },
            _ => 0.0,
        }
    }
}

impl Default for GpuReading {
    fn default() -> Self {
        Self::Unavailable { reason: NO_READING.to_string() }
    }
}
