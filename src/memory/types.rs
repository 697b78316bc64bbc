use serde::{Deserialize, Serialize};

/// Static memory description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryInfo {
    /// Total physical memory in bytes
    pub total_bytes: u64,
}

impl MemoryInfo {
    /// Total memory in GiB, rounded to two decimals
    pub fn total_gb(&self) -> f64 {
        (self.total_bytes as f64 / super::BYTES_PER_GB * 100.0).round() / 100.0
    }
}

/// Point-in-time memory usage
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Memory in use, in bytes
    pub used_bytes: u64,
    /// Memory available for new allocations, in bytes
    pub available_bytes: u64,
    /// Used share of total memory (0-100)
    pub percent: f64,
}

impl MemoryUsage {
    /// Builds a usage snapshot from used and available byte counts
    ///
    /// The percentage is computed against `used + available`; an empty total yields 0%.
    pub fn from_bytes(used_bytes: u64, available_bytes: u64) -> Self {
        let total = used_bytes.saturating_add(available_bytes);
        let percent = if total == 0 { 0.0 } else { used_bytes as f64 / total as f64 * 100.0 };
        Self { used_bytes, available_bytes, percent }
    }
}
