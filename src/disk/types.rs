use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Static disk description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskInfo {
    /// Device names of the mounted partitions
    pub partitions: Vec<String>,
}

/// Filesystem usage for one path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    /// Path the usage was measured for
    pub path: PathBuf,
    /// Total capacity in bytes
    pub total_bytes: u64,
    /// Used space in bytes
    pub used_bytes: u64,
    /// Free space in bytes
    pub free_bytes: u64,
    /// Used share of the capacity (0-100)
    pub percent: f64,
}

impl DiskUsage {
    /// Builds a usage snapshot from capacity and free space
    pub fn new(path: impl Into<PathBuf>, total_bytes: u64, free_bytes: u64) -> Self {
        let free_bytes = free_bytes.min(total_bytes);
        let used_bytes = total_bytes - free_bytes;
        let percent = if total_bytes == 0 { 0.0 } else { used_bytes as f64 / total_bytes as f64 * 100.0 };
        Self { path: path.into(), total_bytes, used_bytes, free_bytes, percent }
    }

    pub fn is_nearly_full(&self) -> bool {
        self.percent > 90.0
    }
}
