use serde::{Deserialize, Serialize};

/// Static processor description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Processor model name
    pub name: String,
    /// Number of physical cores, if the OS reports it
    pub physical_cores: Option<usize>,
    /// Number of logical cores
    pub logical_cores: usize,
    /// Highest reported core frequency in MHz
    pub max_frequency_mhz: Option<u64>,
}

/// Point-in-time processor usage
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuUsage {
    /// Global CPU load (0-100)
    pub usage_percent: f64,
    /// Current frequency in MHz; `None` when the OS does not report it
    pub current_frequency_mhz: Option<u64>,
}

impl CpuUsage {
    /// Creates a usage snapshot, clamping the load into `0..=100`
    ///
    /// Non-finite readings are treated as zero and a zero frequency as unknown.
    pub fn new(usage_percent: f64, current_frequency_mhz: Option<u64>) -> Self {
        let usage_percent = if usage_percent.is_finite() { usage_percent.clamp(0.0, 100.0) } else { 0.0 };
        Self { usage_percent, current_frequency_mhz: current_frequency_mhz.filter(|mhz| *mhz > 0) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_is_clamped() {
        assert_eq!(CpuUsage::new(150.0, None).usage_percent, 100.0);
        assert_eq!(CpuUsage::new(-3.0, None).usage_percent, 0.0);
        assert_eq!(CpuUsage::new(f64::NAN, None).usage_percent, 0.0);
    }

    #[test]
    fn test_zero_frequency_is_unknown() {
        assert_eq!(CpuUsage::new(10.0, Some(0)).current_frequency_mhz, None);
        assert_eq!(CpuUsage::new(10.0, Some(2400)).current_frequency_mhz, Some(2400));
    }
}
