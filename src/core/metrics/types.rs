use std::fmt;

use serde::{Deserialize, Serialize};

/// Wall-clock format shared by persisted rows and interchange files
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The scalar metrics carried by every sample and tracked by the windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Cpu,
    Memory,
    Gpu,
    Network,
}

impl MetricKind {
    /// Every metric, in record column order
    pub const ALL: [MetricKind; 4] = [MetricKind::Cpu, MetricKind::Memory, MetricKind::Gpu, MetricKind::Network];

    /// Column name used on the wire
    pub fn column(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Gpu => "gpu",
            Self::Network => "network_kb",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "CPU %"),
            Self::Memory => write!(f, "Memory %"),
            Self::Gpu => write!(f, "GPU %"),
            Self::Network => write!(f, "Network KB/s"),
        }
    }
}

/// Serde adapter for `YYYY-MM-DD HH:MM:SS` timestamps
pub(crate) mod wire_time {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIME_FORMAT;

    pub fn serialize<S: Serializer>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&timestamp.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT)
            .map_err(|e| de::Error::custom(format!("invalid time {raw:?}: {e}")))
    }
}
