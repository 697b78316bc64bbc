// Core modules
pub mod metrics;
pub mod types;

pub use metrics::{MetricKind, MetricSample, UsageLog};
pub use types::{HardwareProfile, Setting};
