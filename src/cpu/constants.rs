/// Default CPU name when model info is unavailable
pub const DEFAULT_CPU_NAME: &str = "Unknown processor";

/// Default interval over which CPU load is measured, in milliseconds
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 500;
