//! Usage Sampler - periodic host resource sampling with rolling windows
//!
//! This crate samples CPU, memory, GPU and network activity on a fixed cadence,
//! keeps the most recent values in fixed-size windows for display, and can swap the
//! live view for historical records loaded from a CSV file or an SQLite store.
//!
//! # Features
//!
//! - **Providers**: processor, memory, disk, network and GPU metrics behind one
//!   [`MetricProvider`](traits::MetricProvider) trait, backed by `sysinfo` (and NVML
//!   with the `nvml` feature)
//! - **Fault isolation**: a failing provider degrades to a default value instead of
//!   aborting the tick; a host without GPU telemetry reports 0% GPU load
//! - **Network throughput**: cumulative counters turned into KB/s over the real time
//!   elapsed between ticks, with counter resets clamped to zero
//! - **Windows**: fixed-capacity, zero-padded, FIFO time series per metric
//! - **Live / Replay**: replay loads history all-or-nothing and pauses sampling;
//!   resuming clears everything and starts over
//! - **Persistence and interchange**: SQLite store and CSV codec sharing the record
//!   shape `time, cpu, memory, gpu, network_kb`
//!
//! # Examples
//!
//! ```no_run
//! use futures::StreamExt;
//! use usage_sampler::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = SqliteStore::open("system_data.db")?;
//!     let config = SamplerConfig::from_settings(&store.fetch_settings()?);
//!
//!     let scheduler = SampleScheduler::new(config)?;
//!     scheduler.record_hardware_profile(&store).await?;
//!
//!     let mut handle = scheduler.spawn();
//!     let mut samples = Box::pin(handle.samples().take(3));
//!     while let Some(sample) = samples.next().await {
//!         println!("{} cpu {:.1}%", sample.time_string(), sample.cpu_percent());
//!     }
//!
//!     handle.control().persist_log(&store)?;
//!     handle.stop().await
//! }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result`]. Provider failures are absorbed by the
//! sampler and only logged; malformed imports and storage failures are returned to
//! the caller and leave the pipeline state untouched:
//!
//! ```rust
//! use usage_sampler::interchange::{CsvCodec, InterchangeCodec};
//!
//! let err = CsvCodec::new().import(b"time,cpu,memory,gpu,network_kb\nnot-a-time,1,2,3,4\n").unwrap_err();
//! assert!(err.is_malformed_record());
//! ```

#![doc(html_root_url = "https://docs.rs/usage-sampler/0.1.0")]

pub mod config;
pub mod core;
pub mod cpu;
pub mod disk;
pub mod error;
pub mod gpu;
pub mod interchange;
pub mod memory;
pub mod network;
pub mod persistence;
pub mod scheduler;
pub mod system;
pub mod timeseries;
pub mod traits;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::config::SamplerConfig;
    pub use crate::core::{HardwareProfile, MetricKind, MetricSample, Setting, UsageLog};
    pub use crate::error::{Error, Result};
    pub use crate::interchange::{CsvCodec, InterchangeCodec};
    pub use crate::network::NetworkDeltaTracker;
    pub use crate::persistence::{PersistenceGateway, SqliteStore};
    pub use crate::scheduler::{SampleScheduler, SamplerControl, SamplerHandle, SamplerMode, TickOutcome};
    pub use crate::system::{SystemInfo, SystemMonitor, SystemUsage};
    pub use crate::timeseries::{MetricWindows, TimeSeriesWindow};
    pub use crate::traits::{MetricProvider, ProviderKind};
}
