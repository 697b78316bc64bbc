//! # Sample Scheduler
//!
//! Drives the sampling pipeline: every tick queries all providers, turns the network
//! counters into a rate, builds one [`MetricSample`] and appends it to the usage log
//! and to every window.
//!
//! The scheduler has two modes. In [`SamplerMode::Live`] ticks sample the host. In
//! [`SamplerMode::Replay`] the log and windows show loaded history and ticks do
//! nothing. Transitions go through [`SamplerControl`], which stays usable after the
//! scheduler has been moved onto its own task with [`SampleScheduler::spawn`].
//!
//! ## Example
//!
//! ```no_run
//! use usage_sampler::config::SamplerConfig;
//! use usage_sampler::scheduler::SampleScheduler;
//!
//! #[tokio::main]
//! async fn main() -> usage_sampler::Result<()> {
//!     let scheduler = SampleScheduler::new(SamplerConfig::default())?;
//!     let control = scheduler.control();
//!     let mut handle = scheduler.spawn();
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//!     println!("{} samples", control.log_len());
//!
//!     handle.stop().await
//! }
//! ```

mod handle;
mod state;

pub use handle::SamplerHandle;
pub use state::{SamplerControl, SamplerMode};

use tracing::debug;

use crate::config::SamplerConfig;
use crate::core::metrics::MetricSample;
use crate::core::types::HardwareProfile;
use crate::error::Result;
use crate::network::NetworkDeltaTracker;
use crate::persistence::PersistenceGateway;
use crate::system::SystemMonitor;
use crate::traits::ProviderKind;

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// A sample was collected and appended
    Applied(MetricSample),
    /// The sampler was replaying; nothing was collected
    Skipped,
    /// Replay began while the sample was being collected; it was dropped
    Discarded,
}

impl TickOutcome {
    pub fn sample(&self) -> Option<&MetricSample> {
        match self {
            Self::Applied(sample) => Some(sample),
            _ => None,
        }
    }
}

/// Builds samples from the providers; owned by the ticking task alone
struct SampleCollector {
    monitor: SystemMonitor,
    tracker: NetworkDeltaTracker,
}

impl SampleCollector {
    async fn collect(&mut self) -> MetricSample {
        let usage = self.monitor.get_all_usage().await;

        // Defaulted counters would read as a reset, then as a burst on recovery.
        let network_rate = if usage.degraded.contains(&ProviderKind::Network) {
            self.tracker.reset();
            0.0
        } else {
            self.tracker.rate_kb_per_sec(&usage.network, tokio::time::Instant::now().into_std())
        };

        MetricSample::now(usage.cpu.usage_percent, usage.memory.percent, usage.gpu.load_percent(), network_rate)
    }
}

/// Periodic sampler
pub struct SampleScheduler {
    collector: SampleCollector,
    control: SamplerControl,
    config: SamplerConfig,
}

impl std::fmt::Debug for SampleScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleScheduler").field("mode", &self.control.mode()).field("config", &self.config).finish()
    }
}

impl SampleScheduler {
    /// Creates a live scheduler sampling the host
    pub fn new(config: SamplerConfig) -> Result<Self> {
        config.validate()?;
        let monitor = SystemMonitor::new(&config);
        Self::with_monitor(config, monitor)
    }

    /// Creates a live scheduler sampling through `monitor`
    pub fn with_monitor(config: SamplerConfig, monitor: SystemMonitor) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            collector: SampleCollector { monitor, tracker: NetworkDeltaTracker::new() },
            control: SamplerControl::new(config.window_capacity),
            config,
        })
    }

    pub fn control(&self) -> SamplerControl {
        self.control.clone()
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn monitor(&self) -> &SystemMonitor {
        &self.collector.monitor
    }

    /// Runs one sampling step
    ///
    /// The mode is checked before sampling and again when the sample is applied.
    /// Each replayed tick discards the network baseline so the first live tick
    /// afterwards does not report the traffic of the whole replay period.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn tick(&mut self) -> TickOutcome {
        if self.control.mode() == SamplerMode::Replay {
            self.collector.tracker.reset();
            debug!("replaying, tick skipped");
            return TickOutcome::Skipped;
        }

        let sample = self.collector.collect().await;

        if self.control.apply_live_sample(&sample) {
            debug!(
                cpu = sample.cpu_percent(),
                memory = sample.memory_percent(),
                gpu = sample.gpu_percent(),
                network_kb = sample.network_rate_kb_per_s(),
                "sample applied"
            );
            TickOutcome::Applied(sample)
        } else {
            self.collector.tracker.reset();
            debug!("replay started during collection, sample discarded");
            TickOutcome::Discarded
        }
    }

    /// Derives the current hardware profile and stores it
    pub async fn record_hardware_profile(&self, gateway: &dyn PersistenceGateway) -> Result<HardwareProfile> {
        let profile = self.collector.monitor.hardware_profile().await;
        gateway.insert_hardware(&profile)?;
        debug!(cpu = %profile.cpu_name, gpu = %profile.gpu_name, "hardware profile recorded");
        Ok(profile)
    }

    /// Moves the scheduler onto a tokio task ticking every `tick_period_ms`
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> SamplerHandle {
        handle::spawn(self)
    }
}
