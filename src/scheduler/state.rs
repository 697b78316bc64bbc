use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::core::metrics::{MetricKind, MetricSample, UsageLog};
use crate::error::Result;
use crate::interchange::InterchangeCodec;
use crate::persistence::PersistenceGateway;
use crate::timeseries::MetricWindows;

/// Whether the sampler is recording or showing loaded history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplerMode {
    /// Ticks sample the host and extend the log and windows
    Live,
    /// Ticks are ignored; log and windows hold loaded records
    Replay,
}

impl fmt::Display for SamplerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Replay => write!(f, "replay"),
        }
    }
}

#[derive(Debug)]
struct SamplerState {
    mode: SamplerMode,
    log: UsageLog,
    windows: MetricWindows,
}

/// Shared handle on the pipeline state
///
/// Cloning is cheap; every clone observes the same state. Each transition runs as a
/// single write-locked critical section, so readers never see a half-applied change
/// and no tick is applied in the middle of a transition. Decoding and storage I/O
/// always happen outside the lock.
#[derive(Debug, Clone)]
pub struct SamplerControl {
    state: Arc<RwLock<SamplerState>>,
}

impl SamplerControl {
    pub(crate) fn new(window_capacity: usize) -> Self {
        let state = SamplerState {
            mode: SamplerMode::Live,
            log: UsageLog::new(),
            windows: MetricWindows::new(window_capacity),
        };
        Self { state: Arc::new(RwLock::new(state)) }
    }

    pub fn mode(&self) -> SamplerMode {
        self.state.read().mode
    }

    /// Copy of all four windows
    pub fn windows(&self) -> MetricWindows {
        self.state.read().windows.clone()
    }

    /// Values of one window, oldest first
    pub fn window(&self, kind: MetricKind) -> Vec<f64> {
        self.state.read().windows.get(kind).values()
    }

    /// Copy of the usage log
    pub fn log_snapshot(&self) -> Vec<MetricSample> {
        self.state.read().log.snapshot()
    }

    pub fn log_len(&self) -> usize {
        self.state.read().log.len()
    }

    pub fn latest_sample(&self) -> Option<MetricSample> {
        self.state.read().log.latest().cloned()
    }

    /// Appends a freshly collected sample if the sampler is still live
    ///
    /// Returns `false` when a transition to replay happened while the sample was
    /// being collected; the sample is then dropped.
    pub(crate) fn apply_live_sample(&self, sample: &MetricSample) -> bool {
        let mut state = self.state.write();
        if state.mode != SamplerMode::Live {
            return false;
        }
        state.log.push(sample.clone());
        state.windows.append_sample(sample);
        true
    }

    /// Switches to replay and shows `records`
    ///
    /// The log becomes `records` and every window is rebuilt from them. Calling this
    /// while already replaying swaps in the new records.
    pub fn enter_replay(&self, records: Vec<MetricSample>) {
        let count = records.len();
        {
            let mut state = self.state.write();
            state.windows.replace_from(&records);
            state.log.replace(records);
            state.mode = SamplerMode::Replay;
        }
        info!(records = count, "entered replay");
    }

    /// Decodes `bytes` with `codec` and replays the result
    ///
    /// Nothing changes if any record fails to decode.
    pub fn import_replay(&self, codec: &dyn InterchangeCodec, bytes: &[u8]) -> Result<usize> {
        let records = codec.import(bytes)?;
        let count = records.len();
        self.enter_replay(records);
        Ok(count)
    }

    /// Replays every sample held by `gateway`
    pub fn load_replay_from_store(&self, gateway: &dyn PersistenceGateway) -> Result<usize> {
        let records = gateway.fetch_all_usage()?;
        let count = records.len();
        self.enter_replay(records);
        Ok(count)
    }

    /// Leaves replay, clearing the log and zeroing every window
    ///
    /// Returns `false`, changing nothing, when the sampler is already live.
    pub fn resume_live(&self) -> bool {
        {
            let mut state = self.state.write();
            if state.mode == SamplerMode::Live {
                return false;
            }
            state.mode = SamplerMode::Live;
            state.log.clear();
            state.windows.reset_all();
        }
        info!("resumed live sampling");
        true
    }

    /// Encodes a snapshot of the log
    pub fn export_log(&self, codec: &dyn InterchangeCodec) -> Result<Vec<u8>> {
        codec.export(&self.log_snapshot())
    }

    /// Stores a snapshot of the log; returns the number of samples written
    pub fn persist_log(&self, gateway: &dyn PersistenceGateway) -> Result<usize> {
        let snapshot = self.log_snapshot();
        gateway.insert_usage_batch(&snapshot)?;
        info!(samples = snapshot.len(), "persisted usage log");
        Ok(snapshot.len())
    }
}
