use std::time::Instant;

use super::NetworkUsage;

/// Bytes in one kilobyte, as used for the reported throughput
pub const BYTES_PER_KB: f64 = 1024.0;

/// Cumulative byte counters remembered between two measurements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkCounterState {
    /// Total bytes sent at the previous measurement
    pub last_bytes_sent: u64,
    /// Total bytes received at the previous measurement
    pub last_bytes_recv: u64,
}

impl From<&NetworkUsage> for NetworkCounterState {
    fn from(usage: &NetworkUsage) -> Self {
        Self { last_bytes_sent: usage.bytes_sent, last_bytes_recv: usage.bytes_recv }
    }
}

#[derive(Debug, Clone, Copy)]
struct Baseline {
    counters: NetworkCounterState,
    taken_at: Instant,
}

/// Converts cumulative network counters into a throughput rate
///
/// Counters are expected to grow monotonically, but they may reset when an interface
/// restarts. A combined delta below zero is clamped to zero rather than producing a
/// negative rate. The stored counters are replaced after every measurement, clamped
/// or not, so the next interval starts from the latest reading.
#[derive(Debug, Clone, Default)]
pub struct NetworkDeltaTracker {
    baseline: Option<Baseline>,
}

impl NetworkDeltaTracker {
    /// Creates a tracker without a baseline; its first measurement yields zero
    pub fn new() -> Self {
        Self { baseline: None }
    }

    /// Creates a tracker whose baseline is `usage`, taken now
    pub fn with_counters(usage: &NetworkUsage) -> Self {
        Self { baseline: Some(Baseline { counters: usage.into(), taken_at: Instant::now() }) }
    }

    /// The counters remembered from the previous measurement
    pub fn state(&self) -> Option<NetworkCounterState> {
        self.baseline.map(|baseline| baseline.counters)
    }

    /// Forgets the baseline so the next measurement starts a fresh interval
    pub fn reset(&mut self) {
        self.baseline = None;
    }

    /// Computes `max(0, Δrecv + Δsent) / interval_scale`
    ///
    /// Without a baseline the rate is zero. A non-positive scale also yields zero.
    pub fn compute_rate(&mut self, current: &NetworkUsage, interval_scale: f64) -> f64 {
        self.advance(current, interval_scale, Instant::now())
    }

    /// Throughput in KB/s over the true time elapsed since the previous measurement
    pub fn rate_kb_per_sec(&mut self, current: &NetworkUsage, now: Instant) -> f64 {
        let elapsed = match self.baseline {
            Some(baseline) => now.saturating_duration_since(baseline.taken_at).as_secs_f64(),
            None => 0.0,
        };
        self.advance(current, elapsed * BYTES_PER_KB, now)
    }

    fn advance(&mut self, current: &NetworkUsage, interval_scale: f64, now: Instant) -> f64 {
        let rate = match self.baseline {
            Some(previous) if interval_scale > 0.0 => {
                let delta = counter_delta(previous.counters.last_bytes_recv, current.bytes_recv)
                    + counter_delta(previous.counters.last_bytes_sent, current.bytes_sent);
                delta.max(0) as f64 / interval_scale
            },
            _ => 0.0,
        };

        self.baseline = Some(Baseline { counters: current.into(), taken_at: now });
        rate
    }
}

fn counter_delta(previous: u64, current: u64) -> i128 {
    i128::from(current) - i128::from(previous)
}
