//! # Metrics Module
//!
//! The composite per-tick sample and the in-memory log of samples.
//!
//! A [`MetricSample`] aggregates every tracked metric under one timestamp. It is
//! immutable once built, and its serde form is the record shape shared by the store
//! and the interchange codec:
//!
//! ```text
//! { time: "YYYY-MM-DD HH:MM:SS", cpu, memory, gpu, network_kb }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use usage_sampler::core::metrics::{MetricKind, MetricSample, UsageLog};
//!
//! let mut log = UsageLog::new();
//! log.push(MetricSample::now(12.5, 40.0, 0.0, 3.2));
//!
//! assert_eq!(log.len(), 1);
//! assert_eq!(log.series(MetricKind::Cpu), vec![12.5]);
//! ```
mod types;

pub use types::{MetricKind, TIME_FORMAT};
pub(crate) use types::wire_time;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// One composite sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    #[serde(rename = "time", with = "wire_time")]
    timestamp: NaiveDateTime,
    #[serde(rename = "cpu")]
    cpu_percent: f64,
    #[serde(rename = "memory")]
    memory_percent: f64,
    #[serde(rename = "gpu")]
    gpu_percent: f64,
    #[serde(rename = "network_kb")]
    network_rate_kb_per_s: f64,
}

impl MetricSample {
    /// Creates a sample; the timestamp is truncated to whole seconds to match the wire format
    pub fn new(
        timestamp: NaiveDateTime,
        cpu_percent: f64,
        memory_percent: f64,
        gpu_percent: f64,
        network_rate_kb_per_s: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            cpu_percent,
            memory_percent,
            gpu_percent,
            network_rate_kb_per_s,
        }
    }

    /// Creates a sample stamped with the current local time
    pub fn now(cpu_percent: f64, memory_percent: f64, gpu_percent: f64, network_rate_kb_per_s: f64) -> Self {
        Self::new(Local::now().naive_local(), cpu_percent, memory_percent, gpu_percent, network_rate_kb_per_s)
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Timestamp rendered in the wire format
    pub fn time_string(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }

    pub fn cpu_percent(&self) -> f64 {
        self.cpu_percent
    }

    pub fn memory_percent(&self) -> f64 {
        self.memory_percent
    }

    pub fn gpu_percent(&self) -> f64 {
        self.gpu_percent
    }

    pub fn network_rate_kb_per_s(&self) -> f64 {
        self.network_rate_kb_per_s
    }

    /// The value of one metric
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::Cpu => self.cpu_percent,
            MetricKind::Memory => self.memory_percent,
            MetricKind::Gpu => self.gpu_percent,
            MetricKind::Network => self.network_rate_kb_per_s,
        }
    }
}

/// Ordered log of samples
///
/// Append-only while sampling live; replaced wholesale when historical records are
/// loaded for replay.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageLog {
    samples: Vec<MetricSample>,
}

impl UsageLog {
    pub fn new() -> Self {
        Self { samples: Vec::new() }
    }

    pub fn push(&mut self, sample: MetricSample) {
        self.samples.push(sample);
    }

    /// Replaces the whole log, keeping the given order
    pub fn replace(&mut self, samples: Vec<MetricSample>) {
        self.samples = samples;
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricSample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[MetricSample] {
        &self.samples
    }

    /// An owned copy of the samples, for export while sampling continues
    pub fn snapshot(&self) -> Vec<MetricSample> {
        self.samples.clone()
    }

    /// The values of one metric, oldest first
    pub fn series(&self, kind: MetricKind) -> Vec<f64> {
        self.samples.iter().map(|sample| sample.value(kind)).collect()
    }
}

impl From<Vec<MetricSample>> for UsageLog {
    fn from(samples: Vec<MetricSample>) -> Self {
        Self { samples }
    }
}

impl<'a> IntoIterator for &'a UsageLog {
    type Item = &'a MetricSample;
    type IntoIter = std::slice::Iter<'a, MetricSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
