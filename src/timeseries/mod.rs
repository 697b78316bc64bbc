//! Fixed-capacity sliding windows for display
//!
//! A [`TimeSeriesWindow`] always holds exactly `capacity` values, oldest first,
//! left-padded with zeros. It changes in one of two ways only:
//!
//! * [`TimeSeriesWindow::append`] while sampling live: the oldest value is evicted and
//!   the new one is placed at the end.
//! * [`TimeSeriesWindow::replace`] when loading history: the window becomes the last
//!   `capacity` values of the source, zero-padded on the left if the source is shorter.
//!
//! ```rust
//! use usage_sampler::timeseries::TimeSeriesWindow;
//!
//! let mut window = TimeSeriesWindow::new(3);
//! window.append(1.0);
//! assert_eq!(window.values(), vec![0.0, 0.0, 1.0]);
//!
//! window.replace(&[4.0, 5.0, 6.0, 7.0]);
//! assert_eq!(window.values(), vec![5.0, 6.0, 7.0]);
//! ```

use std::collections::VecDeque;

use crate::core::metrics::{MetricKind, MetricSample};

/// Default number of points per window
pub const DEFAULT_WINDOW_CAPACITY: usize = 60;

/// Sliding buffer of scalar samples
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesWindow {
    capacity: usize,
    buffer: VecDeque<f64>,
}

impl TimeSeriesWindow {
    /// Creates an all-zero window
    pub fn new(capacity: usize) -> Self {
        Self { capacity, buffer: std::iter::repeat(0.0).take(capacity).collect() }
    }

    /// Evicts the oldest value and appends `value`
    pub fn append(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        self.buffer.pop_front();
        self.buffer.push_back(value);
    }

    /// Replaces the whole window with the tail of `values`
    pub fn replace(&mut self, values: &[f64]) {
        let kept = &values[values.len().saturating_sub(self.capacity)..];
        let padding = self.capacity - kept.len();

        self.buffer.clear();
        self.buffer.extend(std::iter::repeat(0.0).take(padding));
        self.buffer.extend(kept.iter().copied());
    }

    /// Zeroes the window
    pub fn reset(&mut self) {
        self.replace(&[]);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Always equal to the capacity
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Most recent value
    pub fn latest(&self) -> Option<f64> {
        self.buffer.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.buffer.iter().copied()
    }

    /// Values, oldest first
    pub fn values(&self) -> Vec<f64> {
        self.buffer.iter().copied().collect()
    }
}

/// One window per tracked metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricWindows {
    cpu: TimeSeriesWindow,
    memory: TimeSeriesWindow,
    gpu: TimeSeriesWindow,
    network: TimeSeriesWindow,
}

impl MetricWindows {
    pub fn new(capacity: usize) -> Self {
        Self {
            cpu: TimeSeriesWindow::new(capacity),
            memory: TimeSeriesWindow::new(capacity),
            gpu: TimeSeriesWindow::new(capacity),
            network: TimeSeriesWindow::new(capacity),
        }
    }

    pub fn get(&self, kind: MetricKind) -> &TimeSeriesWindow {
        match kind {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Memory => &self.memory,
            MetricKind::Gpu => &self.gpu,
            MetricKind::Network => &self.network,
        }
    }

    fn get_mut(&mut self, kind: MetricKind) -> &mut TimeSeriesWindow {
        match kind {
            MetricKind::Cpu => &mut self.cpu,
            MetricKind::Memory => &mut self.memory,
            MetricKind::Gpu => &mut self.gpu,
            MetricKind::Network => &mut self.network,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cpu.capacity()
    }

    /// Appends each metric of `sample` to its window
    pub fn append_sample(&mut self, sample: &MetricSample) {
        for kind in MetricKind::ALL {
            self.get_mut(kind).append(sample.value(kind));
        }
    }

    /// Repopulates every window from the per-metric series of `samples`
    pub fn replace_from(&mut self, samples: &[MetricSample]) {
        for kind in MetricKind::ALL {
            let series: Vec<f64> = samples.iter().map(|sample| sample.value(kind)).collect();
            self.get_mut(kind).replace(&series);
        }
    }

    pub fn reset_all(&mut self) {
        for kind in MetricKind::ALL {
            self.get_mut(kind).reset();
        }
    }
}

impl Default for MetricWindows {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
