//! Network counters and throughput
//!
//! [`Network`] reports the cumulative byte and packet counters summed over all
//! interfaces; [`NetworkDeltaTracker`] turns two successive readings into a rate.

pub mod traffic;

pub use traffic::{NetworkCounterState, NetworkDeltaTracker, BYTES_PER_KB};

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use sysinfo::Networks;

use crate::error::Result;
use crate::traits::{MetricProvider, ProviderKind};

/// Static network description
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    /// Interface names, sorted
    pub interfaces: Vec<String>,
}

/// Cumulative counters summed over all interfaces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkUsage {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
}

impl NetworkUsage {
    pub fn new(bytes_sent: u64, bytes_recv: u64) -> Self {
        Self { bytes_sent, bytes_recv, ..Default::default() }
    }
}

/// Network provider
#[derive(Debug, Clone)]
pub struct Network {
    networks: Arc<Mutex<Networks>>,
}

impl Network {
    pub fn new() -> Self {
        Self { networks: Arc::new(Mutex::new(Networks::new_with_refreshed_list())) }
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricProvider for Network {
    type Info = NetworkInfo;
    type Usage = NetworkUsage;

    fn kind(&self) -> ProviderKind {
        ProviderKind::Network
    }

    async fn get_info(&self) -> Result<NetworkInfo> {
        let mut networks = self.networks.lock();
        networks.refresh_list();

        let mut interfaces: Vec<String> = networks.list().keys().cloned().collect();
        interfaces.sort();
        Ok(NetworkInfo { interfaces })
    }

    async fn get_usage(&self) -> Result<NetworkUsage> {
        let mut networks = self.networks.lock();
        networks.refresh();

        Ok(networks.list().values().fold(NetworkUsage::default(), |total, data| NetworkUsage {
            bytes_sent: total.bytes_sent.saturating_add(data.total_transmitted()),
            bytes_recv: total.bytes_recv.saturating_add(data.total_received()),
            packets_sent: total.packets_sent.saturating_add(data.total_packets_transmitted()),
            packets_recv: total.packets_recv.saturating_add(data.total_packets_received()),
        }))
    }
}
