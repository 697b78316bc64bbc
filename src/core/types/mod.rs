//! # Core Types Module
//!
//! Records kept in the durable store alongside the usage samples.

use serde::{Deserialize, Serialize};

/// Hardware and OS summary of the sampled host
///
/// The store keeps every profile ever recorded; the most recently inserted one
/// describes the current host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardwareProfile {
    pub cpu_name: String,
    pub gpu_name: String,
    pub ram_size_gb: f64,
    pub os_name: String,
}

/// A named setting; names are unique and the last write wins
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setting {
    pub name: String,
    pub value: String,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}
