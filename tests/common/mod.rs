#![allow(dead_code)]

pub mod builders;
pub mod providers;

pub use builders::{sample_history, TestMonitorBuilder};
