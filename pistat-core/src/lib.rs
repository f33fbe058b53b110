//! Board-agnostic core logic for the pistat monitor
//!
//! This crate contains everything that does not touch a concrete bus:
//!
//! - Host metric sampling with per-metric fallbacks
//! - The stats display loop and its shutdown token
//! - Configuration type definitions and TOML parsing

#![deny(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod monitor;
pub mod shutdown;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, MonitorConfig};
pub use metrics::{HostProbe, MetricError, MetricSnapshot, Reading, SysinfoProbe};
pub use monitor::{MonitorState, RunSummary, StatsMonitor};
pub use shutdown::Shutdown;
