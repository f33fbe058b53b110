//! One cycle's worth of metrics
//!
//! Every read here is infallible: a probe error is logged and replaced with
//! a fixed placeholder, so the stats loop always has three values to draw.

use std::path::Path;
use std::time::Duration;

use pistat_display::Screen;
use tracing::error;

use super::{HostProbe, MetricError, Reading};

/// Text shown when the local address cannot be determined
pub const IP_UNAVAILABLE: &str = "N/A";

/// CPU averaging window
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Filesystem whose usage is reported
pub const ROOT_MOUNT: &str = "/";

/// Point-in-time readings rendered as one frame
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSnapshot {
    /// Outbound local address, or [`IP_UNAVAILABLE`]
    pub ip: Reading<String>,
    /// CPU utilization in percent
    pub cpu: Reading<f64>,
    /// Root filesystem utilization in percent
    pub disk: Reading<f64>,
}

impl MetricSnapshot {
    /// Query the address, CPU and disk, in that order
    pub fn sample<P: HostProbe + ?Sized>(probe: &mut P) -> Self {
        Self {
            ip: read_ip_address(probe),
            cpu: read_cpu_usage(probe),
            disk: read_disk_usage(probe),
        }
    }

    /// `"IP: {address}"`
    pub fn ip_line(&self) -> String {
        format!("IP: {}", self.ip.value())
    }

    /// `"CPU: {percent:.1}%"`
    pub fn cpu_line(&self) -> String {
        format!("CPU: {:.1}%", self.cpu.value())
    }

    /// `"Disk: {percent:.1}%"`
    pub fn disk_line(&self) -> String {
        format!("Disk: {:.1}%", self.disk.value())
    }

    /// Lay the three lines out on a screen, top to bottom
    pub fn write_to(&self, screen: &mut Screen) {
        screen.clear();
        screen.set_line(0, &self.ip_line());
        screen.set_line(1, &self.cpu_line());
        screen.set_line(2, &self.disk_line());
    }
}

/// Outbound address, falling back to [`IP_UNAVAILABLE`]
pub fn read_ip_address<P: HostProbe + ?Sized>(probe: &mut P) -> Reading<String> {
    match probe.local_address() {
        Ok(addr) => Reading::Measured(addr.to_string()),
        Err(e) => {
            error!("Failed to get IP address: {}", e);
            Reading::Fallback(IP_UNAVAILABLE.to_string())
        }
    }
}

/// CPU utilization over [`CPU_SAMPLE_WINDOW`], falling back to 0.0
pub fn read_cpu_usage<P: HostProbe + ?Sized>(probe: &mut P) -> Reading<f64> {
    match probe.cpu_percent(CPU_SAMPLE_WINDOW).and_then(to_percent) {
        Ok(cpu) => Reading::Measured(cpu),
        Err(e) => {
            error!("Failed to get CPU usage: {}", e);
            Reading::Fallback(0.0)
        }
    }
}

/// Root filesystem utilization, falling back to 0.0
pub fn read_disk_usage<P: HostProbe + ?Sized>(probe: &mut P) -> Reading<f64> {
    match probe
        .disk_percent(Path::new(ROOT_MOUNT))
        .and_then(to_percent)
    {
        Ok(disk) => Reading::Measured(disk),
        Err(e) => {
            error!("Failed to get disk usage: {}", e);
            Reading::Fallback(0.0)
        }
    }
}

/// Clamp a raw reading into 0..=100
fn to_percent(value: f64) -> Result<f64, MetricError> {
    if value.is_finite() {
        Ok(value.clamp(0.0, 100.0))
    } else {
        Err(MetricError::NotFinite)
    }
}
