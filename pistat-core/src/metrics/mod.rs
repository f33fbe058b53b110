//! Host metric sampling
//!
//! A [`HostProbe`] answers the three questions the monitor asks every cycle.
//! Probes report failures as [`MetricError`]; the snapshot layer turns each
//! failure into a logged fallback so a bad reading never aborts a cycle.

pub mod address;
pub mod reading;
pub mod snapshot;
pub mod system;

use std::io;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

pub use address::{outbound_address, PROBE_TARGET};
pub use reading::Reading;
pub use snapshot::{MetricSnapshot, CPU_SAMPLE_WINDOW, IP_UNAVAILABLE, ROOT_MOUNT};
pub use system::SysinfoProbe;

/// Errors reported by a metric probe
#[derive(Debug, Error)]
pub enum MetricError {
    /// Socket or filesystem call failed
    #[error("{0}")]
    Io(#[from] io::Error),
    /// The OS picked no usable local address for the outbound route
    #[error("no outbound route")]
    NoRoute,
    /// The OS reported no CPUs
    #[error("no CPU information available")]
    NoCpus,
    /// Nothing is mounted at the requested path
    #[error("no filesystem mounted at {}", .0.display())]
    MountNotFound(PathBuf),
    /// The filesystem reports zero capacity
    #[error("filesystem at {} reports zero size", .0.display())]
    EmptyFilesystem(PathBuf),
    /// A percentage came back as NaN or infinity
    #[error("reading is not a finite number")]
    NotFinite,
}

/// Source of host metrics
pub trait HostProbe {
    /// Local address the OS would use for outbound traffic
    fn local_address(&mut self) -> Result<IpAddr, MetricError>;

    /// CPU utilization averaged over `window`, in percent
    ///
    /// Blocks for roughly `window`.
    fn cpu_percent(&mut self, window: Duration) -> Result<f64, MetricError>;

    /// Used space of the filesystem mounted at `mount`, in percent
    fn disk_percent(&mut self, mount: &Path) -> Result<f64, MetricError>;
}

impl<T: HostProbe + ?Sized> HostProbe for &mut T {
    fn local_address(&mut self) -> Result<IpAddr, MetricError> {
        (**self).local_address()
    }

    fn cpu_percent(&mut self, window: Duration) -> Result<f64, MetricError> {
        (**self).cpu_percent(window)
    }

    fn disk_percent(&mut self, mount: &Path) -> Result<f64, MetricError> {
        (**self).disk_percent(mount)
    }
}
