//! Host probe backed by the `sysinfo` crate
//!
//! Filesystem usage is read with `statvfs` so it matches `df`: blocks
//! reserved for root count neither as used nor as available.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use std::thread;
use std::time::Duration;

use nix::sys::statvfs::statvfs;
use sysinfo::{Disks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tracing::trace;

use super::address::{outbound_address, PROBE_TARGET};
use super::{HostProbe, MetricError};

/// Reads CPU and disk usage from the OS and discovers the outbound address
pub struct SysinfoProbe {
    system: System,
    target: SocketAddr,
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoProbe {
    /// Create a probe routing towards [`PROBE_TARGET`]
    pub fn new() -> Self {
        Self::with_target(PROBE_TARGET)
    }

    /// Create a probe routing towards a different address
    pub fn with_target(target: SocketAddr) -> Self {
        Self {
            system: System::new(),
            target,
        }
    }
}

impl HostProbe for SysinfoProbe {
    fn local_address(&mut self) -> Result<IpAddr, MetricError> {
        outbound_address(self.target)
    }

    fn cpu_percent(&mut self, window: Duration) -> Result<f64, MetricError> {
        // Usage is the delta between two refreshes
        self.system.refresh_cpu_usage();
        thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        self.system.refresh_cpu_usage();

        if self.system.cpus().is_empty() {
            return Err(MetricError::NoCpus);
        }

        let usage = self.system.global_cpu_usage();
        trace!(usage, cpus = self.system.cpus().len(), "CPU sampled");
        Ok(f64::from(usage))
    }

    fn disk_percent(&mut self, mount: &Path) -> Result<f64, MetricError> {
        let disks = Disks::new_with_refreshed_list();
        if !disks.list().iter().any(|disk| disk.mount_point() == mount) {
            return Err(MetricError::MountNotFound(mount.to_path_buf()));
        }

        filesystem_percent(mount)
    }
}

/// Used share of the filesystem holding `path`, in percent
pub fn filesystem_percent(path: &Path) -> Result<f64, MetricError> {
    let stat = statvfs(path).map_err(io::Error::from)?;
    let blocks = u64::from(stat.blocks());
    let free = u64::from(stat.blocks_free());
    let available = u64::from(stat.blocks_available());
    trace!(blocks, free, available, path = %path.display(), "Disk sampled");

    used_percent(blocks, free, available)
        .ok_or_else(|| MetricError::EmptyFilesystem(path.to_path_buf()))
}

/// `used / (used + available)` with `used = blocks - free`
///
/// `None` when nothing is usable.
fn used_percent(blocks: u64, free: u64, available: u64) -> Option<f64> {
    let used = blocks.saturating_sub(free);
    let capacity = used.saturating_add(available);
    if capacity == 0 {
        return None;
    }
    Some(used as f64 / capacity as f64 * 100.0)
}
