//! Test doubles shared by the unit tests in this crate

use std::io;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pistat_display::backend::{ensure_frame_size, BusErrorKind};
use pistat_display::{DisplayBackend, DisplayError, Framebuffer, Size};
use tracing_subscriber::fmt::MakeWriter;

use crate::metrics::{HostProbe, MetricError};
use crate::shutdown::Shutdown;

/// Probe returning fixed values, with switchable failures
pub struct ScriptedProbe {
    pub ip: IpAddr,
    pub cpu: f64,
    pub disk: f64,
    pub fail_ip: bool,
    pub fail_cpu: bool,
    pub fail_disk: bool,
    /// Windows passed to `cpu_percent`, one per call
    pub cpu_windows: Vec<Duration>,
    /// Mounts passed to `disk_percent`, one per call
    pub disk_mounts: Vec<PathBuf>,
    /// Request shutdown during the given (1-based) sample
    pub interrupt_on_sample: Option<(usize, Shutdown)>,
}

impl ScriptedProbe {
    pub fn new(ip: &str, cpu: f64, disk: f64) -> Self {
        Self {
            ip: ip.parse().unwrap(),
            cpu,
            disk,
            fail_ip: false,
            fail_cpu: false,
            fail_disk: false,
            cpu_windows: Vec::new(),
            disk_mounts: Vec::new(),
            interrupt_on_sample: None,
        }
    }

    pub fn samples(&self) -> usize {
        self.cpu_windows.len()
    }
}

impl HostProbe for ScriptedProbe {
    fn local_address(&mut self) -> Result<IpAddr, MetricError> {
        if self.fail_ip {
            return Err(MetricError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "socket creation refused",
            )));
        }
        Ok(self.ip)
    }

    fn cpu_percent(&mut self, window: Duration) -> Result<f64, MetricError> {
        self.cpu_windows.push(window);
        if let Some((n, shutdown)) = &self.interrupt_on_sample {
            if *n == self.cpu_windows.len() {
                shutdown.request();
            }
        }
        if self.fail_cpu {
            return Err(MetricError::NoCpus);
        }
        Ok(self.cpu)
    }

    fn disk_percent(&mut self, mount: &Path) -> Result<f64, MetricError> {
        self.disk_mounts.push(mount.to_path_buf());
        if self.fail_disk {
            return Err(MetricError::MountNotFound(mount.to_path_buf()));
        }
        Ok(self.disk)
    }
}

/// Calls seen by [`MockDisplay`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    Clear,
    /// Push of a frame; `true` if the frame was blank
    Push { blank: bool },
}

/// In-memory panel recording every call
pub struct MockDisplay {
    pub size: Size,
    pub events: Vec<DisplayEvent>,
    /// Copies of every pushed frame
    pub frames: Vec<Framebuffer>,
    pub fail_clear: bool,
    /// 1-based push numbers that fail
    pub fail_pushes: Vec<usize>,
    push_attempts: usize,
}

impl MockDisplay {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            events: Vec::new(),
            frames: Vec::new(),
            fail_clear: false,
            fail_pushes: Vec::new(),
            push_attempts: 0,
        }
    }

    pub fn pushes(&self) -> usize {
        self.frames.len()
    }

    pub fn clears(&self) -> usize {
        self.events
            .iter()
            .filter(|e| **e == DisplayEvent::Clear)
            .count()
    }
}

impl DisplayBackend for MockDisplay {
    fn size(&self) -> Size {
        self.size
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        if self.fail_clear {
            return Err(DisplayError::NotInitialized);
        }
        self.events.push(DisplayEvent::Clear);
        Ok(())
    }

    fn push_frame(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        self.push_attempts += 1;
        if self.fail_pushes.contains(&self.push_attempts) {
            return Err(DisplayError::Communication(BusErrorKind::Other));
        }
        ensure_frame_size(frame, self.size)?;
        self.events.push(DisplayEvent::Push {
            blank: frame.is_blank(),
        });
        self.frames.push(frame.clone());
        Ok(())
    }
}

/// Shared in-memory log sink
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a subscriber writing into memory; returns its result and the log text
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).into_owned();
    (result, logs)
}
