//! Stats display loop
//!
//! The monitor owns the panel, the metric probe and a single framebuffer.
//! Each cycle it:
//! - Erases the framebuffer
//! - Samples the address, CPU and disk usage
//! - Draws three text rows and pushes the frame
//! - Waits for the refresh interval
//!
//! A failed push is logged and the next cycle runs as normal. The loop exits
//! only when the [`Shutdown`] token is triggered, blanking the panel on the
//! way out.

use std::time::Duration;

use pistat_display::{DisplayBackend, DisplayError, Framebuffer, Screen};
use tracing::{debug, error, info, warn};

use crate::metrics::{HostProbe, MetricSnapshot};
use crate::shutdown::Shutdown;

/// Delay between cycles unless configured otherwise
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(2);

/// Lifecycle of the loop after a successful initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Cycling
    Running,
    /// Stop requested, blanking the panel
    ShuttingDown,
    /// Panel blanked, loop finished
    Stopped,
}

/// Totals reported when the loop finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Cycles started
    pub cycles: u64,
    /// Cycles abandoned because of a display error
    pub faults: u64,
}

/// Stats display loop
pub struct StatsMonitor<D, P> {
    /// Panel the frames are pushed to
    display: D,
    /// Metric source
    probe: P,
    /// Frame reused for every cycle
    framebuffer: Framebuffer,
    /// Text layout reused for every cycle
    screen: Screen,
    /// Delay between cycles
    refresh_interval: Duration,
    /// Stop flag
    shutdown: Shutdown,
    /// Current lifecycle state
    state: MonitorState,
    /// Running totals
    summary: RunSummary,
}

impl<D, P> StatsMonitor<D, P>
where
    D: DisplayBackend,
    P: HostProbe,
{
    /// Allocate the framebuffer and blank the panel
    ///
    /// Fails if the panel cannot be cleared; nothing is pushed in that case.
    pub fn initialize(
        mut display: D,
        probe: P,
        refresh_interval: Duration,
        shutdown: Shutdown,
    ) -> Result<Self, DisplayError> {
        let framebuffer = Framebuffer::new(display.size());

        display.clear()?;
        display.push_frame(&framebuffer)?;

        info!(
            width = framebuffer.width(),
            height = framebuffer.height(),
            "Display ready"
        );

        Ok(Self {
            display,
            probe,
            framebuffer,
            screen: Screen::new(),
            refresh_interval,
            shutdown,
            state: MonitorState::Running,
            summary: RunSummary::default(),
        })
    }

    /// Cycle until shutdown is requested, then blank the panel
    pub fn run(&mut self) -> RunSummary {
        info!(
            refresh_ms = self.refresh_interval.as_millis() as u64,
            "Stats loop started"
        );

        while !self.shutdown.is_requested() {
            self.summary.cycles += 1;

            match self.run_cycle() {
                Ok(snapshot) => {
                    debug!(
                        cycle = self.summary.cycles,
                        ip = %snapshot.ip.value(),
                        cpu = *snapshot.cpu.value(),
                        disk = *snapshot.disk.value(),
                        "Frame pushed"
                    );
                }
                Err(e) => {
                    self.summary.faults += 1;
                    error!("Error in main loop: {}", e);
                }
            }

            self.shutdown.wait(self.refresh_interval);
        }

        self.shut_down();
        self.summary
    }

    /// Run one cycle: erase, sample, draw, push
    pub fn run_cycle(&mut self) -> Result<MetricSnapshot, DisplayError> {
        self.framebuffer.clear();

        let snapshot = MetricSnapshot::sample(&mut self.probe);
        snapshot.write_to(&mut self.screen);
        if let Err(never) = self.screen.render(&mut self.framebuffer) {
            match never {}
        }

        self.display.push_frame(&self.framebuffer)?;
        Ok(snapshot)
    }

    /// Blank the panel and mark the loop stopped
    fn shut_down(&mut self) {
        info!("Shutdown requested, clearing display");
        self.set_state(MonitorState::ShuttingDown);

        self.framebuffer.clear();
        self.screen.clear();
        if let Err(e) = self.blank_display() {
            warn!("Failed to clear display on shutdown: {}", e);
        }

        self.set_state(MonitorState::Stopped);
        info!(
            cycles = self.summary.cycles,
            faults = self.summary.faults,
            "Stats loop stopped"
        );
    }

    fn set_state(&mut self, state: MonitorState) {
        debug!(from = ?self.state, to = ?state, "Monitor state changed");
        self.state = state;
    }

    fn blank_display(&mut self) -> Result<(), DisplayError> {
        self.display.clear()?;
        self.display.push_frame(&self.framebuffer)
    }

    /// Current lifecycle state
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Frame drawn by the most recent cycle
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Text drawn by the most recent cycle
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The panel
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The metric source
    pub fn probe_mut(&mut self) -> &mut P {
        &mut self.probe
    }

    /// Totals so far
    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}
