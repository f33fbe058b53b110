//! pistat - OLED stats monitor
//!
//! Shows the outbound IP address, CPU load and root filesystem usage on an
//! SSD1306 panel wired to the board's I2C header, refreshed every couple of
//! seconds until interrupted.
//!
//! Startup order:
//! 1. Load configuration (`PISTAT_CONFIG`, default `/etc/pistat/pistat.toml`)
//! 2. Build the log dispatcher (`PISTAT_LOG` overrides the configured level)
//! 3. Register SIGINT/SIGTERM handlers
//! 4. Open and initialize the panel; failure here is fatal
//! 5. Run the stats loop until a signal arrives

mod config;
mod logging;
mod signals;

use std::process::ExitCode;

use anyhow::{Context, Result};
use linux_embedded_hal::I2cdev;
use pistat_core::config::{MonitorConfig, DISPLAY_ADDRESS, I2C_BUS, PANEL_SIZE};
use pistat_core::{HostProbe, Shutdown, StatsMonitor, SysinfoProbe};
use pistat_display::{DisplayBackend, Ssd1306};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let (config, source) = config::load();
    let dispatch = logging::build_dispatch(&config.logging);

    tracing::dispatcher::with_default(&dispatch, || {
        info!("pistat {} starting...", env!("CARGO_PKG_VERSION"));
        source.log(&config);

        let shutdown = Shutdown::new();
        if let Err(e) = signals::register(&shutdown) {
            warn!("Failed to register signal handlers: {}", e);
        }

        run(&config, shutdown, open_display, SysinfoProbe::new())
    })
}

/// Bring the panel up and cycle until `shutdown` is requested
///
/// A panel that cannot be opened or blanked is fatal: nothing is sampled
/// or drawn and the process exits non-zero.
fn run<D, P>(
    config: &MonitorConfig,
    shutdown: Shutdown,
    open: impl FnOnce() -> Result<D>,
    probe: P,
) -> ExitCode
where
    D: DisplayBackend,
    P: HostProbe,
{
    let display = match open() {
        Ok(display) => display,
        Err(e) => {
            error!("Failed to initialize OLED display: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut monitor =
        match StatsMonitor::initialize(display, probe, config.refresh_interval(), shutdown) {
            Ok(monitor) => monitor,
            Err(e) => {
                error!("Failed to initialize OLED display: {}", e);
                return ExitCode::FAILURE;
            }
        };

    monitor.run();
    info!("pistat exiting");
    ExitCode::SUCCESS
}

/// Open the header I2C bus and bring the panel up
fn open_display() -> Result<Ssd1306<I2cdev>> {
    let i2c = I2cdev::new(I2C_BUS).with_context(|| format!("opening I2C bus {}", I2C_BUS))?;

    let mut display =
        Ssd1306::new(i2c, DISPLAY_ADDRESS, PANEL_SIZE).context("configuring SSD1306 driver")?;
    display
        .init()
        .with_context(|| format!("initializing SSD1306 at address {:#04x}", DISPLAY_ADDRESS))?;

    info!(
        "OLED initialized on {} at {:#04x} ({}x{})",
        I2C_BUS, DISPLAY_ADDRESS, PANEL_SIZE.width, PANEL_SIZE.height
    );
    Ok(display)
}
