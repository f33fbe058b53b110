//! Interrupt handling
//!
//! SIGINT and SIGTERM only set the shutdown flag; the stats loop notices it
//! between cycles and blanks the panel before returning.

use std::io;

use pistat_core::Shutdown;
use signal_hook::consts::{SIGINT, SIGTERM};
use tracing::debug;

/// Route SIGINT and SIGTERM to `shutdown`
pub fn register(shutdown: &Shutdown) -> io::Result<()> {
    for signal in [SIGINT, SIGTERM] {
        signal_hook::flag::register(signal, shutdown.flag())?;
    }
    debug!("Signal handlers registered (SIGINT, SIGTERM)");
    Ok(())
}
