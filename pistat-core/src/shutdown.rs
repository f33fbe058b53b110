//! Cooperative shutdown token
//!
//! A signal handler sets the flag; the stats loop polls it between cycles
//! and while waiting for the next one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep while waiting, bounds how late a request is noticed
const WAIT_SLICE: Duration = Duration::from_millis(50);

/// Shared stop flag
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    flag: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a token that has not been triggered
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop has been requested
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// The underlying flag, for registering with a signal handler
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Sleep for `duration` or until a stop is requested
    ///
    /// Returns `true` if the wait ended because of a stop request.
    pub fn wait(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.is_requested() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep((deadline - now).min(WAIT_SLICE));
        }
    }
}
