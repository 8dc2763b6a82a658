use std::time::{Duration, Instant};

use tracing::debug;

/// Wall clock timer for the expensive steps of a query, reported at debug
/// level.
pub struct Stopwatch {
    start_time: Instant,
    name: &'static str,
}

impl Stopwatch {
    pub fn new(name: &'static str) -> Self {
        Stopwatch {
            start_time: Instant::now(),
            name,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn report(&self) {
        debug!(
            step = self.name,
            elapsed_us = self.elapsed().as_micros() as u64,
            "Step finished"
        );
    }
}
