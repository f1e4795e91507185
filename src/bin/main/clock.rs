use std::time::Instant;

use flashread_core::clock::TickSource;

/// Monotonic wall clock, in milliseconds since construction.
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl TickSource for SystemClock {
    type Error = core::convert::Infallible;

    fn now_ms(&mut self) -> Result<u64, Self::Error> {
        Ok(self.origin.elapsed().as_millis() as u64)
    }
}
