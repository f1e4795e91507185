//! Tick source abstraction.

/// Monotonic millisecond clock driving playback.
///
/// Failing to read the clock is fatal for a session; [`crate::playback`]
/// hands the error back to the caller untouched.
pub trait TickSource {
    type Error;

    fn now_ms(&mut self) -> Result<u64, Self::Error>;
}

/// Clock that only moves when told to, used by tests and scripted replays.
#[derive(Default, Debug, Clone, Copy)]
pub struct ManualClock {
    now_ms: u64,
}

impl ManualClock {
    pub const fn new(start_ms: u64) -> Self {
        Self { now_ms: start_ms }
    }

    pub fn advance(&mut self, delta_ms: u64) {
        self.now_ms = self.now_ms.saturating_add(delta_ms);
    }

    pub fn set(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
    }

    pub const fn now(&self) -> u64 {
        self.now_ms
    }
}

impl TickSource for ManualClock {
    type Error = core::convert::Infallible;

    fn now_ms(&mut self) -> Result<u64, Self::Error> {
        Ok(self.now_ms)
    }
}
