//! Clock-driven RSVP playback state machine.
//!
//! The engine owns one [`WordSequence`] and advances through it as time is
//! fed in through [`PlaybackEngine::tick`]. Time within the current word is
//! accumulated and consumed with a loop-subtract, so a late tick advances
//! by every word it covers instead of skipping or drifting. Ticks arrive in
//! milliseconds; word time is tracked in microseconds.

use alloc::boxed::Box;
use core::fmt;

use log::{debug, warn};

use crate::{
    clock::TickSource,
    sequence::{WordSequence, WordUnit},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackPhase {
    Idle,
    Running,
    Finished,
}

/// Externally visible timing state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlaybackState {
    pub index: usize,
    pub is_playing: bool,
    /// Time spent on the current word, truncated to whole milliseconds.
    pub accumulated_ms: u64,
}

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct TickResult {
    /// Words advanced during this tick.
    pub advanced: usize,
    /// The run reached its natural end during this tick.
    pub completed: bool,
}

impl TickResult {
    pub const fn requests_render(self) -> bool {
        self.advanced > 0 || self.completed
    }
}

/// Per-tick view handed to renderers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackFrame<'a> {
    pub current_word: Option<&'a WordUnit>,
    pub progress: f32,
    pub index: usize,
}

type CompletionHook = Box<dyn FnMut()>;

pub struct PlaybackEngine {
    words: WordSequence,
    phase: PlaybackPhase,
    index: usize,
    accumulated_us: u64,
    last_tick_ms: Option<u64>,
    words_since_drain: u32,
    on_complete: Option<CompletionHook>,
}

impl fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("len", &self.words.len())
            .field("phase", &self.phase)
            .field("index", &self.index)
            .field("accumulated_us", &self.accumulated_us)
            .field("last_tick_ms", &self.last_tick_ms)
            .finish_non_exhaustive()
    }
}

impl PlaybackEngine {
    pub fn new(words: WordSequence) -> Self {
        Self {
            words,
            phase: PlaybackPhase::Idle,
            index: 0,
            accumulated_us: 0,
            last_tick_ms: None,
            words_since_drain: 0,
            on_complete: None,
        }
    }

    /// Registers a callback fired once each time a run finishes naturally.
    pub fn with_on_complete<F>(mut self, on_complete: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.on_complete = Some(Box::new(on_complete));
        self
    }

    pub fn words(&self) -> &WordSequence {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == PlaybackPhase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == PlaybackPhase::Finished
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            index: self.index,
            is_playing: self.is_running(),
            accumulated_ms: self.accumulated_us / 1_000,
        }
    }

    pub fn current_word(&self) -> Option<&WordUnit> {
        self.words.get(self.index)
    }

    /// `index / max(len, 1)`; never reaches `1.0`.
    pub fn progress(&self) -> f32 {
        self.index as f32 / self.words.len().max(1) as f32
    }

    pub fn frame(&self) -> PlaybackFrame<'_> {
        PlaybackFrame {
            current_word: self.current_word(),
            progress: self.progress(),
            index: self.index,
        }
    }

    /// Time left in the run, counting from the current position.
    pub fn remaining_ms(&self) -> u64 {
        self.words
            .duration_us_from(self.index)
            .saturating_sub(self.accumulated_us)
            / 1_000
    }

    /// Words advanced since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    /// Starts or resumes autonomous playback from the current position.
    /// Ignored on an empty sequence.
    pub fn start(&mut self) {
        if self.words.is_empty() {
            debug!("playback: start ignored, empty sequence");
            return;
        }

        if self.phase == PlaybackPhase::Running {
            return;
        }

        debug!(
            "playback: start index={} accumulated_us={} from={:?}",
            self.index, self.accumulated_us, self.phase
        );
        self.phase = PlaybackPhase::Running;
        self.last_tick_ms = None;
    }

    pub fn resume(&mut self) {
        self.start();
    }

    /// Stops autonomous playback, keeping index and accumulated time.
    pub fn pause(&mut self) {
        if self.phase != PlaybackPhase::Running {
            return;
        }

        debug!(
            "playback: pause index={} accumulated_us={}",
            self.index, self.accumulated_us
        );
        self.phase = PlaybackPhase::Idle;
        self.last_tick_ms = None;
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Jumps to `target`, clamped into the sequence. Play/pause state is
    /// kept; a finished run becomes idle.
    pub fn scrub(&mut self, target: i64) {
        if self.words.is_empty() {
            return;
        }

        let last = (self.words.len() - 1) as i64;
        let index = target.clamp(0, last) as usize;

        debug!("playback: scrub target={} index={}", target, index);
        self.index = index;
        self.accumulated_us = 0;
        self.last_tick_ms = None;
        if self.phase == PlaybackPhase::Finished {
            self.phase = PlaybackPhase::Idle;
        }
    }

    pub fn scrub_by(&mut self, delta: i64) {
        self.scrub((self.index as i64).saturating_add(delta));
    }

    /// Feeds the current timestamp. The first tick of a run only records
    /// the baseline.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let mut result = TickResult::default();
        if self.phase != PlaybackPhase::Running {
            return result;
        }

        let Some(last_ms) = self.last_tick_ms.replace(now_ms) else {
            return result;
        };

        if now_ms < last_ms {
            warn!(
                "playback: clock went backwards last_ms={} now_ms={}",
                last_ms, now_ms
            );
        }
        let elapsed_us = now_ms.saturating_sub(last_ms).saturating_mul(1_000);
        self.accumulated_us = self.accumulated_us.saturating_add(elapsed_us);

        while let Some(word) = self.words.get(self.index) {
            let duration = word.duration_us();
            if self.accumulated_us < duration {
                break;
            }

            if self.index + 1 >= self.words.len() {
                self.finish();
                result.completed = true;
                break;
            }

            self.accumulated_us -= duration;
            self.index += 1;
            result.advanced += 1;
        }

        self.words_since_drain = self
            .words_since_drain
            .saturating_add(result.advanced as u32);
        result
    }

    /// Reads `clock` and ticks. Clock failures are returned as-is.
    pub fn poll<T: TickSource>(&mut self, clock: &mut T) -> Result<TickResult, T::Error> {
        let now_ms = clock.now_ms()?;
        Ok(self.tick(now_ms))
    }

    fn finish(&mut self) {
        debug!("playback: finished words={}", self.words.len());
        self.phase = PlaybackPhase::Finished;
        self.accumulated_us = 0;
        self.last_tick_ms = None;
        if let Some(on_complete) = self.on_complete.as_mut() {
            on_complete();
        }
    }
}

#[cfg(test)]
mod tests;
