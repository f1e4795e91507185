//! One reading session: a text, its timed sequence, the engine playing it
//! and the sink that hears about natural completion.

use alloc::string::String;

use log::{info, warn};

use crate::{
    clock::TickSource,
    config::ReaderConfig,
    playback::{PlaybackEngine, PlaybackFrame, TickResult},
    sequence::segment,
};

/// Text handed over by whatever supplies reading material.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadingText {
    pub id: String,
    pub content: String,
    pub title: Option<String>,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
}

/// Source of reading material (daily record, pasted text, archive entry).
pub trait TextProvider {
    type Error;

    fn load_text(&mut self) -> Result<ReadingText, Self::Error>;
}

/// Summary produced when a session plays through to its last word.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompletionReport {
    pub text_id: String,
    pub achieved_wpm: u32,
    pub word_count: usize,
}

/// Receiver of finished-session reports. Persistence is the sink's job.
pub trait CompletionSink {
    type Error;

    fn record_completion(&mut self, report: &CompletionReport) -> Result<(), Self::Error>;
}

/// Sink that drops every report.
#[derive(Default, Debug, Clone, Copy)]
pub struct NullSink;

impl CompletionSink for NullSink {
    type Error = core::convert::Infallible;

    fn record_completion(&mut self, _report: &CompletionReport) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct ReadingSession<S: CompletionSink> {
    text: ReadingText,
    engine: PlaybackEngine,
    sink: S,
    completions: u32,
}

impl<S: CompletionSink> ReadingSession<S> {
    pub fn new(text: ReadingText, config: &ReaderConfig, sink: S) -> Self {
        let profile = config.clone().normalized().speed_profile();
        let words = segment(&text.content, &profile);

        info!(
            "session: text={} words={} mode={} average_wpm={}",
            text.id,
            words.len(),
            config.mode.as_str(),
            words.average_wpm()
        );

        Self {
            text,
            engine: PlaybackEngine::new(words),
            sink,
            completions: 0,
        }
    }

    pub fn from_provider<P: TextProvider>(
        provider: &mut P,
        config: &ReaderConfig,
        sink: S,
    ) -> Result<Self, P::Error> {
        let text = provider.load_text()?;
        Ok(Self::new(text, config, sink))
    }

    pub fn text(&self) -> &ReadingText {
        &self.text
    }

    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Number of natural completions reported so far.
    pub fn completions(&self) -> u32 {
        self.completions
    }

    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    pub fn pause(&mut self) {
        self.engine.pause();
    }

    pub fn toggle(&mut self) {
        self.engine.toggle();
    }

    /// Rewinds to the first word and plays.
    pub fn restart(&mut self) {
        self.engine.scrub(0);
        self.engine.start();
    }

    pub fn scrub(&mut self, target: i64) {
        self.engine.scrub(target);
    }

    pub fn scrub_by(&mut self, delta: i64) {
        self.engine.scrub_by(delta);
    }

    pub fn frame(&self) -> PlaybackFrame<'_> {
        self.engine.frame()
    }

    pub fn drain_word_updates(&mut self) -> u32 {
        self.engine.drain_word_updates()
    }

    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let result = self.engine.tick(now_ms);
        if result.completed {
            self.report_completion();
        }
        result
    }

    /// Reads `clock` and ticks. A failing clock ends the session for the
    /// caller; the error is returned untouched.
    pub fn poll<T: TickSource>(&mut self, clock: &mut T) -> Result<TickResult, T::Error> {
        let now_ms = clock.now_ms()?;
        Ok(self.tick(now_ms))
    }

    fn report_completion(&mut self) {
        let words = self.engine.words();
        let report = CompletionReport {
            text_id: self.text.id.clone(),
            achieved_wpm: words.average_wpm(),
            word_count: words.len(),
        };

        self.completions = self.completions.saturating_add(1);
        info!(
            "session: completed text={} words={} achieved_wpm={}",
            report.text_id, report.word_count, report.achieved_wpm
        );

        if self.sink.record_completion(&report).is_err() {
            warn!("session: completion sink rejected report for text={}", report.text_id);
        }
    }
}
