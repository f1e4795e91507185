use super::*;
use crate::{
    clock::{ManualClock, TickSource},
    sequence::{WordSequence, WordUnit, segment},
    speed::{SpeedCurve, SpeedProfile},
};
use alloc::{rc::Rc, vec::Vec};
use core::cell::Cell;

fn uniform(count: usize, duration_ms: u32) -> WordSequence {
    let words = (0..count)
        .map(|i| WordUnit::new(alloc::format!("w{i}"), duration_ms))
        .collect::<Vec<_>>();
    WordSequence::from_words(words)
}

fn counting_engine(words: WordSequence) -> (PlaybackEngine, Rc<Cell<u32>>) {
    let fired = Rc::new(Cell::new(0));
    let hook = fired.clone();
    let engine = PlaybackEngine::new(words).with_on_complete(move || hook.set(hook.get() + 1));
    (engine, fired)
}

struct BrokenClock;

impl TickSource for BrokenClock {
    type Error = &'static str;

    fn now_ms(&mut self) -> Result<u64, Self::Error> {
        Err("timer stalled")
    }
}

#[test]
fn first_tick_only_records_baseline() {
    let mut engine = PlaybackEngine::new(uniform(3, 200));
    engine.start();

    assert_eq!(engine.tick(10_000), TickResult::default());
    assert_eq!(engine.index(), 0);
    assert_eq!(engine.state().accumulated_ms, 0);
}

#[test]
fn long_tick_consumes_multiple_words() {
    let mut engine = PlaybackEngine::new(uniform(10, 200));
    engine.start();
    engine.tick(1_000);

    let result = engine.tick(1_450);
    assert_eq!(result.advanced, 2);
    assert!(!result.completed);
    assert_eq!(engine.state(), PlaybackState {
        index: 2,
        is_playing: true,
        accumulated_ms: 50,
    });
}

#[test]
fn index_is_monotonic_under_jitter() {
    let mut engine = PlaybackEngine::new(uniform(50, 120));
    engine.start();

    let deltas = [0u64, 16, 17, 33, 5, 250, 16, 1, 90, 400, 16, 16, 16];
    let mut now = 0u64;
    let mut prev_index = 0usize;
    let mut total_ms = 0u64;
    for delta in deltas {
        now += delta;
        total_ms += delta;
        let before = engine.index();
        let result = engine.tick(now);
        assert!(engine.index() >= prev_index);
        assert_eq!(engine.index() - before, result.advanced);
        prev_index = engine.index();
    }

    // first tick only sets the baseline
    assert_eq!(engine.index() as u64, total_ms / 120);
    assert_eq!(engine.state().accumulated_ms, total_ms % 120);
}

#[test]
fn completion_fires_once_and_parks_on_last_word() {
    let (mut engine, fired) = counting_engine(uniform(4, 100));
    engine.start();
    engine.tick(0);

    let result = engine.tick(10_000);
    assert!(result.completed);
    assert_eq!(result.advanced, 3);
    assert_eq!(engine.index(), 3);
    assert_eq!(fired.get(), 1);
    assert!(engine.is_finished());

    engine.tick(20_000);
    engine.tick(30_000);
    assert_eq!(fired.get(), 1);
    assert_eq!(engine.index(), 3);
}

#[test]
fn completion_waits_for_last_word_duration() {
    let (mut engine, fired) = counting_engine(uniform(2, 100));
    engine.start();
    engine.tick(0);

    engine.tick(150);
    assert_eq!(engine.index(), 1);
    assert_eq!(fired.get(), 0);

    let result = engine.tick(199);
    assert!(!result.completed);

    let result = engine.tick(200);
    assert!(result.completed);
    assert_eq!(fired.get(), 1);
}

#[test]
fn restarting_after_finish_is_a_new_run() {
    let (mut engine, fired) = counting_engine(uniform(3, 100));
    engine.start();
    engine.tick(0);
    engine.tick(1_000);
    assert_eq!(fired.get(), 1);

    engine.scrub(0);
    assert_eq!(engine.phase(), PlaybackPhase::Idle);
    engine.start();
    engine.tick(2_000);
    engine.tick(3_000);
    assert_eq!(fired.get(), 2);
    assert_eq!(engine.index(), 2);
}

#[test]
fn scrub_clamps_and_resets_accumulated_time() {
    let mut engine = PlaybackEngine::new(uniform(10, 200));
    engine.start();
    engine.tick(0);
    engine.tick(450);
    assert_eq!(engine.state().accumulated_ms, 50);

    engine.scrub(-5);
    assert_eq!(engine.index(), 0);
    assert_eq!(engine.state().accumulated_ms, 0);

    engine.tick(500);
    engine.tick(550);
    engine.scrub(999);
    assert_eq!(engine.index(), 9);
    assert_eq!(engine.state().accumulated_ms, 0);
    assert!(engine.is_running());
}

#[test]
fn scrub_keeps_playing_from_new_position() {
    let mut engine = PlaybackEngine::new(uniform(10, 200));
    engine.start();
    engine.tick(0);
    engine.tick(100);

    engine.scrub(5);
    // scrub clears the baseline so the next tick only re-anchors
    assert_eq!(engine.tick(150).advanced, 0);
    assert_eq!(engine.tick(350).advanced, 1);
    assert_eq!(engine.index(), 6);
}

#[test]
fn scrub_by_moves_relative_to_current_word() {
    let mut engine = PlaybackEngine::new(uniform(6, 200));
    engine.scrub_by(3);
    assert_eq!(engine.index(), 3);
    engine.scrub_by(-10);
    assert_eq!(engine.index(), 0);
    assert_eq!(engine.phase(), PlaybackPhase::Idle);
}

#[test]
fn pause_preserves_state_for_exact_resume() {
    let mut engine = PlaybackEngine::new(uniform(10, 200));
    engine.start();
    engine.tick(0);
    engine.tick(330);
    assert_eq!(engine.index(), 1);
    assert_eq!(engine.state().accumulated_ms, 130);

    engine.pause();
    assert!(!engine.state().is_playing);
    assert_eq!(engine.tick(5_000), TickResult::default());
    assert_eq!(engine.state().accumulated_ms, 130);

    engine.resume();
    assert_eq!(engine.tick(60_000).advanced, 0);
    assert_eq!(engine.tick(60_069).advanced, 0);
    assert_eq!(engine.tick(60_070).advanced, 1);
    assert_eq!(engine.index(), 2);
    assert_eq!(engine.state().accumulated_ms, 0);
}

#[test]
fn toggle_flips_between_running_and_idle() {
    let mut engine = PlaybackEngine::new(uniform(2, 200));
    engine.toggle();
    assert!(engine.is_running());
    engine.toggle();
    assert_eq!(engine.phase(), PlaybackPhase::Idle);
}

#[test]
fn clock_regression_adds_no_time() {
    let mut engine = PlaybackEngine::new(uniform(5, 200));
    engine.start();
    engine.tick(1_000);
    engine.tick(1_150);
    engine.tick(900);
    assert_eq!(engine.state().accumulated_ms, 150);
    engine.tick(1_100);
    assert_eq!(engine.index(), 1);
    assert_eq!(engine.state().accumulated_ms, 150);
}

#[test]
fn empty_sequence_ignores_commands() {
    let (mut engine, fired) = counting_engine(WordSequence::empty());
    engine.start();
    assert_eq!(engine.phase(), PlaybackPhase::Idle);
    assert!(engine.current_word().is_none());

    engine.scrub(3);
    engine.tick(0);
    engine.tick(10_000);
    assert_eq!(engine.index(), 0);
    assert_eq!(engine.progress(), 0.0);
    assert_eq!(fired.get(), 0);

    let frame = engine.frame();
    assert!(frame.current_word.is_none());
    assert_eq!(frame.index, 0);
}

#[test]
fn blank_text_yields_engine_that_refuses_to_start() {
    let profile = SpeedProfile::new(SpeedCurve::linear(300, 900));
    let mut engine = PlaybackEngine::new(segment("   ", &profile));
    engine.start();
    assert!(!engine.is_running());
    assert!(engine.current_word().is_none());
}

#[test]
fn progress_and_frame_follow_index() {
    let mut engine = PlaybackEngine::new(uniform(4, 100));
    assert_eq!(engine.progress(), 0.0);
    engine.scrub(2);
    assert_eq!(engine.progress(), 0.5);

    let frame = engine.frame();
    assert_eq!(frame.index, 2);
    assert_eq!(frame.current_word.map(WordUnit::text), Some("w2"));
    engine.scrub(3);
    assert!(engine.progress() < 1.0);
}

#[test]
fn poll_propagates_clock_failure() {
    let mut engine = PlaybackEngine::new(uniform(3, 100));
    engine.start();
    assert_eq!(engine.poll(&mut BrokenClock), Err("timer stalled"));
    assert_eq!(engine.index(), 0);
}

#[test]
fn poll_reads_injected_clock() {
    let mut engine = PlaybackEngine::new(uniform(5, 100));
    let mut clock = ManualClock::new(500);
    engine.start();

    assert_eq!(engine.poll(&mut clock).map(|r| r.advanced), Ok(0));
    clock.advance(250);
    assert_eq!(engine.poll(&mut clock).map(|r| r.advanced), Ok(2));
    assert_eq!(engine.state().accumulated_ms, 50);
}

#[test]
fn drain_counts_words_between_reports() {
    let mut engine = PlaybackEngine::new(uniform(10, 100));
    engine.start();
    engine.tick(0);
    engine.tick(350);
    assert_eq!(engine.drain_word_updates(), 3);
    assert_eq!(engine.drain_word_updates(), 0);
    engine.tick(550);
    assert_eq!(engine.drain_word_updates(), 2);
}

#[test]
fn remaining_time_counts_down() {
    let mut engine = PlaybackEngine::new(uniform(4, 100));
    assert_eq!(engine.remaining_ms(), 400);
    engine.start();
    engine.tick(0);
    engine.tick(130);
    assert_eq!(engine.remaining_ms(), 270);
}

#[test]
fn sub_millisecond_durations_do_not_drift() {
    // 900 wpm is 66.666 ms per word
    let profile = SpeedProfile::new(SpeedCurve::constant(900));
    let raw = alloc::vec!["word"; 1_000].join(" ");
    let (mut engine, fired) = counting_engine(segment(&raw, &profile));
    assert_eq!(engine.remaining_ms(), 66_666);

    let mut clock = ManualClock::default();
    engine.start();
    assert_eq!(engine.poll(&mut clock).map(|r| r.advanced), Ok(0));

    clock.set(33_350);
    assert_eq!(engine.poll(&mut clock).map(|r| r.advanced), Ok(500));
    assert_eq!(engine.state().accumulated_ms, 17);

    clock.set(66_665);
    assert_eq!(engine.poll(&mut clock).map(|r| r.completed), Ok(false));
    assert_eq!(engine.index(), 999);

    clock.advance(1);
    assert_eq!(clock.now(), 66_666);
    assert_eq!(engine.poll(&mut clock).map(|r| r.completed), Ok(true));
    assert_eq!(fired.get(), 1);
}

#[test]
fn per_word_durations_are_honored() {
    let words = WordSequence::from_words(alloc::vec![
        WordUnit::new("slow", 300),
        WordUnit::new("fast", 60),
        WordUnit::new("end", 100),
    ]);
    let mut engine = PlaybackEngine::new(words);
    engine.start();
    engine.tick(0);

    assert_eq!(engine.tick(299).advanced, 0);
    assert_eq!(engine.tick(300).advanced, 1);
    assert_eq!(engine.tick(359).advanced, 0);
    assert_eq!(engine.tick(360).advanced, 1);
    assert_eq!(engine.current_word().map(WordUnit::text), Some("end"));
}
