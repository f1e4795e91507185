//! Timed word sequences produced from raw text.

use alloc::{string::String, vec::Vec};

use log::debug;

use crate::{
    speed::{MIN_WORD_DURATION_US, SpeedProfile},
    text_policy::tokenize,
};

const MICROS_PER_MINUTE: u64 = 60_000_000;

/// One word and how long it stays on screen.
///
/// Durations are kept in microseconds so per-word rounding does not pile up
/// over long texts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WordUnit {
    text: String,
    duration_us: u64,
}

impl WordUnit {
    /// Durations below the 50 ms floor are raised to it.
    pub fn new(text: impl Into<String>, duration_ms: u32) -> Self {
        Self::from_micros(text, duration_ms as u64 * 1_000)
    }

    pub fn from_micros(text: impl Into<String>, duration_us: u64) -> Self {
        Self {
            text: text.into(),
            duration_us: duration_us.max(MIN_WORD_DURATION_US),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn duration_us(&self) -> u64 {
        self.duration_us
    }

    /// Whole milliseconds, truncated.
    pub fn duration_ms(&self) -> u32 {
        (self.duration_us / 1_000).min(u32::MAX as u64) as u32
    }

    pub fn wpm(&self) -> u32 {
        let wpm = (MICROS_PER_MINUTE + self.duration_us / 2) / self.duration_us;
        wpm.min(u32::MAX as u64) as u32
    }
}

/// Immutable, ordered list of [`WordUnit`]s for one playback session.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WordSequence {
    words: Vec<WordUnit>,
}

impl WordSequence {
    pub const fn empty() -> Self {
        Self { words: Vec::new() }
    }

    pub fn from_words(words: Vec<WordUnit>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WordUnit> {
        self.words.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, WordUnit> {
        self.words.iter()
    }

    pub fn as_slice(&self) -> &[WordUnit] {
        &self.words
    }

    pub fn total_duration_us(&self) -> u64 {
        self.words.iter().map(|w| w.duration_us).sum()
    }

    /// Time left from the start of `index` to the end of the sequence, in
    /// microseconds.
    pub fn duration_us_from(&self, index: usize) -> u64 {
        self.words.iter().skip(index).map(|w| w.duration_us).sum()
    }

    /// Effective speed over the whole sequence, `0` when empty.
    pub fn average_wpm(&self) -> u32 {
        let total = self.total_duration_us();
        if total == 0 {
            return 0;
        }

        let wpm = (self.words.len() as u64 * MICROS_PER_MINUTE + total / 2) / total;
        wpm.min(u32::MAX as u64) as u32
    }
}

impl<'a> IntoIterator for &'a WordSequence {
    type Item = &'a WordUnit;
    type IntoIter = core::slice::Iter<'a, WordUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.words.iter()
    }
}

/// Cleans `raw_text` into words and assigns every word its duration from
/// `profile`. Text with no usable words yields an empty sequence.
pub fn segment(raw_text: &str, profile: &SpeedProfile) -> WordSequence {
    let tokens = tokenize(raw_text);
    let count = tokens.len();

    let words = tokens
        .into_iter()
        .enumerate()
        .map(|(index, text)| WordUnit::from_micros(text, profile.duration_us_at(index, count)))
        .collect::<Vec<_>>();

    debug!(
        "segment: words={} curve={:?} ease_in={}",
        count,
        profile.curve(),
        profile.ease_in().is_some()
    );

    WordSequence::from_words(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speed::{SpeedCurve, SpeedProfile};
    use alloc::vec;

    fn texts(seq: &WordSequence) -> Vec<&str> {
        seq.iter().map(WordUnit::text).collect()
    }

    #[test]
    fn segmentation_is_deterministic() {
        let profile = SpeedProfile::new(SpeedCurve::linear(250, 700));
        let raw = "The journey of a thousand books begins with a single word.";
        assert_eq!(segment(raw, &profile), segment(raw, &profile));
    }

    #[test]
    fn durations_never_drop_below_floor() {
        let profiles = [
            SpeedProfile::new(SpeedCurve::constant(0)),
            SpeedProfile::new(SpeedCurve::constant(u16::MAX)),
            SpeedProfile::new(SpeedCurve::linear(0, 5_000)),
            SpeedProfile::new(SpeedCurve::stepped_with(&[0, 2_000, 9_000])),
        ];
        for profile in &profiles {
            let seq = segment("one two three four five six seven", profile);
            assert_eq!(seq.len(), 7);
            assert!(seq.iter().all(|w| w.duration_us() >= MIN_WORD_DURATION_US));
        }
    }

    #[test]
    fn linear_profile_assigns_durations_by_index() {
        let profile = SpeedProfile::new(SpeedCurve::linear(300, 600));
        let seq = segment("slow middle fast", &profile);
        let durations: Vec<u64> = seq.iter().map(WordUnit::duration_us).collect();
        assert_eq!(durations, vec![200_000, 133_333, 100_000]);
    }

    #[test]
    fn blank_input_is_empty_sequence() {
        let profile = SpeedProfile::new(SpeedCurve::stepped());
        assert!(segment("   ", &profile).is_empty());
        assert!(segment("\u{2014} -- ...", &profile).len() == 1);
    }

    #[test]
    fn dash_scenario_tokens() {
        let profile = SpeedProfile::new(SpeedCurve::constant(300));
        let seq = segment("Hello \u{2014} world, 2 times!", &profile);
        assert_eq!(texts(&seq), vec!["Hello", "world,", "2", "times!"]);
    }

    #[test]
    fn average_wpm_reflects_durations() {
        let seq = WordSequence::from_words(vec![WordUnit::new("a", 200), WordUnit::new("b", 100)]);
        assert_eq!(seq.total_duration_us(), 300_000);
        assert_eq!(seq.average_wpm(), 400);
        assert_eq!(seq.duration_us_from(1), 100_000);
        assert_eq!(WordSequence::empty().average_wpm(), 0);
    }

    #[test]
    fn word_unit_constructor_applies_floor() {
        assert_eq!(WordUnit::new("x", 0).duration_us(), MIN_WORD_DURATION_US);
        assert_eq!(WordUnit::new("x", 240).wpm(), 250);
    }

    #[test]
    fn long_text_keeps_its_speed() {
        let raw = vec!["word"; 1_000].join(" ");
        let seq = segment(&raw, &SpeedProfile::new(SpeedCurve::constant(900)));
        assert_eq!(seq.len(), 1_000);
        assert_eq!(seq.total_duration_us(), 66_666_000);
        assert_eq!(seq.average_wpm(), 900);
        assert_eq!(seq.get(0).map(WordUnit::wpm), Some(900));
    }

    #[test]
    fn average_wpm_is_exact_for_uneven_durations() {
        for wpm in [450u16, 700, 850, 900] {
            let raw = vec!["word"; 250].join(" ");
            let seq = segment(&raw, &SpeedProfile::new(SpeedCurve::constant(wpm)));
            assert_eq!(seq.average_wpm(), wpm as u32, "{wpm}");
        }
    }
}
