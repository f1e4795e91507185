//! Speed curves: WPM per word index and the WPM to duration conversion.

use heapless::Vec as HeaplessVec;

/// Shortest time a word may stay on screen.
pub const MIN_WORD_DURATION_MS: u32 = 50;
pub const MIN_WORD_DURATION_US: u64 = MIN_WORD_DURATION_MS as u64 * 1_000;

const MICROS_PER_MINUTE: u64 = 60_000_000;

/// Maximum number of tiers a stepped curve can carry.
pub const MAX_SPEED_TIERS: usize = 8;

/// Default ascending tier table for stepped playback.
pub const BLOCK_SPEEDS: [u16; 5] = [300, 450, 600, 750, 900];

const DAILY_MIN_WPM: u32 = 300;
const DAILY_MAX_WPM: u32 = 900;
const DAILY_STEP_WPM: u32 = 50;

const EASE_IN_WORDS: u16 = 5;
const EASE_IN_START_PCT: u8 = 60;

pub type SpeedTiers = HeaplessVec<u16, MAX_SPEED_TIERS>;

/// Converts a WPM value into a per-word display duration in microseconds.
///
/// Zero WPM maps to the floor instead of dividing by zero.
pub fn duration_us_for_wpm(wpm: u32) -> u64 {
    if wpm == 0 {
        return MIN_WORD_DURATION_US;
    }

    (MICROS_PER_MINUTE / wpm as u64).max(MIN_WORD_DURATION_US)
}

/// Float variant for host-supplied speeds. NaN, infinite and non-positive
/// values all collapse to [`MIN_WORD_DURATION_US`].
pub fn duration_us_for_wpm_f32(wpm: f32) -> u64 {
    if !wpm.is_finite() || wpm <= 0.0 {
        return MIN_WORD_DURATION_US;
    }

    let us = MICROS_PER_MINUTE as f64 / wpm as f64;
    if us >= u64::MAX as f64 {
        return u64::MAX;
    }

    (us as u64).max(MIN_WORD_DURATION_US)
}

/// How WPM varies across a word sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SpeedCurve {
    Constant { wpm: u16 },
    Linear { start: u16, end: u16 },
    Stepped { tiers: SpeedTiers },
}

impl SpeedCurve {
    pub const fn constant(wpm: u16) -> Self {
        Self::Constant { wpm }
    }

    pub const fn linear(start: u16, end: u16) -> Self {
        Self::Linear { start, end }
    }

    /// Stepped curve over the default [`BLOCK_SPEEDS`] table.
    pub fn stepped() -> Self {
        Self::stepped_with(&BLOCK_SPEEDS)
    }

    /// Stepped curve over a custom table. Extra tiers past
    /// [`MAX_SPEED_TIERS`] are ignored; an empty table falls back to
    /// [`BLOCK_SPEEDS`].
    pub fn stepped_with(tiers: &[u16]) -> Self {
        let source = if tiers.is_empty() {
            &BLOCK_SPEEDS[..]
        } else {
            tiers
        };

        let mut table = SpeedTiers::new();
        for &tier in source.iter().take(MAX_SPEED_TIERS) {
            let _ = table.push(tier);
        }

        Self::Stepped { tiers: table }
    }

    /// WPM assigned to the word at `index` in a sequence of `count` words.
    pub fn wpm_at(&self, index: usize, count: usize) -> u32 {
        match self {
            Self::Constant { wpm } => *wpm as u32,
            Self::Linear { start, end } => linear_wpm(*start, *end, index, count),
            Self::Stepped { tiers } => stepped_wpm(tiers, index, count),
        }
    }
}

fn linear_wpm(start: u16, end: u16, index: usize, count: usize) -> u32 {
    if count <= 1 {
        return start as u32;
    }

    let span = (count - 1) as i64;
    let index = (index as i64).min(span);
    let range = end as i64 - start as i64;

    // round-half-up of range * index / span
    let offset = (2 * range * index + span).div_euclid(2 * span);
    (start as i64 + offset).max(0) as u32
}

fn stepped_wpm(tiers: &[u16], index: usize, count: usize) -> u32 {
    let tiers = if tiers.is_empty() {
        &BLOCK_SPEEDS[..]
    } else {
        tiers
    };

    if count == 0 {
        return tiers[0] as u32;
    }

    let tier = (index * tiers.len()) / count;
    tiers[tier.min(tiers.len() - 1)] as u32
}

/// Opt-in ramp that eases the first words in from a fraction of the base
/// speed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EaseIn {
    pub ramp_words: u16,
    /// Percentage of the base speed applied to the first word.
    pub start_pct: u8,
}

impl Default for EaseIn {
    fn default() -> Self {
        Self {
            ramp_words: EASE_IN_WORDS,
            start_pct: EASE_IN_START_PCT,
        }
    }
}

impl EaseIn {
    fn apply(self, base_wpm: u32, index: usize) -> u32 {
        let ramp = self.ramp_words as usize;
        if index >= ramp {
            return base_wpm;
        }

        let start_pct = self.start_pct.min(100) as usize;
        let pct = start_pct + ((100 - start_pct) * index) / ramp;
        ((base_wpm as usize * pct) / 100) as u32
    }
}

/// A base curve plus an optional ease-in ramp.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpeedProfile {
    curve: SpeedCurve,
    ease_in: Option<EaseIn>,
}

impl SpeedProfile {
    pub const fn new(curve: SpeedCurve) -> Self {
        Self {
            curve,
            ease_in: None,
        }
    }

    pub const fn with_ease_in(mut self, ease_in: EaseIn) -> Self {
        self.ease_in = Some(ease_in);
        self
    }

    pub fn curve(&self) -> &SpeedCurve {
        &self.curve
    }

    pub fn ease_in(&self) -> Option<EaseIn> {
        self.ease_in
    }

    pub fn wpm_at(&self, index: usize, count: usize) -> u32 {
        let base = self.curve.wpm_at(index, count);
        match self.ease_in {
            Some(ease_in) => ease_in.apply(base, index),
            None => base,
        }
    }

    pub fn duration_us_at(&self, index: usize, count: usize) -> u64 {
        duration_us_for_wpm(self.wpm_at(index, count))
    }
}

impl From<SpeedCurve> for SpeedProfile {
    fn from(curve: SpeedCurve) -> Self {
        Self::new(curve)
    }
}

/// Deterministic challenge speed for a calendar date such as `2024-01-17`.
///
/// Always a multiple of 50 in `300..=900`.
pub fn daily_wpm(date: &str) -> u32 {
    let steps = (DAILY_MAX_WPM - DAILY_MIN_WPM) / DAILY_STEP_WPM + 1;
    DAILY_MIN_WPM + (date_hash(date) % steps) * DAILY_STEP_WPM
}

/// 32-bit `hash * 31 + unit` over the UTF-16 units of `date`, folded to its
/// magnitude.
pub(crate) fn date_hash(date: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in date.encode_utf16() {
        hash = hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(unit as i32);
    }
    hash.unsigned_abs()
}
