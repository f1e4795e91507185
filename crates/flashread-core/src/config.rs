//! Reader configuration and its mapping onto a [`SpeedProfile`].

use crate::speed::{BLOCK_SPEEDS, EaseIn, SpeedCurve, SpeedProfile, SpeedTiers};

const WPM_STEP: u16 = 10;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SpeedMode {
    Constant,
    Linear,
    Stepped,
}

impl SpeedMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Linear => "linear",
            Self::Stepped => "stepped",
        }
    }

    /// Accepts `block` as an alias of `stepped`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "constant" => Some(Self::Constant),
            "linear" => Some(Self::Linear),
            "stepped" | "block" => Some(Self::Stepped),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub mode: SpeedMode,
    /// Constant speed, or the first word of a linear ramp.
    pub start_wpm: u16,
    pub end_wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub ease_in: bool,
    pub tiers: SpeedTiers,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            mode: SpeedMode::Linear,
            start_wpm: 300,
            end_wpm: 600,
            min_wpm: 100,
            max_wpm: 2_000,
            ease_in: false,
            tiers: SpeedTiers::from_slice(&BLOCK_SPEEDS).unwrap_or_default(),
        }
    }
}

impl ReaderConfig {
    pub fn constant(wpm: u16) -> Self {
        Self {
            mode: SpeedMode::Constant,
            start_wpm: wpm,
            end_wpm: wpm,
            ..Self::default()
        }
    }

    pub fn linear(start_wpm: u16, end_wpm: u16) -> Self {
        Self {
            mode: SpeedMode::Linear,
            start_wpm,
            end_wpm,
            ..Self::default()
        }
    }

    pub fn stepped() -> Self {
        Self {
            mode: SpeedMode::Stepped,
            ..Self::default()
        }
    }

    pub fn with_ease_in(mut self, ease_in: bool) -> Self {
        self.ease_in = ease_in;
        self
    }

    /// Swaps inverted bounds, clamps both speeds into them and, for a linear
    /// ramp, never lets the end fall below the start.
    pub fn normalized(mut self) -> Self {
        if self.max_wpm < self.min_wpm {
            core::mem::swap(&mut self.max_wpm, &mut self.min_wpm);
        }
        self.start_wpm = self.start_wpm.clamp(self.min_wpm, self.max_wpm);
        self.end_wpm = self.end_wpm.clamp(self.min_wpm, self.max_wpm);

        if self.mode == SpeedMode::Linear && self.end_wpm < self.start_wpm {
            self.end_wpm = self.start_wpm;
        }
        self
    }

    /// Nudges the start speed by one step. Returns whether it changed.
    pub fn adjust_wpm(&mut self, increase: bool) -> bool {
        let next = if increase {
            self.start_wpm.saturating_add(WPM_STEP).min(self.max_wpm)
        } else {
            self.start_wpm.saturating_sub(WPM_STEP).max(self.min_wpm)
        };

        if next == self.start_wpm {
            return false;
        }

        self.start_wpm = next;
        if self.mode == SpeedMode::Linear && self.end_wpm < next {
            self.end_wpm = next;
        }
        true
    }

    pub fn speed_profile(&self) -> SpeedProfile {
        let curve = match self.mode {
            SpeedMode::Constant => SpeedCurve::constant(self.start_wpm),
            SpeedMode::Linear => SpeedCurve::linear(self.start_wpm, self.end_wpm),
            SpeedMode::Stepped => SpeedCurve::stepped_with(&self.tiers),
        };

        let profile = SpeedProfile::new(curve);
        if self.ease_in {
            profile.with_ease_in(EaseIn::default())
        } else {
            profile
        }
    }
}
