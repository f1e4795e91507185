use std::path::PathBuf;

use clap::Parser;
use flashread_core::{
    config::{ReaderConfig, SpeedMode},
    speed::daily_wpm,
};

/// Terminal RSVP speed-reading trainer.
#[derive(Debug, Parser)]
#[command(name = "flashread", version)]
pub struct Args {
    /// Text file to read, `-` for stdin. Defaults to a bundled practice text.
    pub file: Option<PathBuf>,

    /// Speed curve: constant, linear or stepped (alias: block).
    #[arg(long, value_parser = parse_mode, default_value = "linear")]
    pub mode: SpeedMode,

    /// Constant speed, or the start of a linear ramp.
    #[arg(long, default_value_t = 300)]
    pub wpm: u16,

    /// End of a linear ramp.
    #[arg(long, default_value_t = 600)]
    pub end_wpm: u16,

    /// Ease the first five words in from 60% speed.
    #[arg(long)]
    pub ease_in: bool,

    /// Play the daily challenge for DATE (YYYY-MM-DD) at its fixed speed.
    #[arg(long, value_name = "DATE", conflicts_with = "file")]
    pub daily: Option<String>,

    /// Bundled practice text to play when no file is given.
    #[arg(long, default_value_t = 0)]
    pub text: usize,

    /// Seconds of countdown before the first word.
    #[arg(long, default_value_t = 3)]
    pub countdown: u8,

    /// Spell out standalone digits and decimals before segmenting.
    #[arg(long)]
    pub spell_numbers: bool,
}

impl Args {
    pub fn reader_config(&self) -> ReaderConfig {
        let config = match &self.daily {
            Some(date) => {
                let wpm = daily_wpm(date).min(u16::MAX as u32) as u16;
                ReaderConfig::constant(wpm)
            }
            None => ReaderConfig {
                mode: self.mode,
                start_wpm: self.wpm,
                end_wpm: self.end_wpm,
                ..ReaderConfig::default()
            },
        };

        config.with_ease_in(self.ease_in).normalized()
    }
}

fn parse_mode(value: &str) -> Result<SpeedMode, String> {
    SpeedMode::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown speed mode `{value}`"))
}
