use std::io::{self, Write};

use flashread_core::{orp::split_orp, playback::PlaybackFrame};

/// Column the ORP letter is pinned to.
const ANCHOR_COLUMN: usize = 16;
const ANCHOR_STYLE: &str = "\x1b[1;31m";
const RESET_STYLE: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Single-line RSVP renderer for ANSI terminals.
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn render(&mut self, frame: PlaybackFrame<'_>) -> io::Result<()> {
        let Some(word) = frame.current_word else {
            write!(self.out, "{CLEAR_LINE}{:>width$}", "ready", width = ANCHOR_COLUMN)?;
            return self.out.flush();
        };

        let line = anchored_line(word.text(), frame.progress);
        write!(self.out, "{CLEAR_LINE}{line}")?;
        self.out.flush()
    }

    pub fn countdown(&mut self, remaining: u8) -> io::Result<()> {
        write!(self.out, "{CLEAR_LINE}{:>width$}", remaining, width = ANCHOR_COLUMN + 1)?;
        self.out.flush()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.out.flush()
    }
}

fn anchored_line(word: &str, progress: f32) -> String {
    let split = split_orp(word);
    let pad = ANCHOR_COLUMN.saturating_sub(split.left_chars());
    let pct = (progress * 100.0) as u32;

    format!(
        "{:pad$}{}{ANCHOR_STYLE}{}{RESET_STYLE}{}    {:>3}%",
        "",
        split.left,
        split.center,
        split.right,
        pct,
        pad = pad
    )
}
