use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use flashread_core::{
    content::StaticTextProvider,
    session::{CompletionReport, CompletionSink, ReadingSession, ReadingText, TextProvider},
    text_policy::spell_out_tokens,
};
use log::{debug, info, warn};

use clock::SystemClock;
use terminal::TerminalRenderer;

#[path = "main/cli.rs"]
mod cli;
#[path = "main/clock.rs"]
mod clock;
#[path = "main/terminal.rs"]
mod terminal;

const FRAME_SLEEP_MS: u64 = 1;
const REPORT_INTERVAL_SECS: u64 = 5;
const UNDATED: &str = "1970-01-01";

/// Reads a text file, or stdin for `-`.
struct FileTextProvider {
    path: PathBuf,
}

impl TextProvider for FileTextProvider {
    type Error = io::Error;

    fn load_text(&mut self) -> Result<ReadingText, Self::Error> {
        let content = if self.path.as_os_str() == "-" {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            fs::read_to_string(&self.path)?
        };

        let title = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());

        Ok(ReadingText {
            id: self.path.display().to_string(),
            content,
            title,
            date: UNDATED.to_string(),
        })
    }
}

/// Completion sink for a local session: nothing to persist, so it logs.
struct LogSink;

impl CompletionSink for LogSink {
    type Error = core::convert::Infallible;

    fn record_completion(&mut self, report: &CompletionReport) -> Result<(), Self::Error> {
        info!(
            "finished {} words of {} at {} wpm",
            report.word_count, report.text_id, report.achieved_wpm
        );
        Ok(())
    }
}

fn load_text(args: &cli::Args) -> anyhow::Result<ReadingText> {
    let mut text = match (&args.file, &args.daily) {
        (Some(path), _) => FileTextProvider { path: path.clone() }
            .load_text()
            .with_context(|| format!("failed to read {}", path.display()))?,
        (None, Some(date)) => StaticTextProvider::for_date(date).load_text()?,
        (None, None) => {
            let mut provider = StaticTextProvider::new();
            if args.text >= provider.title_count() {
                warn!(
                    "--text {} out of range, {} bundled texts; using the last one",
                    args.text,
                    provider.title_count()
                );
            }
            provider.select(args.text);
            provider.load_text()?
        }
    };

    if args.spell_numbers {
        text.content = spell_out_tokens(&text.content).join(" ");
    }
    Ok(text)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let config = args.reader_config();
    let text = load_text(&args)?;

    info!(
        "loaded \"{}\" ({}) mode={} start_wpm={} end_wpm={} ease_in={}",
        text.title.as_deref().unwrap_or("untitled"),
        text.date,
        config.mode.as_str(),
        config.start_wpm,
        config.end_wpm,
        config.ease_in
    );

    let mut session = ReadingSession::new(text, &config, LogSink);
    let mut renderer = TerminalRenderer::new(io::stdout().lock());

    if session.is_empty() {
        renderer.render(session.frame())?;
        renderer.finish()?;
        info!("nothing to play");
        return Ok(());
    }

    for remaining in (1..=args.countdown).rev() {
        renderer.countdown(remaining)?;
        thread::sleep(Duration::from_secs(1));
    }

    let mut clock = SystemClock::default();
    session.start();
    renderer.render(session.frame())?;

    let mut report_words = 0u64;
    let mut report_start = Instant::now();

    while session.engine().is_running() {
        let result = session.poll(&mut clock)?;
        if result.requests_render() {
            renderer.render(session.frame())?;
        }

        report_words = report_words.saturating_add(session.drain_word_updates() as u64);
        let elapsed = report_start.elapsed();
        if elapsed >= Duration::from_secs(REPORT_INTERVAL_SECS) {
            let elapsed_ms = (elapsed.as_millis() as u64).max(1);
            let wpm_x100 = report_words * 6_000_000 / elapsed_ms;
            debug!(
                "effective_wpm={}.{:02} words={} elapsed_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                report_words,
                elapsed_ms
            );
            report_words = 0;
            report_start = Instant::now();
        }

        thread::sleep(Duration::from_millis(FRAME_SLEEP_MS));
    }

    renderer.finish()?;
    Ok(())
}
