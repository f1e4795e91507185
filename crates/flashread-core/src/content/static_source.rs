use alloc::{
    format,
    string::{String, ToString},
};

use log::debug;

use crate::{
    session::{ReadingText, TextProvider},
    speed::date_hash,
};

const UNDATED: &str = "1970-01-01";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExampleText {
    pub title: &'static str,
    pub content: &'static str,
}

/// Practice texts available without any backing store.
pub const EXAMPLE_TEXTS: [ExampleText; 3] = [
    ExampleText {
        title: "The Art of Focus",
        content: "Attention is a muscle, and like any muscle it grows under steady load. \
Every notification you ignore and every paragraph you finish without drifting is a small \
repetition. Reading one word at a time removes the temptation to skim ahead or glance back. \
Your eyes stay still while the text moves for you. At first the pace feels rushed. After a \
few sessions the same speed feels calm, and the next step up becomes the new challenge. \
Start slow, stay consistent, and let the rhythm carry you forward.",
    },
    ExampleText {
        title: "Neural Plasticity",
        content: "The brain rewires itself with practice. Pathways that fire together grow \
stronger, and signals that once crawled begin to race. When you train with rapid serial \
presentation, the link between what you see and what you understand tightens. Words that \
needed a full glance are recognised from a single anchor letter. None of this happens in one \
sitting. It happens over weeks of short, deliberate sessions. The reader you become depends \
on the minutes you invest today.",
    },
    ExampleText {
        title: "Flow State",
        content: "Peak performance lives where challenge meets skill. Push the pace a little \
past comfort and the inner voice can no longer keep up. You stop sounding out each word and \
start seeing meaning directly. Time seems to fade, distractions drop away, and the text \
becomes the only thing in the room. That is flow. It is not reserved for athletes or \
musicians. A reader who raises the speed in small, steady steps can find it too.",
    },
];

/// In-memory [`TextProvider`] over [`EXAMPLE_TEXTS`].
#[derive(Debug, Clone)]
pub struct StaticTextProvider {
    texts: &'static [ExampleText],
    selected: usize,
    date: String,
}

impl Default for StaticTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticTextProvider {
    pub fn new() -> Self {
        Self::with_texts(&EXAMPLE_TEXTS)
    }

    pub fn with_texts(texts: &'static [ExampleText]) -> Self {
        Self {
            texts,
            selected: 0,
            date: UNDATED.to_string(),
        }
    }

    /// Daily fallback: picks a text deterministically from `date`.
    pub fn for_date(date: &str) -> Self {
        let mut provider = Self::new();
        if !provider.texts.is_empty() {
            provider.selected = date_hash(date) as usize % provider.texts.len();
        }
        provider.date = date.to_string();
        debug!(
            "content: daily fallback date={} index={}",
            date, provider.selected
        );
        provider
    }

    pub fn title_count(&self) -> usize {
        self.texts.len()
    }

    pub fn titles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.texts.iter().map(|text| text.title)
    }

    /// Selects a text by index, clamped to the last entry.
    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.texts.len().saturating_sub(1));
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }
}

impl TextProvider for StaticTextProvider {
    type Error = core::convert::Infallible;

    fn load_text(&mut self) -> Result<ReadingText, Self::Error> {
        let Some(text) = self.texts.get(self.selected) else {
            return Ok(ReadingText {
                id: "example-empty".to_string(),
                content: String::new(),
                title: None,
                date: self.date.clone(),
            });
        };

        Ok(ReadingText {
            id: format!("example-{}", self.selected),
            content: text.content.to_string(),
            title: Some(text.title.to_string()),
            date: self.date.clone(),
        })
    }
}
