//! Reading material bundled with the trainer.

mod static_source;

pub use static_source::{EXAMPLE_TEXTS, ExampleText, StaticTextProvider};
