//! Portable RSVP core: text segmentation, speed curves, ORP anchoring and the
//! clock-driven playback engine.
//!
//! Nothing in this crate touches I/O or ambient storage. Hosts feed it text,
//! a [`config::ReaderConfig`] and timestamps, and render what it reports.

#![no_std]

extern crate alloc;

pub mod clock;
pub mod config;
pub mod content;
pub mod orp;
pub mod playback;
pub mod sequence;
pub mod session;
pub mod speed;
pub mod text_policy;
