//! Structured logging vocabulary.
//!
//! Library code emits `tracing` events tagged with an `event` name from [`events`]
//! and a `component` name. It never installs a subscriber; binaries and tests do.

pub mod events;
pub mod fields;
