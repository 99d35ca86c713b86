//! Background task boundaries.
//!
//! Keeps the periodic refresh loop and its cancellation in one place so the
//! registry itself stays runtime-agnostic apart from `tokio::sync`.

pub(crate) mod refresher;
