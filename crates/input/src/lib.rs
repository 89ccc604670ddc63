//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Command`]. Terminal
//! auto-repeat supplies held-key repeats; there is no timing logic here.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
