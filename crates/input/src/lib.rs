//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::Action`]s. The mapping is
//! screen-independent; the main loop decides what an action means on the
//! current screen.

pub mod map;

pub use higher_lower_types as types;

pub use map::{handle_key_event, should_quit};
