//! Terminal front end.
//!
//! A small rendering layer for terminal play. Screens are drawn into a plain
//! framebuffer by [`GameView`] (pure, testable), then flushed by
//! [`TerminalRenderer`], which only rewrites cells that changed since the
//! previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use higher_lower_core as core;
pub use higher_lower_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Screen, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
