//! Terminal renderer for the game.
//!
//! Renders into a simple framebuffer that is diffed and flushed to the
//! terminal with `crossterm`. No widget toolkit.
//!
//! - [`sink::Screen`] implements the controller's render contract
//! - [`GameView`] turns a `Screen` into a [`FrameBuffer`] (pure, testable)
//! - [`TerminalRenderer`] writes framebuffers to stdout

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod sink;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use sink::{Overlay, Screen};
