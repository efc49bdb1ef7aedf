//! Terminal quiz renderer module.
//!
//! A small rendering layer for the quiz. It avoids widget/layout libraries and
//! instead renders into a simple framebuffer that can be flushed to a terminal
//! backend.
//!
//! Pipeline:
//! - [`Screen`] implements [`Presenter`](crate::core::Presenter) and keeps
//!   what the quiz last said
//! - [`QuizView`] draws a `Screen` into a [`FrameBuffer`] and returns the
//!   [`Layout`] the input adapters hit-test against
//! - [`TerminalRenderer`] diffs frames and writes only changed cells

pub mod fb;
pub mod renderer;
pub mod screen;
pub mod view;

pub use drag_quiz_core as core;
pub use drag_quiz_input as input;
pub use drag_quiz_types as types;

pub use fb::{text_width, wrap_text, Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use screen::{ResultView, Screen, ScreenMode};
pub use view::{Layout, QuizView, Viewport};
