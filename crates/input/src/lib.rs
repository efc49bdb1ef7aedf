//! Terminal input module (quiz-facing).
//!
//! Turns `crossterm` key and mouse events into quiz commands and
//! modality-independent [`DragSignal`](crate::core::DragSignal)s. Both drag
//! modalities feed the same protocol:
//!
//! | Modality | Pick-up offset            | Drop target resolved by     |
//! |----------|---------------------------|-----------------------------|
//! | Pointer  | zero (drawn under cursor) | the surface, under cursor   |
//! | Touch    | finger position in chip   | the adapter's own hit test  |
//!
//! Hit testing goes through the [`HitTest`] trait so the adapters never see
//! how the screen is laid out.

pub mod hit;
pub mod map;
pub mod modality;
pub mod pointer;
pub mod touch;

pub use drag_quiz_core as core;
pub use drag_quiz_types as types;

pub use hit::{Command, Element, HitTest, Regions};
pub use map::{handle_key_event, is_drag_cancel, should_exit, KeyContext};
pub use modality::{mouse_point, pointer_event, touch_event, DragInput};
pub use pointer::{PointerAdapter, PointerEvent};
pub use touch::{TouchAdapter, TouchEvent, TouchPhase};
