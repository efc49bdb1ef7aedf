//! Drag Quiz (workspace facade crate).
//!
//! Exposes `drag_quiz::{core,input,term,types}` so the binary, integration
//! tests and benches share one path while the implementation lives in
//! dedicated crates under `crates/`.

pub use drag_quiz_core as core;
pub use drag_quiz_input as input;
pub use drag_quiz_term as term;
pub use drag_quiz_types as types;
