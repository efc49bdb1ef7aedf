//! Core quiz logic - pure, deterministic, and testable
//!
//! This crate contains the question repository, timers, the drag protocol, the
//! slot board and the quiz state machine. It has **no dependencies** on a
//! terminal, an input device or a clock:
//!
//! - **Deterministic**: the same seed draws the same sample; time is passed in
//! - **Testable**: every delay is a scheduled continuation fired by `advance`
//! - **Portable**: any surface that can render [`QuizEvent`]s can host it
//!
//! # Module Structure
//!
//! - [`question`]: question records, the repository, uniform sampling
//! - [`timer`]: stopwatch with 1 second display ticks
//! - [`scheduler`]: deferred continuations on one logical thread
//! - [`drag`]: the pick-up/move/release protocol shared by every input modality
//! - [`board`]: ordered slots with single occupancy and completion detection
//! - [`quiz`]: session lifecycle, answer checking and pacing
//! - [`event`]: events for the presentation layer and the [`Presenter`] trait
//!
//! # Example
//!
//! ```
//! use drag_quiz_core::{Question, QuestionRepository, QuizMachine, QuizSettings};
//! use drag_quiz_core::types::{DropTarget, Point, QuizIntent, QuizPhase};
//!
//! let repo = QuestionRepository::from_questions(vec![
//!     Question::new("Order the words", ["world", "hello"], vec![1, 0]),
//! ]);
//! let mut quiz = QuizMachine::new(repo, QuizSettings { sample_size: 1, seed: Some(1) });
//! quiz.apply_intent(QuizIntent::Start, 0);
//!
//! for (slot, fragment) in [(0, 1), (1, 0)] {
//!     quiz.pick_up(fragment, Point::default(), Point::default());
//!     quiz.release(Some(DropTarget::Slot(slot)), 0);
//! }
//!
//! // 300ms answer check, then 600ms before moving on.
//! quiz.advance(300);
//! quiz.advance(900);
//! assert_eq!(quiz.phase(), QuizPhase::Complete);
//! assert_eq!(quiz.result().unwrap().score_label(), "1 / 1");
//! ```

pub mod board;
pub mod drag;
pub mod error;
pub mod event;
pub mod question;
pub mod quiz;
pub mod scheduler;
pub mod timer;

pub use drag_quiz_types as types;

pub use board::{FragmentLocation, Placement, SlotBoard};
pub use drag::{DragController, DragSession, DragSignal, DropOutcome};
pub use error::{BoardError, InsufficientData, InvalidQuestion, LoadError, QuizError};
pub use event::{Presenter, QuizEvent};
pub use question::{Question, QuestionRepository};
pub use quiz::{QuizMachine, QuizResult, QuizSettings, Session};
pub use scheduler::Scheduler;
pub use timer::{format_elapsed, Timer, TimerState};
