//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the quiz.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, input adapters, terminal rendering).
//!
//! # Session Shape
//!
//! - **Sample size**: 20 questions per session, drawn without replacement
//! - **Question tier**: only the `easy` tier of the question document is played
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 1000 | Timer tick interval (display only) |
//! | `COMPLETION_CHECK_DELAY_MS` | 300 | Settle time after the last slot fills |
//! | `ADVANCE_DELAY_MS` | 600 | Pause after a correct answer before the next question |
//! | `MISMATCH_HOLD_MS` | 600 | How long the mismatch feedback stays up before the reset |
//! | `FRAME_MS` | 33 | Terminal loop input poll timeout |
//!
//! # Examples
//!
//! ```
//! use drag_quiz_types::{DropTarget, QuizIntent, Point, Rect, SAMPLE_SIZE};
//!
//! assert_eq!(QuizIntent::from_str("start"), Some(QuizIntent::Start));
//! assert_eq!(QuizIntent::Quit.as_str(), "quit");
//!
//! let rect = Rect::new(10, 4, 12, 1);
//! assert!(rect.contains(Point::new(15, 4)));
//! assert_eq!(Point::new(15, 4) - rect.origin(), Point::new(5, 0));
//!
//! assert_ne!(DropTarget::Slot(0), DropTarget::Pool);
//! assert_eq!(SAMPLE_SIZE, 20);
//! ```

use std::fmt;
use std::ops::{Add, Sub};

/// Number of questions drawn for one session.
pub const SAMPLE_SIZE: usize = 20;

/// Tier of the question document that is played.
pub const QUESTION_TIER: &str = "easy";

/// Timer tick interval (1 second).
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Delay between the last slot filling and the answer check.
pub const COMPLETION_CHECK_DELAY_MS: u64 = 300;

/// Delay between a correct verdict and loading the next question.
pub const ADVANCE_DELAY_MS: u64 = 600;

/// Mismatch feedback hold time before the board resets.
pub const MISMATCH_HOLD_MS: u64 = 600;

/// Terminal loop frame interval (~30 FPS).
pub const FRAME_MS: u64 = 33;

/// Index of an answer fragment within its question (`0..answers.len()`).
pub type FragmentId = usize;

/// Position of a slot on the board (`0..answer_divs`).
pub type SlotPosition = usize;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(TICK_INTERVAL_MS, 1000);
        assert_eq!(COMPLETION_CHECK_DELAY_MS, 300);
        assert_eq!(ADVANCE_DELAY_MS, 600);
        assert_eq!(MISMATCH_HOLD_MS, 600);
        assert_eq!(SAMPLE_SIZE, 20);
    }

    #[test]
    fn intent_round_trips_through_str() {
        for intent in [
            QuizIntent::Start,
            QuizIntent::Retry,
            QuizIntent::Cancel,
            QuizIntent::Quit,
            QuizIntent::Restart,
        ] {
            assert_eq!(QuizIntent::from_str(intent.as_str()), Some(intent));
        }
        assert_eq!(QuizIntent::from_str("RETRY"), Some(QuizIntent::Retry));
        assert_eq!(QuizIntent::from_str("pause"), None);
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(5, 4)));
        assert!(!r.contains(Point::new(6, 4)));
        assert!(!r.contains(Point::new(5, 5)));
        assert!(!r.contains(Point::new(1, 3)));
    }

    #[test]
    fn modality_parse() {
        assert_eq!(InputModality::from_str("touch"), Some(InputModality::Touch));
        assert_eq!(InputModality::from_str("Pointer"), Some(InputModality::Pointer));
        assert_eq!(InputModality::from_str("pen"), None);
    }
}

/// A position on the display surface (terminal cells).
///
/// Signed so that translations (`pointer - offset`) can go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Axis-aligned bounding box of an element on the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn translated(&self, by: Point) -> Self {
        Self {
            x: self.x + by.x,
            y: self.y + by.y,
            ..*self
        }
    }
}

/// Where a released fragment lands.
///
/// Anything that is not a slot resolves to the pool (the fragment source area).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropTarget {
    /// An ordered answer slot
    Slot(SlotPosition),
    /// The fragment source area
    Pool,
}

/// Session lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizPhase {
    /// Start screen
    Idle,
    /// A question is in progress
    Active,
    /// Results are shown
    Complete,
    /// The player quit; only a restart back to `Idle` is possible
    Terminated,
    /// The question source failed to load; nothing but quit is honoured
    Unavailable,
}

impl QuizPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuizPhase::Idle => "idle",
            QuizPhase::Active => "active",
            QuizPhase::Complete => "complete",
            QuizPhase::Terminated => "terminated",
            QuizPhase::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for QuizPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User intents produced by the presentation layer.
///
/// Drag input is not an intent; it flows through the drag protocol instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizIntent {
    /// Begin a session from the start screen
    Start,
    /// Play again from the results screen (fresh sample)
    Retry,
    /// Leave the results screen for the start screen (asks first)
    Cancel,
    /// Leave the game (asks first)
    Quit,
    /// Return from the goodbye screen to the start screen
    Restart,
}

impl QuizIntent {
    /// Parse intent from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(QuizIntent::Start),
            "retry" => Some(QuizIntent::Retry),
            "cancel" => Some(QuizIntent::Cancel),
            "quit" => Some(QuizIntent::Quit),
            "restart" => Some(QuizIntent::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuizIntent::Start => "start",
            QuizIntent::Retry => "retry",
            QuizIntent::Cancel => "cancel",
            QuizIntent::Quit => "quit",
            QuizIntent::Restart => "restart",
        }
    }
}

/// Actions that wait on a yes/no confirmation before taking effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmAction {
    /// Fresh sample, straight into the first question
    Retry,
    /// Back to the start screen
    Cancel,
    /// Goodbye screen
    Quit,
}

impl ConfirmAction {
    /// Prompt text shown in the modal.
    pub fn message(&self) -> &'static str {
        match self {
            ConfirmAction::Retry => "Retry the quiz?",
            ConfirmAction::Cancel => "Restart?",
            ConfirmAction::Quit => "Quit the game?",
        }
    }
}

/// How raw drag input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputModality {
    /// Native drag: the surface delivers the drop target
    #[default]
    Pointer,
    /// Touch drag: offset tracking and hit-testing at the release point
    Touch,
}

impl InputModality {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pointer" | "mouse" => Some(InputModality::Pointer),
            "touch" => Some(InputModality::Touch),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputModality::Pointer => "pointer",
            InputModality::Touch => "touch",
        }
    }
}
