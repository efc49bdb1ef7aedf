//! Error types for the quiz core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{FragmentId, QuizPhase, SlotPosition};

/// Fatal failure reading the question source at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read question source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed question source: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The repository holds fewer questions than a session needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("need at least {required} questions, only {available} available")]
pub struct InsufficientData {
    pub required: usize,
    pub available: usize,
}

/// A question record that breaks the slot/order invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuestion {
    #[error("question has no slots")]
    NoSlots,
    #[error("answer_divs is {slot_count} but correct_order has {order_len} entries")]
    SlotCountMismatch { slot_count: usize, order_len: usize },
    #[error("correct_order references fragment {index}, question has {count}")]
    FragmentOutOfRange { index: FragmentId, count: usize },
    #[error("correct_order uses fragment {0} more than once")]
    RepeatedFragment(FragmentId),
}

/// Rejected slot board operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("slot {0} is already occupied")]
    SlotOccupied(SlotPosition),
    #[error("slot {position} out of range, board has {count} slots")]
    SlotOutOfRange { position: SlotPosition, count: usize },
    #[error("fragment {0} does not belong to this question")]
    UnknownFragment(FragmentId),
}

/// Rejected state machine transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error(transparent)]
    Insufficient(#[from] InsufficientData),
    #[error("cannot {action} while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error("waiting for a confirmation")]
    ConfirmationPending,
}
