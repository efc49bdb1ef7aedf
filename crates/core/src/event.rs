//! Events emitted by the quiz machine and the presenter interface that consumes them.

use crate::types::{ConfirmAction, FragmentId, Point};

/// Display-facing notifications, drained from the machine after each input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    StartScreen,
    QuestionLoaded {
        /// 1-based position in the session.
        number: usize,
        total: usize,
        text: String,
        fragments: Vec<String>,
        slot_count: usize,
    },
    BoardChanged {
        slots: Vec<Option<FragmentId>>,
        pool: Vec<FragmentId>,
    },
    Tick { seconds: u64 },
    /// Pick-up or move: the held fragment is drawn at `at`.
    DragUpdated { fragment: FragmentId, at: Point },
    DragEnded { fragment: FragmentId },
    MismatchFeedback { active: bool },
    Completed {
        correct: usize,
        total: usize,
        total_secs: u64,
    },
    ConfirmRequested { action: ConfirmAction },
    ConfirmDismissed,
    Notice { message: String },
    Goodbye,
    Fatal { message: String },
}

/// A display surface.
///
/// Implementations keep whatever they need to draw; the machine never reads back.
pub trait Presenter {
    fn render_start_screen(&mut self);
    fn render_question(
        &mut self,
        number: usize,
        total: usize,
        text: &str,
        fragments: &[String],
        slot_count: usize,
    );
    fn render_board(&mut self, slots: &[Option<FragmentId>], pool: &[FragmentId]);
    fn render_tick(&mut self, seconds: u64);
    /// `None` once the drag has ended.
    fn render_drag(&mut self, drag: Option<(FragmentId, Point)>);
    fn render_mismatch_feedback(&mut self, active: bool);
    fn render_result(&mut self, correct: usize, total: usize, total_secs: u64);
    /// `None` dismisses the prompt.
    fn render_confirm(&mut self, prompt: Option<ConfirmAction>);
    fn render_notice(&mut self, message: &str);
    fn render_goodbye(&mut self);
    fn render_fatal(&mut self, message: &str);
}

impl QuizEvent {
    /// Dispatch to the matching presenter call.
    pub fn present<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            QuizEvent::StartScreen => presenter.render_start_screen(),
            QuizEvent::QuestionLoaded {
                number,
                total,
                text,
                fragments,
                slot_count,
            } => presenter.render_question(*number, *total, text, fragments, *slot_count),
            QuizEvent::BoardChanged { slots, pool } => presenter.render_board(slots, pool),
            QuizEvent::Tick { seconds } => presenter.render_tick(*seconds),
            QuizEvent::DragUpdated { fragment, at } => presenter.render_drag(Some((*fragment, *at))),
            QuizEvent::DragEnded { .. } => presenter.render_drag(None),
            QuizEvent::MismatchFeedback { active } => presenter.render_mismatch_feedback(*active),
            QuizEvent::Completed {
                correct,
                total,
                total_secs,
            } => presenter.render_result(*correct, *total, *total_secs),
            QuizEvent::ConfirmRequested { action } => presenter.render_confirm(Some(*action)),
            QuizEvent::ConfirmDismissed => presenter.render_confirm(None),
            QuizEvent::Notice { message } => presenter.render_notice(message),
            QuizEvent::Goodbye => presenter.render_goodbye(),
            QuizEvent::Fatal { message } => presenter.render_fatal(message),
        }
    }
}
