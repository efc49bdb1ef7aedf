//! Screen: the terminal's display model, fed by quiz events.
//!
//! Pure state; [`QuizView`](crate::view::QuizView) turns it into cells.

use crate::core::{format_elapsed, Presenter, QuizEvent};
use crate::types::{ConfirmAction, FragmentId, Point};

/// Which page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScreenMode {
    /// Nothing received yet
    #[default]
    Blank,
    Start,
    Question,
    Result,
    Goodbye,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultView {
    pub correct: usize,
    pub total: usize,
    pub total_secs: u64,
}

impl ResultView {
    pub fn score_line(&self) -> String {
        format!("Score: {} / {}", self.correct, self.total)
    }

    pub fn time_line(&self) -> String {
        format!("Time: {}", format_elapsed(self.total_secs))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub mode: ScreenMode,
    pub number: usize,
    pub total: usize,
    pub question: String,
    pub fragments: Vec<String>,
    pub slots: Vec<Option<FragmentId>>,
    pub pool: Vec<FragmentId>,
    pub seconds: u64,
    /// Held fragment and where its top-left corner is drawn.
    pub drag: Option<(FragmentId, Point)>,
    pub mismatch: bool,
    pub result: Option<ResultView>,
    pub confirm: Option<ConfirmAction>,
    pub notice: Option<String>,
    pub fatal: Option<String>,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a batch of drained events in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a QuizEvent>) {
        for event in events {
            event.present(self);
        }
    }

    pub fn timer_line(&self) -> String {
        format!("Time: {}s", self.seconds)
    }

    pub fn fragment_text(&self, fragment: FragmentId) -> &str {
        self.fragments
            .get(fragment)
            .map(String::as_str)
            .unwrap_or("?")
    }

    fn clear_question(&mut self) {
        self.number = 0;
        self.total = 0;
        self.question.clear();
        self.fragments.clear();
        self.slots.clear();
        self.pool.clear();
        self.seconds = 0;
        self.drag = None;
        self.mismatch = false;
    }
}

impl Presenter for Screen {
    fn render_start_screen(&mut self) {
        self.clear_question();
        self.mode = ScreenMode::Start;
        self.result = None;
        self.notice = None;
    }

    fn render_question(
        &mut self,
        number: usize,
        total: usize,
        text: &str,
        fragments: &[String],
        slot_count: usize,
    ) {
        self.mode = ScreenMode::Question;
        self.number = number;
        self.total = total;
        self.question = text.to_string();
        self.fragments = fragments.to_vec();
        self.slots = vec![None; slot_count];
        self.pool = (0..fragments.len()).collect();
        self.drag = None;
        self.mismatch = false;
        self.result = None;
        self.notice = None;
    }

    fn render_board(&mut self, slots: &[Option<FragmentId>], pool: &[FragmentId]) {
        self.slots = slots.to_vec();
        self.pool = pool.to_vec();
    }

    fn render_tick(&mut self, seconds: u64) {
        self.seconds = seconds;
    }

    fn render_drag(&mut self, drag: Option<(FragmentId, Point)>) {
        self.drag = drag;
    }

    fn render_mismatch_feedback(&mut self, active: bool) {
        self.mismatch = active;
    }

    fn render_result(&mut self, correct: usize, total: usize, total_secs: u64) {
        self.clear_question();
        self.mode = ScreenMode::Result;
        self.result = Some(ResultView {
            correct,
            total,
            total_secs,
        });
    }

    fn render_confirm(&mut self, prompt: Option<ConfirmAction>) {
        self.confirm = prompt;
    }

    fn render_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    fn render_goodbye(&mut self) {
        self.clear_question();
        self.mode = ScreenMode::Goodbye;
        self.result = None;
        self.notice = None;
    }

    fn render_fatal(&mut self, message: &str) {
        self.clear_question();
        self.mode = ScreenMode::Fatal;
        self.fatal = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Screen {
        let mut s = Screen::new();
        s.apply_all(&[
            QuizEvent::StartScreen,
            QuizEvent::QuestionLoaded {
                number: 1,
                total: 20,
                text: "Order it".into(),
                fragments: vec!["a".into(), "b".into(), "c".into()],
                slot_count: 3,
            },
        ]);
        s
    }

    #[test]
    fn question_fills_pool_and_empty_slots() {
        let s = loaded();
        assert_eq!(s.mode, ScreenMode::Question);
        assert_eq!(s.slots, vec![None, None, None]);
        assert_eq!(s.pool, vec![0, 1, 2]);
        assert_eq!(s.fragment_text(1), "b");
        assert_eq!(s.fragment_text(7), "?");
    }

    #[test]
    fn drag_and_board_updates() {
        let mut s = loaded();
        s.apply_all(&[
            QuizEvent::DragUpdated {
                fragment: 2,
                at: Point::new(4, 5),
            },
            QuizEvent::DragEnded { fragment: 2 },
            QuizEvent::BoardChanged {
                slots: vec![Some(2), None, None],
                pool: vec![0, 1],
            },
            QuizEvent::Tick { seconds: 7 },
        ]);
        assert_eq!(s.drag, None);
        assert_eq!(s.slots[0], Some(2));
        assert_eq!(s.timer_line(), "Time: 7s");
    }

    #[test]
    fn result_lines() {
        let mut s = loaded();
        QuizEvent::Completed {
            correct: 20,
            total: 20,
            total_secs: 61,
        }
        .present(&mut s);
        assert_eq!(s.mode, ScreenMode::Result);
        assert!(s.fragments.is_empty());
        let r = s.result.unwrap();
        assert_eq!(r.score_line(), "Score: 20 / 20");
        assert_eq!(r.time_line(), "Time: 1m 01s");
    }

    #[test]
    fn confirm_overlays_current_mode() {
        let mut s = loaded();
        QuizEvent::ConfirmRequested {
            action: ConfirmAction::Quit,
        }
        .present(&mut s);
        assert_eq!(s.mode, ScreenMode::Question);
        assert_eq!(s.confirm, Some(ConfirmAction::Quit));
        QuizEvent::ConfirmDismissed.present(&mut s);
        assert_eq!(s.confirm, None);
    }
}
