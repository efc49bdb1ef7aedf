//! Quiz state machine - session lifecycle, answer checking and pacing.
//!
//! The machine is driven entirely by its caller: intents, drag signals and
//! `advance(now_ms)` calls with a monotonic millisecond clock. Delays (answer
//! check, advance, mismatch reset) are scheduled continuations stamped with the
//! board epoch they were created under; a continuation whose epoch is stale or
//! that fires outside `Active` is dropped.
//!
//! ```text
//!            start / retry                      last question answered
//!   Idle ─────────────────────▶ Active ─────────────────────────────▶ Complete
//!    ▲                             │  ▲ mismatch: reset same question     │ │
//!    │ restart                     │  └──────────┘                        │ │ retry
//!    │            quit (confirm)   ▼                    cancel (confirm)  │ └──────▶ Active
//!  Terminated ◀────────────────── any ◀──────── Idle ◀────────────────────┘
//! ```

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, trace, warn};

use crate::board::SlotBoard;
use crate::drag::{DragController, DragSession, DragSignal, DropOutcome};
use crate::error::QuizError;
use crate::event::QuizEvent;
use crate::question::{Question, QuestionRepository};
use crate::scheduler::Scheduler;
use crate::timer::{format_elapsed, Timer};
use crate::types::*;

/// Tunables for one machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    pub sample_size: usize,
    /// Fixed seed for reproducible samples; entropy when `None`.
    pub seed: Option<u64>,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    CheckAnswer,
    Advance,
    ResetBoard,
}

#[derive(Debug, Clone, Copy)]
struct Deferred {
    epoch: u64,
    kind: Continuation,
}

/// The questions drawn for one play-through and the progress through them.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Vec<Question>,
    index: usize,
    correct: usize,
    started_at_ms: u64,
}

impl Session {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }
}

/// Final numbers of a completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizResult {
    pub correct: usize,
    pub total: usize,
    pub total_secs: u64,
}

impl QuizResult {
    /// `"{correct} / {total}"`
    pub fn score_label(&self) -> String {
        format!("{} / {}", self.correct, self.total)
    }

    pub fn time_label(&self) -> String {
        format_elapsed(self.total_secs)
    }
}

#[derive(Debug, Clone)]
pub struct QuizMachine {
    repository: QuestionRepository,
    settings: QuizSettings,
    rng: StdRng,
    phase: QuizPhase,
    session: Option<Session>,
    result: Option<QuizResult>,
    board: SlotBoard,
    drag: DragController,
    session_timer: Timer,
    question_timer: Timer,
    scheduler: Scheduler<Deferred>,
    /// Bumped on every board rebuild; continuations carry the value they were scheduled under.
    epoch: u64,
    /// Board is locked from completion until the verdict has played out.
    verdict_pending: bool,
    mismatch: bool,
    pending_confirm: Option<ConfirmAction>,
    events: Vec<QuizEvent>,
}

impl QuizMachine {
    /// A machine on the start screen.
    pub fn new(repository: QuestionRepository, settings: QuizSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut machine = Self::with_phase(repository, settings, rng, QuizPhase::Idle);
        machine.emit(QuizEvent::StartScreen);
        machine
    }

    /// A machine whose question source failed to load. It ignores every intent.
    pub fn unavailable(message: impl Into<String>) -> Self {
        let settings = QuizSettings::default();
        let mut machine = Self::with_phase(
            QuestionRepository::default(),
            settings,
            StdRng::seed_from_u64(0),
            QuizPhase::Unavailable,
        );
        machine.emit(QuizEvent::Fatal {
            message: message.into(),
        });
        machine
    }

    fn with_phase(
        repository: QuestionRepository,
        settings: QuizSettings,
        rng: StdRng,
        phase: QuizPhase,
    ) -> Self {
        Self {
            repository,
            settings,
            rng,
            phase,
            session: None,
            result: None,
            board: SlotBoard::default(),
            drag: DragController::new(),
            session_timer: Timer::new(),
            question_timer: Timer::new(),
            scheduler: Scheduler::new(),
            epoch: 0,
            verdict_pending: false,
            mismatch: false,
            pending_confirm: None,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn repository(&self) -> &QuestionRepository {
        &self.repository
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    pub fn board(&self) -> &SlotBoard {
        &self.board
    }

    pub fn held(&self) -> Option<&DragSession> {
        self.drag.held()
    }

    pub fn pending_confirmation(&self) -> Option<ConfirmAction> {
        self.pending_confirm
    }

    pub fn is_board_locked(&self) -> bool {
        self.verdict_pending
    }

    pub fn mismatch_active(&self) -> bool {
        self.mismatch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn question_elapsed_secs(&self, now_ms: u64) -> u64 {
        self.question_timer.elapsed_secs(now_ms)
    }

    /// Clock value of the next scheduled continuation, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_due()
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: QuizEvent) {
        self.events.push(event);
    }

    fn emit_board(&mut self) {
        self.events.push(QuizEvent::BoardChanged {
            slots: self.board.slots().to_vec(),
            pool: self.board.pool().to_vec(),
        });
    }

    /// Apply a user intent. Returns whether it was accepted.
    pub fn apply_intent(&mut self, intent: QuizIntent, now_ms: u64) -> bool {
        if self.pending_confirm.is_some() {
            trace!(intent = intent.as_str(), "intent ignored while confirming");
            return false;
        }

        match (intent, self.phase) {
            (QuizIntent::Start, QuizPhase::Idle) => self.start(now_ms).is_ok(),
            (QuizIntent::Retry, QuizPhase::Complete) => {
                self.request_confirmation(ConfirmAction::Retry)
            }
            (QuizIntent::Cancel, QuizPhase::Complete) => {
                self.request_confirmation(ConfirmAction::Cancel)
            }
            (QuizIntent::Quit, QuizPhase::Idle | QuizPhase::Active | QuizPhase::Complete) => {
                self.request_confirmation(ConfirmAction::Quit)
            }
            (QuizIntent::Restart, QuizPhase::Terminated) => {
                self.show_start(now_ms);
                true
            }
            _ => {
                debug!(intent = intent.as_str(), phase = %self.phase, "intent ignored");
                false
            }
        }
    }

    /// Draw a fresh sample and load its first question.
    pub fn start(&mut self, now_ms: u64) -> Result<(), QuizError> {
        if self.pending_confirm.is_some() {
            return Err(QuizError::ConfirmationPending);
        }
        if !matches!(self.phase, QuizPhase::Idle | QuizPhase::Complete) {
            return Err(QuizError::InvalidPhase {
                action: "start",
                phase: self.phase,
            });
        }

        let questions = match self
            .repository
            .sample(self.settings.sample_size, &mut self.rng)
        {
            Ok(questions) => questions,
            Err(err) => {
                warn!(%err, "start rejected");
                self.emit(QuizEvent::Notice {
                    message: format!("Need at least {} questions", err.required),
                });
                return Err(err.into());
            }
        };

        info!(total = questions.len(), "quiz started");
        self.session = Some(Session {
            questions,
            index: 0,
            correct: 0,
            started_at_ms: now_ms,
        });
        self.result = None;
        self.phase = QuizPhase::Active;
        self.session_timer.start(now_ms);
        self.load_question(now_ms);
        Ok(())
    }

    fn request_confirmation(&mut self, action: ConfirmAction) -> bool {
        debug!(prompt = action.message(), "confirmation requested");
        self.pending_confirm = Some(action);
        self.emit(QuizEvent::ConfirmRequested { action });
        true
    }

    /// Resolve the pending confirmation. Returns false if none was pending.
    pub fn resolve_confirmation(&mut self, accepted: bool, now_ms: u64) -> bool {
        let Some(action) = self.pending_confirm.take() else {
            return false;
        };
        self.emit(QuizEvent::ConfirmDismissed);
        if !accepted {
            debug!(prompt = action.message(), "confirmation declined");
            return true;
        }

        match action {
            ConfirmAction::Retry => {
                if self.phase == QuizPhase::Complete {
                    if let Err(err) = self.start(now_ms) {
                        debug!(%err, "retry rejected");
                    }
                }
            }
            ConfirmAction::Cancel => {
                if self.phase == QuizPhase::Complete {
                    self.show_start(now_ms);
                }
            }
            ConfirmAction::Quit => self.terminate(now_ms),
        }
        true
    }

    /// Feed one modality-independent drag signal.
    pub fn apply_drag(&mut self, signal: DragSignal, now_ms: u64) -> bool {
        match signal {
            DragSignal::PickUp {
                fragment,
                pointer,
                offset,
            } => self.pick_up(fragment, pointer, offset),
            DragSignal::Move { pointer } => self.move_to(pointer),
            DragSignal::Release { target } => self.release(target, now_ms).is_some(),
        }
    }

    pub fn pick_up(&mut self, fragment: FragmentId, pointer: Point, offset: Point) -> bool {
        if self.phase != QuizPhase::Active || self.verdict_pending || self.pending_confirm.is_some()
        {
            return false;
        }
        if fragment >= self.board.fragment_count() {
            return false;
        }
        let session = self.drag.pick_up(fragment, pointer, offset);
        self.emit(QuizEvent::DragUpdated {
            fragment,
            at: session.translation,
        });
        true
    }

    pub fn move_to(&mut self, pointer: Point) -> bool {
        let Some(session) = self.drag.move_to(pointer) else {
            return false;
        };
        self.emit(QuizEvent::DragUpdated {
            fragment: session.fragment,
            at: session.translation,
        });
        true
    }

    /// Finish the held drag. A filled board schedules the answer check.
    pub fn release(&mut self, target: Option<DropTarget>, now_ms: u64) -> Option<DropOutcome> {
        let outcome = self.drag.release(target, &mut self.board)?;
        let fragment = match outcome {
            DropOutcome::Placed { fragment, .. } | DropOutcome::Returned { fragment } => fragment,
        };
        self.emit(QuizEvent::DragEnded { fragment });
        self.emit_board();

        if let DropOutcome::Placed { complete: true, .. } = outcome {
            debug!(epoch = self.epoch, "board complete, answer check scheduled");
            self.verdict_pending = true;
            self.schedule(now_ms, COMPLETION_CHECK_DELAY_MS, Continuation::CheckAnswer);
        }
        Some(outcome)
    }

    /// Fire due continuations and the question timer tick.
    pub fn advance(&mut self, now_ms: u64) {
        while let Some((due_ms, deferred)) = self.scheduler.pop_due(now_ms) {
            self.run_deferred(deferred, due_ms);
        }
        if let Some(seconds) = self.question_timer.poll(now_ms) {
            self.emit(QuizEvent::Tick { seconds });
        }
    }

    fn schedule(&mut self, now_ms: u64, delay_ms: u64, kind: Continuation) {
        let deferred = Deferred {
            epoch: self.epoch,
            kind,
        };
        self.scheduler.schedule(now_ms, delay_ms, deferred);
    }

    fn run_deferred(&mut self, deferred: Deferred, at_ms: u64) {
        if self.phase != QuizPhase::Active || deferred.epoch != self.epoch {
            trace!(?deferred, epoch = self.epoch, phase = %self.phase, "stale continuation dropped");
            return;
        }
        match deferred.kind {
            Continuation::CheckAnswer => self.check_answer(at_ms),
            Continuation::Advance => self.load_question(at_ms),
            Continuation::ResetBoard => self.reset_after_mismatch(),
        }
    }

    fn check_answer(&mut self, at_ms: u64) {
        if !self.board.is_complete() {
            self.verdict_pending = false;
            return;
        }
        let order = self.board.current_order();
        let Some(correct) = self
            .session
            .as_ref()
            .and_then(Session::current)
            .map(|q| q.is_correct(&order))
        else {
            return;
        };

        if correct {
            if let Some(session) = self.session.as_mut() {
                session.correct += 1;
                session.index += 1;
                info!(
                    answered = session.index,
                    correct = session.correct,
                    "answer correct"
                );
            }
            self.schedule(at_ms, ADVANCE_DELAY_MS, Continuation::Advance);
        } else {
            info!(?order, "answer mismatch");
            self.mismatch = true;
            self.emit(QuizEvent::MismatchFeedback { active: true });
            self.schedule(at_ms, MISMATCH_HOLD_MS, Continuation::ResetBoard);
        }
    }

    fn reset_after_mismatch(&mut self) {
        self.board.clear_to_pool();
        self.begin_epoch();
        self.emit(QuizEvent::MismatchFeedback { active: false });
        self.emit_board();
    }

    /// Invalidate continuations and drags tied to the previous board.
    fn begin_epoch(&mut self) {
        self.epoch += 1;
        self.verdict_pending = false;
        self.mismatch = false;
        if let Some(session) = self.drag.cancel() {
            self.emit(QuizEvent::DragEnded {
                fragment: session.fragment,
            });
        }
    }

    fn load_question(&mut self, now_ms: u64) {
        let loaded = {
            let Some(session) = self.session.as_ref() else {
                return;
            };
            match session.current() {
                Some(q) => {
                    self.board.reset(q);
                    Some(QuizEvent::QuestionLoaded {
                        number: session.index + 1,
                        total: session.total(),
                        text: q.text.clone(),
                        fragments: q.fragments.clone(),
                        slot_count: q.slot_count,
                    })
                }
                None => None,
            }
        };
        let Some(loaded) = loaded else {
            self.finish(now_ms);
            return;
        };

        self.begin_epoch();
        self.question_timer.start(now_ms);
        self.emit(loaded);
        self.emit_board();
        self.emit(QuizEvent::Tick { seconds: 0 });
    }

    fn finish(&mut self, now_ms: u64) {
        self.stop_timers(now_ms);
        self.begin_epoch();
        self.scheduler.clear();

        let total_secs = self.session_timer.elapsed_secs(now_ms);
        let (correct, total) = self
            .session
            .take()
            .map(|s| (s.correct, s.total()))
            .unwrap_or((0, self.settings.sample_size));
        let result = QuizResult {
            correct,
            total,
            total_secs,
        };
        info!(
            score = %result.score_label(),
            time = %result.time_label(),
            "quiz complete"
        );

        self.result = Some(result);
        self.board = SlotBoard::default();
        self.phase = QuizPhase::Complete;
        self.emit_board();
        self.emit(QuizEvent::Completed {
            correct,
            total,
            total_secs,
        });
    }

    fn show_start(&mut self, now_ms: u64) {
        self.leave_session(now_ms);
        self.phase = QuizPhase::Idle;
        self.emit(QuizEvent::StartScreen);
    }

    fn terminate(&mut self, now_ms: u64) {
        info!(phase = %self.phase, "player quit");
        self.leave_session(now_ms);
        self.phase = QuizPhase::Terminated;
        self.emit(QuizEvent::Goodbye);
    }

    fn leave_session(&mut self, now_ms: u64) {
        self.stop_timers(now_ms);
        self.begin_epoch();
        self.scheduler.clear();
        self.session = None;
        self.result = None;
        self.board = SlotBoard::default();
    }

    fn stop_timers(&mut self, now_ms: u64) {
        self.question_timer.stop(now_ms);
        self.session_timer.stop(now_ms);
    }
}
