//! Terminal drag quiz runner (default binary).
//!
//! Loads the question bank, then runs one loop: poll crossterm with a frame
//! timeout, feed input to the quiz, fire due continuations, redraw.

mod cli;
mod logging;

use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, MouseButton, MouseEventKind};
use tracing::{debug, error, info};

use drag_quiz::core::{QuestionRepository, QuizMachine};
use drag_quiz::input::{
    handle_key_event, is_drag_cancel, mouse_point, Command, DragInput, HitTest, KeyContext,
};
use drag_quiz::term::{FrameBuffer, Layout, QuizView, Screen, TerminalRenderer, Viewport};
use drag_quiz::types::FRAME_MS;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let _log_guard = logging::init(cli.log_dir.as_deref())?;

    let drag = DragInput::new(cli.input.into());
    info!(
        questions = %cli.questions.display(),
        sample_size = cli.sample_size,
        input = drag.modality().as_str(),
        "starting"
    );

    let quiz = match QuestionRepository::load(&cli.questions) {
        Ok(repo) => {
            info!(
                loaded = repo.len(),
                skipped = repo.skipped(),
                "question bank loaded"
            );
            QuizMachine::new(repo, cli.settings())
        }
        Err(err) => {
            error!(%err, "question bank unavailable");
            QuizMachine::unavailable(format!("Error: {err}"))
        }
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, quiz, drag);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!("exiting");
    result
}

fn run(term: &mut TerminalRenderer, mut quiz: QuizMachine, mut drag: DragInput) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let frame = Duration::from_millis(FRAME_MS);

    let view = QuizView::default();
    let mut screen = Screen::new();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        quiz.advance(now_ms());
        screen.apply_all(&quiz.drain_events());

        // The quiz drops a held fragment on its own when the board resets or a
        // pick-up was refused; forget the gesture so the next press starts fresh.
        if drag.held().is_some() && quiz.held().is_none() {
            drag.reset();
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let layout: Layout = view.render_into(&screen, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if !event::poll(frame)? {
            continue;
        }
        let now = now_ms();
        match event::read()? {
            Event::Key(key) => {
                if quiz.held().is_some() && is_drag_cancel(key) {
                    if let Some(signal) = drag.cancel(&layout) {
                        quiz.apply_drag(signal, now);
                    }
                    continue;
                }
                let ctx = KeyContext::new(quiz.phase(), quiz.pending_confirmation().is_some());
                if let Some(command) = handle_key_event(key, ctx) {
                    if dispatch(&mut quiz, command, now).is_break() {
                        return Ok(());
                    }
                }
            }
            Event::Mouse(mouse) => {
                let press = matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left));
                if press && drag.held().is_none() {
                    if let Some(command) = layout.control_at(mouse_point(&mouse)) {
                        if dispatch(&mut quiz, command, now).is_break() {
                            return Ok(());
                        }
                        continue;
                    }
                }
                if let Some(signal) = drag.handle_mouse(&mouse, &layout) {
                    quiz.apply_drag(signal, now);
                }
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn dispatch(quiz: &mut QuizMachine, command: Command, now_ms: u64) -> ControlFlow<()> {
    match command {
        Command::Exit => return ControlFlow::Break(()),
        Command::Intent(intent) => {
            let accepted = quiz.apply_intent(intent, now_ms);
            debug!(intent = intent.as_str(), accepted, "intent");
        }
        Command::Confirm(answer) => {
            quiz.resolve_confirmation(answer, now_ms);
        }
    }
    ControlFlow::Continue(())
}
