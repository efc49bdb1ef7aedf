//! Key mapping from terminal events to quiz commands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::hit::Command;
use crate::types::{QuizIntent, QuizPhase};

/// What the screen currently offers; decides which keys mean anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyContext {
    pub phase: QuizPhase,
    pub confirming: bool,
}

impl KeyContext {
    pub fn new(phase: QuizPhase, confirming: bool) -> Self {
        Self { phase, confirming }
    }
}

/// Map keyboard input to a command for the current screen.
pub fn handle_key_event(key: KeyEvent, ctx: KeyContext) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_exit(key) {
        return Some(Command::Exit);
    }

    if ctx.confirming {
        return match key.code {
            KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(Command::Confirm(true)),
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(Command::Confirm(false)),
            _ => None,
        };
    }

    match ctx.phase {
        QuizPhase::Idle => match key.code {
            KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => {
                Some(Command::Intent(QuizIntent::Start))
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Intent(QuizIntent::Quit)),
            _ => None,
        },
        QuizPhase::Active => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Intent(QuizIntent::Quit)),
            _ => None,
        },
        QuizPhase::Complete => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(Command::Intent(QuizIntent::Retry))
            }
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Intent(QuizIntent::Cancel)),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Intent(QuizIntent::Quit)),
            _ => None,
        },
        QuizPhase::Terminated => match key.code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(Command::Intent(QuizIntent::Restart))
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Exit),
            _ => None,
        },
        QuizPhase::Unavailable => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                Some(Command::Exit)
            }
            _ => None,
        },
    }
}

/// Ctrl+C always leaves the program.
pub fn should_exit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Esc drops whatever is held back into the pool.
pub fn is_drag_cancel(key: KeyEvent) -> bool {
    key.kind != KeyEventKind::Release && key.code == KeyCode::Esc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(c: char) -> KeyEvent {
        KeyEvent::from(KeyCode::Char(c))
    }

    fn ctx(phase: QuizPhase) -> KeyContext {
        KeyContext::new(phase, false)
    }

    #[test]
    fn test_start_screen_keys() {
        assert_eq!(
            handle_key_event(key('s'), ctx(QuizPhase::Idle)),
            Some(Command::Intent(QuizIntent::Start))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter), ctx(QuizPhase::Idle)),
            Some(Command::Intent(QuizIntent::Start))
        );
        assert_eq!(
            handle_key_event(key('Q'), ctx(QuizPhase::Idle)),
            Some(Command::Intent(QuizIntent::Quit))
        );
        assert_eq!(handle_key_event(key('r'), ctx(QuizPhase::Idle)), None);
    }

    #[test]
    fn test_active_only_offers_quit() {
        assert_eq!(
            handle_key_event(key('q'), ctx(QuizPhase::Active)),
            Some(Command::Intent(QuizIntent::Quit))
        );
        assert_eq!(handle_key_event(key('s'), ctx(QuizPhase::Active)), None);
        assert_eq!(handle_key_event(key('r'), ctx(QuizPhase::Active)), None);
    }

    #[test]
    fn test_result_screen_keys() {
        assert_eq!(
            handle_key_event(key('r'), ctx(QuizPhase::Complete)),
            Some(Command::Intent(QuizIntent::Retry))
        );
        assert_eq!(
            handle_key_event(key('c'), ctx(QuizPhase::Complete)),
            Some(Command::Intent(QuizIntent::Cancel))
        );
        assert_eq!(
            handle_key_event(key('q'), ctx(QuizPhase::Complete)),
            Some(Command::Intent(QuizIntent::Quit))
        );
    }

    #[test]
    fn test_goodbye_and_error_screens() {
        assert_eq!(
            handle_key_event(key('r'), ctx(QuizPhase::Terminated)),
            Some(Command::Intent(QuizIntent::Restart))
        );
        assert_eq!(
            handle_key_event(key('q'), ctx(QuizPhase::Terminated)),
            Some(Command::Exit)
        );
        assert_eq!(
            handle_key_event(key('q'), ctx(QuizPhase::Unavailable)),
            Some(Command::Exit)
        );
        assert_eq!(handle_key_event(key('s'), ctx(QuizPhase::Unavailable)), None);
    }

    #[test]
    fn test_confirmation_keys_take_over() {
        let confirming = KeyContext::new(QuizPhase::Active, true);
        assert_eq!(handle_key_event(key('y'), confirming), Some(Command::Confirm(true)));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter), confirming),
            Some(Command::Confirm(true))
        );
        assert_eq!(handle_key_event(key('N'), confirming), Some(Command::Confirm(false)));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc), confirming),
            Some(Command::Confirm(false))
        );
        assert_eq!(handle_key_event(key('q'), confirming), None);
    }

    #[test]
    fn test_ctrl_c_exits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(should_exit(ctrl_c));
        assert!(!should_exit(key('c')));
        assert_eq!(
            handle_key_event(ctrl_c, ctx(QuizPhase::Complete)),
            Some(Command::Exit)
        );
        assert_eq!(
            handle_key_event(ctrl_c, KeyContext::new(QuizPhase::Active, true)),
            Some(Command::Exit)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('s'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key_event(release, ctx(QuizPhase::Idle)), None);
        assert!(!is_drag_cancel(KeyEvent {
            code: KeyCode::Esc,
            ..release
        }));
        assert!(is_drag_cancel(KeyEvent::from(KeyCode::Esc)));
    }
}
