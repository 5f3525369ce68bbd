//! Event handling for the review TUI

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Phase};

/// Handle a key event, returns true if the app should quit
pub fn handle_event(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // "nothing due" screen: any key leaves
    if app.is_empty() {
        return matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(_));
    }

    match app.phase {
        Phase::Answering => handle_answering(app, key),
        Phase::Checked { .. } => handle_checked(app, key),
    }
}

fn handle_answering(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Enter => app.submit(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
    false
}

fn handle_checked(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('n') | KeyCode::Right | KeyCode::Tab => !app.next_card(),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::test_card;
    use crate::srs::BoxIntervals;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    fn two_card_app() -> App {
        let mut a = test_card("a");
        a.answer = "--flag".to_string();
        let mut b = test_card("b");
        b.answer = "--flag".to_string();
        App::new(&[a, b], BoxIntervals::default())
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut app = two_card_app();
        for c in "--flag".chars() {
            assert!(!handle_event(&mut app, key(KeyCode::Char(c))));
        }
        assert_eq!(app.input, "--flag");
        assert!(!handle_event(&mut app, key(KeyCode::Enter)));
        assert_eq!(app.phase, Phase::Checked { correct: true });
    }

    #[test]
    fn test_backspace() {
        let mut app = two_card_app();
        handle_event(&mut app, key(KeyCode::Char('x')));
        handle_event(&mut app, key(KeyCode::Backspace));
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_next_after_check() {
        let mut app = two_card_app();
        handle_event(&mut app, key(KeyCode::Enter));
        // 'n' is ignored while answering, advances once checked
        assert!(!handle_event(&mut app, key(KeyCode::Char('n'))));
        assert_eq!(app.idx, 1);
    }

    #[test]
    fn test_quit_on_last_card() {
        let mut app = two_card_app();
        handle_event(&mut app, key(KeyCode::Enter));
        handle_event(&mut app, key(KeyCode::Char('n')));
        handle_event(&mut app, key(KeyCode::Enter));
        // advancing past the last card quits
        assert!(handle_event(&mut app, key(KeyCode::Tab)));
    }

    #[test]
    fn test_q_only_quits_after_check() {
        let mut app = two_card_app();
        assert!(!handle_event(&mut app, key(KeyCode::Char('q'))));
        assert_eq!(app.input, "q", "'q' is just a letter while answering");
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(handle_event(&mut app, key(KeyCode::Char('q'))));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = two_card_app();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_event(&mut app, ev));
    }

    #[test]
    fn test_empty_session_any_key_quits() {
        let mut app = App::new(&[], BoxIntervals::default());
        assert!(handle_event(&mut app, key(KeyCode::Enter)));
    }
}
