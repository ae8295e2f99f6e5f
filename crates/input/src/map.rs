//! Key mapping from terminal events to game actions.

use crate::types::{Action, Guess};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to actions.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Guesses
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Action::Guess(Guess::Higher))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Action::Guess(Guess::Lower))
        }

        // Menus
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(Action::Confirm)
        }
        KeyCode::Char('?') | KeyCode::Char('i') | KeyCode::Char('I') => Some(Action::HowToPlay),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') | KeyCode::Char('B') => {
            Some(Action::Back)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
