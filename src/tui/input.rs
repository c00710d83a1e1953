//! Key → action dispatch for the editor screen.
//!
//! Keys resolve to an [`Action`] here; applying the action lives with the
//! event loop. The entry list and validator never see a key event.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything the editor screen can be asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddEntry,
    RemoveEntry,
    NextEntry,
    PrevEntry,
    NextField,
    PrevField,
    InsertChar(char),
    DeleteChar,
    ClearField,
    Export,
    CopySavedPath,
    ToggleHelp,
    Quit,
}

/// The dispatch table. Digits and a leading minus edit the focused field;
/// everything else is navigation or a trigger.
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
        (_, KeyCode::Char('q')) => Some(Action::Quit),
        (_, KeyCode::Char('a')) => Some(Action::AddEntry),
        (_, KeyCode::Char('d')) => Some(Action::RemoveEntry),
        (_, KeyCode::Char('e')) | (_, KeyCode::Enter) => Some(Action::Export),
        (_, KeyCode::Char('y')) => Some(Action::CopySavedPath),
        (_, KeyCode::Char('?')) => Some(Action::ToggleHelp),
        (_, KeyCode::Tab) | (_, KeyCode::Right) => Some(Action::NextField),
        (_, KeyCode::BackTab) | (_, KeyCode::Left) => Some(Action::PrevField),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(Action::NextEntry),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(Action::PrevEntry),
        (_, KeyCode::Backspace) => Some(Action::DeleteChar),
        (_, KeyCode::Delete) => Some(Action::ClearField),
        (_, KeyCode::Char(c)) if c.is_ascii_digit() || c == '-' => Some(Action::InsertChar(c)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_edit_the_field() {
        assert_eq!(
            action_for(&key(KeyCode::Char('7'))),
            Some(Action::InsertChar('7'))
        );
        assert_eq!(
            action_for(&key(KeyCode::Char('-'))),
            Some(Action::InsertChar('-'))
        );
    }

    #[test]
    fn triggers_map_to_actions() {
        assert_eq!(action_for(&key(KeyCode::Char('a'))), Some(Action::AddEntry));
        assert_eq!(
            action_for(&key(KeyCode::Char('d'))),
            Some(Action::RemoveEntry)
        );
        assert_eq!(action_for(&key(KeyCode::Enter)), Some(Action::Export));
        assert_eq!(action_for(&key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(
            action_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        assert_eq!(action_for(&key(KeyCode::Char('z'))), None);
        assert_eq!(action_for(&key(KeyCode::Home)), None);
    }
}
