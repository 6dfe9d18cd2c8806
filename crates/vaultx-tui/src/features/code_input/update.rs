//! Key handling for the segmented code input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::CodeInputState;

/// Outcome of a key press on the code input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeInputAction {
    /// The key was consumed; nothing else to do.
    Handled,
    /// All cells are filled; carries the code.
    Completed(String),
    /// The key is not for the code input.
    Ignored,
}

impl From<Option<String>> for CodeInputAction {
    fn from(completion: Option<String>) -> Self {
        completion.map_or(CodeInputAction::Handled, CodeInputAction::Completed)
    }
}

pub fn handle_key(state: &mut CodeInputState, key: KeyEvent) -> CodeInputAction {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return CodeInputAction::Ignored;
    }

    match key.code {
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            let index = state.focus();
            state.edit(index, &ch.to_string()).into()
        }
        // Swallow other printable keys so they don't leak to the flow.
        KeyCode::Char(_) => CodeInputAction::Handled,
        KeyCode::Backspace => {
            let index = state.focus();
            state.backspace(index).into()
        }
        KeyCode::Delete => {
            let index = state.focus();
            state.edit(index, "").into()
        }
        KeyCode::Left => {
            state.move_left();
            CodeInputAction::Handled
        }
        KeyCode::Right => {
            state.move_right();
            CodeInputAction::Handled
        }
        _ => CodeInputAction::Ignored,
    }
}

pub fn handle_paste(state: &mut CodeInputState, text: &str) -> CodeInputAction {
    state.paste(text).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(state: &mut CodeInputState, code: KeyCode) -> CodeInputAction {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_typing_six_digits_completes() {
        let mut state = CodeInputState::default();
        for ch in "12345".chars() {
            assert_eq!(press(&mut state, KeyCode::Char(ch)), CodeInputAction::Handled);
        }
        assert_eq!(
            press(&mut state, KeyCode::Char('6')),
            CodeInputAction::Completed("123456".to_string())
        );
    }

    #[test]
    fn test_letters_are_swallowed() {
        let mut state = CodeInputState::default();
        assert_eq!(press(&mut state, KeyCode::Char('x')), CodeInputAction::Handled);
        assert!(state.is_empty());
    }

    #[test]
    fn test_arrows_move_focus() {
        let mut state = CodeInputState::default();
        press(&mut state, KeyCode::Right);
        press(&mut state, KeyCode::Right);
        assert_eq!(state.focus(), 2);
        press(&mut state, KeyCode::Left);
        assert_eq!(state.focus(), 1);
    }

    #[test]
    fn test_backspace_walks_back() {
        let mut state = CodeInputState::default();
        press(&mut state, KeyCode::Char('1'));
        press(&mut state, KeyCode::Backspace);
        assert_eq!(state.focus(), 0);
        press(&mut state, KeyCode::Backspace);
        assert!(state.is_empty());
    }

    #[test]
    fn test_navigation_keys_fall_through() {
        let mut state = CodeInputState::default();
        assert_eq!(press(&mut state, KeyCode::Tab), CodeInputAction::Ignored);
        assert_eq!(press(&mut state, KeyCode::Enter), CodeInputAction::Ignored);
    }

    #[test]
    fn test_paste_event() {
        let mut state = CodeInputState::default();
        assert_eq!(
            handle_paste(&mut state, " 987 654 "),
            CodeInputAction::Completed("987654".to_string())
        );
    }
}
