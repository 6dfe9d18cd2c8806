use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::FieldProps;

/// Result of feeding input to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// The caller's change handler should receive this value.
    Changed(String),
    /// Nothing to forward (disabled, filtered, or not an editing key).
    Ignored,
}

impl FieldChange {
    pub fn into_value(self) -> Option<String> {
        match self {
            FieldChange::Changed(value) => Some(value),
            FieldChange::Ignored => None,
        }
    }
}

/// Applies an editing key to the caller's current value.
///
/// Supports typing at the end, Backspace, and Ctrl+U to clear.
pub fn apply_key(props: &FieldProps<'_>, key: KeyEvent) -> FieldChange {
    if props.disabled {
        return FieldChange::Ignored;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);

    match key.code {
        KeyCode::Char('u') if ctrl => {
            if props.value.is_empty() {
                FieldChange::Ignored
            } else {
                FieldChange::Changed(String::new())
            }
        }
        KeyCode::Char(ch) if !ctrl && !alt && props.mode.accepts(ch) => {
            let mut value = props.value.to_string();
            value.push(ch);
            FieldChange::Changed(value)
        }
        KeyCode::Backspace => {
            let mut value = props.value.to_string();
            if value.pop().is_some() {
                FieldChange::Changed(value)
            } else {
                FieldChange::Ignored
            }
        }
        _ => FieldChange::Ignored,
    }
}

/// Appends the accepted characters of pasted text.
pub fn apply_paste(props: &FieldProps<'_>, text: &str) -> FieldChange {
    if props.disabled {
        return FieldChange::Ignored;
    }
    let accepted: String = text.chars().filter(|c| props.mode.accepts(*c)).collect();
    if accepted.is_empty() {
        return FieldChange::Ignored;
    }
    FieldChange::Changed(format!("{}{accepted}", props.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::field::InputMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_proposes_new_value() {
        let props = FieldProps::new("55");
        assert_eq!(
            apply_key(&props, key(KeyCode::Char('5'))),
            FieldChange::Changed("555".to_string())
        );
    }

    #[test]
    fn test_field_does_not_buffer() {
        // Caller ignores the change: next keystroke still starts from its value.
        let props = FieldProps::new("1");
        let _ = apply_key(&props, key(KeyCode::Char('2')));
        assert_eq!(
            apply_key(&props, key(KeyCode::Char('3'))),
            FieldChange::Changed("13".to_string())
        );
    }

    #[test]
    fn test_mode_filters_characters() {
        let props = FieldProps::new("").mode(InputMode::Numeric);
        assert_eq!(apply_key(&props, key(KeyCode::Char('a'))), FieldChange::Ignored);

        let props = FieldProps::new("").mode(InputMode::Tel);
        assert_eq!(
            apply_key(&props, key(KeyCode::Char('('))),
            FieldChange::Changed("(".to_string())
        );
    }

    #[test]
    fn test_disabled_forwards_nothing() {
        let props = FieldProps::new("12").disabled(true);
        assert_eq!(apply_key(&props, key(KeyCode::Char('3'))), FieldChange::Ignored);
        assert_eq!(apply_key(&props, key(KeyCode::Backspace)), FieldChange::Ignored);
        assert_eq!(apply_paste(&props, "345"), FieldChange::Ignored);
    }

    #[test]
    fn test_backspace_and_clear() {
        let props = FieldProps::new("12");
        assert_eq!(
            apply_key(&props, key(KeyCode::Backspace)),
            FieldChange::Changed("1".to_string())
        );
        assert_eq!(
            apply_key(&props, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            FieldChange::Changed(String::new())
        );
        let empty = FieldProps::new("");
        assert_eq!(apply_key(&empty, key(KeyCode::Backspace)), FieldChange::Ignored);
    }

    #[test]
    fn test_paste_keeps_accepted_characters() {
        let props = FieldProps::new("1").mode(InputMode::Numeric);
        assert_eq!(
            apply_paste(&props, "(555) 123"),
            FieldChange::Changed("1555123".to_string())
        );
        assert_eq!(apply_paste(&props, "abc"), FieldChange::Ignored);
    }
}
