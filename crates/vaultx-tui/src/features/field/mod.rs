//! Labeled text-entry control.
//!
//! The field never owns its value. The caller passes the current value in
//! through [`FieldProps`], and key handling hands back the proposed new value
//! for the caller to store (or drop).

mod render;
mod update;

pub use render::{FIELD_HEIGHT, field_height, render_field};
pub use update::{FieldChange, apply_key, apply_paste};

/// Which characters a field forwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Text,
    /// Digits and phone punctuation (`+ - ( ) space`).
    Tel,
    /// Digits only.
    Numeric,
}

impl InputMode {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            InputMode::Text => !ch.is_control(),
            InputMode::Tel => ch.is_ascii_digit() || matches!(ch, '+' | '-' | '(' | ')' | ' '),
            InputMode::Numeric => ch.is_ascii_digit(),
        }
    }
}

/// Everything needed to draw and drive one field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldProps<'a> {
    pub label: Option<&'a str>,
    pub value: &'a str,
    pub placeholder: Option<&'a str>,
    pub required: bool,
    pub disabled: bool,
    pub error: Option<&'a str>,
    /// Decoration drawn before the value (e.g. a calling code).
    pub prefix: Option<&'a str>,
    pub mode: InputMode,
}

impl<'a> FieldProps<'a> {
    pub fn new(value: &'a str) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error.filter(|e| !e.is_empty());
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = Some(prefix);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: InputMode) -> Self {
        self.mode = mode;
        self
    }
}
