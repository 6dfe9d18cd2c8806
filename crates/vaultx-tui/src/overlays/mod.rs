//! Modal overlays.
//!
//! An overlay takes over keyboard input until it closes. Each one owns its
//! state, key handler and render function, and reports what the app should
//! do through an [`OverlayUpdate`].
//!
//! - `country_picker.rs`: calling-code selection for the phone field
//! - `language_picker.rs`: UI language selection (Ctrl+L)
//! - `render_utils.rs`: shared popup chrome

pub mod country_picker;
pub mod language_picker;
pub mod render_utils;

pub use country_picker::CountryPickerState;
use crossterm::event::KeyEvent;
pub use language_picker::LanguagePickerState;
use ratatui::Frame;
use ratatui::layout::Rect;
use vaultx_core::i18n::Translator;

use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::state::TuiState;

/// Requests to open a new overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    CountryPicker,
    LanguagePicker,
}

impl OverlayRequest {
    /// Builds the overlay from current state.
    pub fn build(self, tui: &TuiState) -> (Overlay, Vec<UiEffect>) {
        match self {
            OverlayRequest::CountryPicker => {
                let (picker, effects) = CountryPickerState::open(tui.verification.country);
                (Overlay::CountryPicker(picker), effects)
            }
            OverlayRequest::LanguagePicker => {
                let (picker, effects) = LanguagePickerState::open(tui.translator.language());
                (Overlay::LanguagePicker(picker), effects)
            }
        }
    }
}

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self::new(OverlayTransition::Open(request))
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    CountryPicker(CountryPickerState),
    LanguagePicker(LanguagePickerState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, t: &Translator) {
        match self {
            Overlay::CountryPicker(p) => p.render(frame, area, t),
            Overlay::LanguagePicker(p) => p.render(frame, area, t),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::CountryPicker(p) => p.handle_key(tui, key),
            Overlay::LanguagePicker(p) => p.handle_key(tui, key),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience render helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, t: &Translator);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, t: &Translator) {
        if let Some(overlay) = self {
            overlay.render(frame, area, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use vaultx_core::i18n::Language;

    use super::*;
    use crate::state::AppState;

    #[test]
    fn test_build_country_picker_starts_on_current_country() {
        let mut app = AppState::for_tests();
        app.tui.verification.apply_prefill(Some("+447700900123"));
        let (overlay, effects) = OverlayRequest::CountryPicker.build(&app.tui);
        assert!(effects.is_empty());
        let Overlay::CountryPicker(picker) = overlay else {
            panic!("expected country picker");
        };
        assert_eq!(
            picker.selected_country().map(|c| c.calling_code),
            Some("+44")
        );
    }

    #[test]
    fn test_build_language_picker() {
        let mut app = AppState::for_tests();
        app.tui.translator = Translator::new(Language::Ja);
        let (overlay, _) = OverlayRequest::LanguagePicker.build(&app.tui);
        let Overlay::LanguagePicker(picker) = overlay else {
            panic!("expected language picker");
        };
        assert_eq!(picker.filtered.get(picker.selected), Some(&Language::Ja));
    }
}
