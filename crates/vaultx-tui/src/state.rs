//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── verification: VerificationState (phone, code, messages, cooldown)
//! │   ├── shell: ShellState               (tab bar, scroll)
//! │   ├── translator: Translator          (active locale)
//! │   ├── task_seq: TaskSeq               (async task id generator)
//! │   └── tasks: Tasks                    (task lifecycle state)
//! └── overlay: Option<Overlay>            (modal overlays)
//! ```
//!
//! Overlays live beside `TuiState` so an overlay handler can hold `&mut self`
//! while reading the rest of the state.

use std::fmt;

use vaultx_core::config::Config;
use vaultx_core::i18n::Translator;

use crate::common::{TaskSeq, Tasks};
use crate::overlays::Overlay;
use crate::shell::{ShellState, Tab};
use crate::verification::{VerificationSettings, VerificationState};

/// How the verification screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandOff {
    /// The backend confirmed the code for `phone`.
    Verified { phone: String },
    /// The user chose to verify later.
    Skipped,
    /// A tab was chosen from the bottom bar.
    Navigate { tab: Tab },
    /// The user quit (Esc or Ctrl+C).
    Cancelled,
}

impl fmt::Display for HandOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandOff::Verified { phone } => write!(f, "verified {phone}"),
            HandOff::Skipped => f.write_str("skipped"),
            HandOff::Navigate { tab } => write!(f, "navigate {tab}"),
            HandOff::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config, translator: Translator, prefill_phone: Option<&str>) -> Self {
        Self {
            tui: TuiState::new(config, translator, prefill_phone),
            overlay: None,
        }
    }

    /// English, default config, no stored phone.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(Config::default(), Translator::default(), None)
    }
}

/// TUI application state (non-overlay).
pub struct TuiState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Set once the screen has been left.
    pub outcome: Option<HandOff>,
    pub config: Config,
    pub translator: Translator,
    pub verification: VerificationState,
    pub shell: ShellState,
    /// Task id sequence for async operations.
    pub task_seq: TaskSeq,
    /// Task lifecycle state for async operations.
    pub tasks: Tasks,
}

impl TuiState {
    pub fn new(config: Config, translator: Translator, prefill_phone: Option<&str>) -> Self {
        let mut verification =
            VerificationState::new(VerificationSettings::from(&config.verification));
        verification.apply_prefill(prefill_phone);
        let shell = ShellState::new(config.show_tabs);

        Self {
            should_quit: false,
            outcome: None,
            config,
            translator,
            verification,
            shell,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
        }
    }

    /// Records how the screen was left. The first outcome wins.
    pub fn finish(&mut self, outcome: HandOff) {
        if self.outcome.is_none() {
            tracing::info!(outcome = %outcome, "leaving verification screen");
            self.outcome = Some(outcome);
        }
        self.should_quit = true;
    }
}
