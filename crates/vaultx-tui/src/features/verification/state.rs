//! Verification flow state.

use std::time::Duration;

use vaultx_core::config::VerificationConfig;
use vaultx_core::phone::{self, Country, PhoneCandidate};

use crate::code_input::CodeInputState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    CodeSent,
}

/// Focusable controls on the verification screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Country,
    Phone,
    Send,
    Code,
    Resend,
    Skip,
}

const COLLECTING_RING: [Focus; 4] = [Focus::Country, Focus::Phone, Focus::Send, Focus::Skip];
const CODE_SENT_RING: [Focus; 3] = [Focus::Code, Focus::Resend, Focus::Skip];

/// Tunables resolved from `[verification]` config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationSettings {
    pub code_length: usize,
    pub min_phone_digits: usize,
    pub resend_cooldown_secs: u64,
    pub success_delay: Duration,
    pub default_country_code: String,
}

impl From<&VerificationConfig> for VerificationSettings {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_length: config.code_length.max(1),
            min_phone_digits: config.min_phone_digits,
            resend_cooldown_secs: u64::from(config.resend_cooldown_secs),
            success_delay: config.success_delay(),
            default_country_code: config.default_country_code.clone(),
        }
    }
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self::from(&VerificationConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct VerificationState {
    pub phase: Phase,
    pub focus: Focus,
    pub candidate: PhoneCandidate,
    /// Picked country; codes like `+1` are shared, so the code alone is ambiguous.
    pub country: Option<Country>,
    pub code: CodeInputState,
    pub sending: bool,
    pub verifying: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub resend_count: u32,
    pub cooldown_remaining: u64,
    /// Number that passed verification; set while the success delay runs.
    pub verified_phone: Option<String>,
    prefilled: bool,
    pub settings: VerificationSettings,
}

impl Default for VerificationState {
    fn default() -> Self {
        Self::new(VerificationSettings::default())
    }
}

impl VerificationState {
    pub fn new(settings: VerificationSettings) -> Self {
        Self {
            phase: Phase::Collecting,
            focus: Focus::Phone,
            candidate: PhoneCandidate::new(settings.default_country_code.clone(), ""),
            country: phone::country_for_code(&settings.default_country_code).copied(),
            code: CodeInputState::new(settings.code_length),
            sending: false,
            verifying: false,
            error_message: None,
            info_message: None,
            resend_count: 0,
            cooldown_remaining: 0,
            verified_phone: None,
            prefilled: false,
            settings,
        }
    }

    /// Fills the phone fields from a stored profile number, once.
    ///
    /// Never overwrites digits the user already typed.
    pub fn apply_prefill(&mut self, stored: Option<&str>) {
        if self.prefilled {
            return;
        }
        self.prefilled = true;

        let Some(stored) = stored.map(str::trim).filter(|s| !s.is_empty()) else {
            return;
        };
        if !self.candidate.local_digits.is_empty() {
            return;
        }
        self.candidate = phone::parse_prefill(stored, &self.settings.default_country_code);
        self.country = phone::country_for_code(&self.candidate.country_code).copied();
    }

    /// Replaces the local digits, keeping ASCII digits only.
    pub fn set_local_digits(&mut self, raw: &str) {
        self.candidate.local_digits = phone::sanitize_digits(raw);
    }

    pub fn select_country(&mut self, country: Country) {
        self.candidate.country_code = country.calling_code.to_string();
        self.country = Some(country);
    }

    pub fn full_number(&self) -> String {
        self.candidate.full_number()
    }

    pub fn can_send(&self) -> bool {
        !self.sending && !self.candidate.is_empty()
    }

    pub fn can_resend(&self) -> bool {
        self.cooldown_remaining == 0 && !self.sending
    }

    pub fn is_completed(&self) -> bool {
        self.verified_phone.is_some()
    }

    /// Controls reachable with Tab in the current phase.
    pub fn focus_ring(&self) -> &'static [Focus] {
        match self.phase {
            Phase::Collecting => &COLLECTING_RING,
            Phase::CodeSent => &CODE_SENT_RING,
        }
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_prev(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let ring = self.focus_ring();
        let len = ring.len() as isize;
        let current = ring.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.focus = ring[next];
    }

    /// Snaps focus into the ring of the current phase.
    pub fn normalize_focus(&mut self) {
        if !self.focus_ring().contains(&self.focus) {
            self.focus = self.focus_ring()[0];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefill_with_known_code() {
        let mut state = VerificationState::default();
        state.apply_prefill(Some("+447911123456"));
        assert_eq!(state.candidate.country_code, "+44");
        assert_eq!(state.candidate.local_digits, "7911123456");
    }

    #[test]
    fn test_prefill_without_plus_keeps_default_code() {
        let mut state = VerificationState::default();
        state.apply_prefill(Some("5551234567"));
        assert_eq!(state.candidate.country_code, "+1");
        assert_eq!(state.candidate.local_digits, "5551234567");
    }

    #[test]
    fn test_prefill_does_not_overwrite_typed_digits() {
        let mut state = VerificationState::default();
        state.set_local_digits("123");
        state.apply_prefill(Some("+447911123456"));
        assert_eq!(state.candidate.country_code, "+1");
        assert_eq!(state.candidate.local_digits, "123");
    }

    #[test]
    fn test_prefill_runs_once() {
        let mut state = VerificationState::default();
        state.apply_prefill(None);
        state.apply_prefill(Some("+447911123456"));
        assert!(state.candidate.local_digits.is_empty());
    }

    #[test]
    fn test_select_country_keeps_shared_code_choice() {
        let mut state = VerificationState::default();
        let canada = vaultx_core::phone::COUNTRIES
            .iter()
            .find(|c| c.name == "Canada")
            .copied()
            .unwrap();
        state.select_country(canada);
        assert_eq!(state.candidate.country_code, "+1");
        assert_eq!(state.country.map(|c| c.name), Some("Canada"));
    }

    #[test]
    fn test_local_digits_are_sanitized() {
        let mut state = VerificationState::default();
        state.set_local_digits("(555) 123-4567");
        assert_eq!(state.candidate.local_digits, "5551234567");
    }

    #[test]
    fn test_focus_ring_wraps() {
        let mut state = VerificationState::default();
        assert_eq!(state.focus, Focus::Phone);
        state.focus_next();
        state.focus_next();
        assert_eq!(state.focus, Focus::Skip);
        state.focus_next();
        assert_eq!(state.focus, Focus::Country);
        state.focus_prev();
        assert_eq!(state.focus, Focus::Skip);
    }

    #[test]
    fn test_normalize_focus_on_phase_change() {
        let mut state = VerificationState::default();
        state.phase = Phase::CodeSent;
        state.normalize_focus();
        assert_eq!(state.focus, Focus::Code);
    }

    #[test]
    fn test_settings_follow_config() {
        let config = VerificationConfig {
            code_length: 4,
            ..VerificationConfig::default()
        };
        let state = VerificationState::new(VerificationSettings::from(&config));
        assert_eq!(state.code.len(), 4);
        assert_eq!(state.settings.resend_cooldown_secs, 60);
    }
}
