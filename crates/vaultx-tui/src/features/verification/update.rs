//! Verification flow reducer.
//!
//! Pure state transitions. Anything that needs the runtime (HTTP calls,
//! timers, leaving the screen) is returned as a [`FlowCommand`] and turned
//! into effects by the main reducer, which owns task ids.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vaultx_core::i18n::{Namespace, Translator};
use vaultx_core::sms::{self, SendReceipt, VerificationError};

use super::state::{Focus, Phase, VerificationState};
use crate::code_input::{self, CodeInputAction};
use crate::field::{self, FieldProps, InputMode};

/// How the flow ended, from its own point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Verified { phone: String },
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowCommand {
    SendCode { phone: String },
    VerifyCode { phone: String, code: String },
    /// Restart the resend countdown (any running one is replaced).
    StartCooldown { seconds: u64 },
    ScheduleHandoff { delay: Duration },
    OpenCountryPicker,
    Finish(FlowOutcome),
}

fn auth(t: &Translator, key: &str) -> String {
    t.t(Namespace::Auth, key)
}

/// Validates the phone and requests a code.
pub fn send_code(state: &mut VerificationState, t: &Translator) -> Vec<FlowCommand> {
    if state.sending || state.is_completed() {
        return vec![];
    }

    let invalid = auth(t, "sms.invalid_phone");
    if let Err(err) = sms::validate_phone(&state.candidate, state.settings.min_phone_digits, &invalid)
    {
        tracing::debug!(digits = state.candidate.local_digits.len(), "phone rejected locally");
        state.error_message = Some(err.user_message(&invalid, &invalid));
        return vec![];
    }

    state.sending = true;
    state.error_message = None;
    state.info_message = None;
    vec![FlowCommand::SendCode {
        phone: state.full_number(),
    }]
}

pub fn handle_code_sent(
    state: &mut VerificationState,
    t: &Translator,
    phone: &str,
    result: Result<SendReceipt, VerificationError>,
) -> Vec<FlowCommand> {
    state.sending = false;

    match result {
        Ok(_) => {
            let length = state.settings.code_length.to_string();
            state.phase = Phase::CodeSent;
            state.focus = Focus::Code;
            state.error_message = None;
            state.info_message = Some(t.t_with(
                Namespace::Auth,
                "sms.code_sent",
                &[("length", &length), ("phone", phone)],
            ));
            state.resend_count += 1;
            state.code.reset();
            state.code.set_disabled(false);
            state.cooldown_remaining = state.settings.resend_cooldown_secs;

            if state.cooldown_remaining > 0 {
                vec![FlowCommand::StartCooldown {
                    seconds: state.cooldown_remaining,
                }]
            } else {
                vec![]
            }
        }
        Err(err) => {
            state.error_message = Some(err.user_message(
                &auth(t, "sms.send_failed"),
                &auth(t, "sms.send_failed_generic"),
            ));
            vec![]
        }
    }
}

/// Submits a completed code.
pub fn submit_code(state: &mut VerificationState, code: String) -> Vec<FlowCommand> {
    if state.verifying || state.phase != Phase::CodeSent || state.is_completed() {
        return vec![];
    }

    state.verifying = true;
    state.error_message = None;
    state.code.set_disabled(true);
    vec![FlowCommand::VerifyCode {
        phone: state.full_number(),
        code,
    }]
}

pub fn handle_code_checked(
    state: &mut VerificationState,
    t: &Translator,
    phone: String,
    result: Result<(), VerificationError>,
) -> Vec<FlowCommand> {
    state.verifying = false;

    match result {
        Ok(()) => {
            state.error_message = None;
            state.info_message = Some(auth(t, "sms.verified"));
            state.verified_phone = Some(phone);
            vec![FlowCommand::ScheduleHandoff {
                delay: state.settings.success_delay,
            }]
        }
        Err(err) => {
            state.error_message = Some(err.user_message(
                &auth(t, "sms.invalid_code"),
                &auth(t, "sms.invalid_code_generic"),
            ));
            state.code.set_disabled(false);
            state.code.signal_error();
            state.focus = Focus::Code;
            vec![]
        }
    }
}

/// Back to collecting, then straight into a new send.
pub fn resend(state: &mut VerificationState, t: &Translator) -> Vec<FlowCommand> {
    if !state.can_resend() || state.is_completed() {
        return vec![];
    }
    state.phase = Phase::Collecting;
    state.focus = Focus::Send;
    send_code(state, t)
}

pub fn skip(state: &VerificationState) -> Vec<FlowCommand> {
    if state.is_completed() {
        return vec![];
    }
    vec![FlowCommand::Finish(FlowOutcome::Skipped)]
}

pub fn cooldown_tick(state: &mut VerificationState) {
    state.cooldown_remaining = state.cooldown_remaining.saturating_sub(1);
}

pub fn cooldown_finished(state: &mut VerificationState) {
    state.cooldown_remaining = 0;
}

pub fn handoff_due(state: &VerificationState) -> Vec<FlowCommand> {
    match &state.verified_phone {
        Some(phone) => vec![FlowCommand::Finish(FlowOutcome::Verified {
            phone: phone.clone(),
        })],
        None => vec![],
    }
}

pub fn phone_props<'a>(state: &'a VerificationState) -> FieldProps<'a> {
    FieldProps::new(&state.candidate.local_digits)
        .mode(InputMode::Tel)
        .disabled(state.sending)
        .prefix(&state.candidate.country_code)
}

/// Routes a key to the focused control.
pub fn handle_key(
    state: &mut VerificationState,
    t: &Translator,
    key: KeyEvent,
) -> Vec<FlowCommand> {
    if state.is_completed() {
        return vec![];
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus_next();
            return vec![];
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_prev();
            return vec![];
        }
        _ => {}
    }

    let activate = matches!(key.code, KeyCode::Enter)
        || (matches!(key.code, KeyCode::Char(' ')) && key.modifiers == KeyModifiers::NONE);

    match state.focus {
        Focus::Country if activate && !state.sending => vec![FlowCommand::OpenCountryPicker],
        Focus::Phone => {
            if key.code == KeyCode::Enter {
                return send_code(state, t);
            }
            if let Some(value) = field::apply_key(&phone_props(state), key).into_value() {
                state.set_local_digits(&value);
            }
            vec![]
        }
        Focus::Send if activate => send_code(state, t),
        Focus::Code => match code_input::handle_key(&mut state.code, key) {
            CodeInputAction::Completed(code) => submit_code(state, code),
            CodeInputAction::Handled => vec![],
            CodeInputAction::Ignored if key.code == KeyCode::Enter && state.code.is_complete() => {
                let code = state.code.value();
                submit_code(state, code)
            }
            CodeInputAction::Ignored => vec![],
        },
        Focus::Resend if activate => resend(state, t),
        Focus::Skip if activate => skip(state),
        _ => vec![],
    }
}

/// Routes pasted text: the code input in CodeSent, the phone field otherwise.
pub fn handle_paste(state: &mut VerificationState, text: &str) -> Vec<FlowCommand> {
    if state.is_completed() {
        return vec![];
    }

    match state.phase {
        Phase::CodeSent => {
            state.focus = Focus::Code;
            match code_input::handle_paste(&mut state.code, text) {
                CodeInputAction::Completed(code) => submit_code(state, code),
                _ => vec![],
            }
        }
        Phase::Collecting => {
            if let Some(value) = field::apply_paste(&phone_props(state), text).into_value() {
                state.set_local_digits(&value);
                state.focus = Focus::Phone;
            }
            vec![]
        }
    }
}
