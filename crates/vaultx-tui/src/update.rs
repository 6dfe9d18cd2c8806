//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use vaultx_core::i18n::Translator;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::{SmsUiEvent, UiEvent};
use crate::mutations::{ConfigMutation, StateMutation, VerificationMutation};
use crate::overlays::{OverlayRequest, OverlayTransition, OverlayUpdate};
use crate::shell::{self, Tab};
use crate::state::{AppState, HandOff, TuiState};
use crate::verification::update as flow;
use crate::verification::{FlowCommand, FlowOutcome, Focus};

/// Rows moved per PageUp/PageDown.
const PAGE_SCROLL: i32 = 5;
/// Rows moved per mouse wheel notch.
const WHEEL_SCROLL: i32 = 2;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { .. } => {
            handle_frame(&mut app.tui);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Sms(sms_event) => handle_sms_event(&mut app.tui, sms_event),
        UiEvent::CooldownTick { task } => {
            if app.tui.tasks.cooldown.is_active(task) {
                flow::cooldown_tick(&mut app.tui.verification);
            }
            vec![]
        }
        UiEvent::CooldownFinished => {
            flow::cooldown_finished(&mut app.tui.verification);
            vec![]
        }
        UiEvent::HandoffDue => {
            let commands = flow::handoff_due(&app.tui.verification);
            run_flow_commands(app, commands)
        }
        UiEvent::TaskStarted { kind, started } => {
            app.tui.tasks.state_mut(kind).on_started(&started);
            vec![]
        }
        UiEvent::TaskCompleted { kind, completed } => {
            let ok = app.tui.tasks.state_mut(kind).finish_if_active(completed.id);
            if !ok {
                tracing::debug!(?kind, id = completed.id.0, "dropping stale task result");
                vec![]
            } else {
                update(app, *completed.result)
            }
        }
    }
}

fn handle_sms_event(tui: &mut TuiState, event: SmsUiEvent) -> Vec<UiEffect> {
    let commands = match event {
        SmsUiEvent::CodeSent { phone, result } => {
            if let Err(err) = &result {
                tracing::warn!(error = %err, "send code failed");
            }
            flow::handle_code_sent(&mut tui.verification, &tui.translator, &phone, result)
        }
        SmsUiEvent::CodeChecked { phone, result } => {
            if let Err(err) = &result {
                tracing::warn!(error = %err, "code check failed");
            }
            flow::handle_code_checked(&mut tui.verification, &tui.translator, phone, result)
        }
    };
    flow_effects(tui, commands)
}

/// Turns flow commands into effects, minting task ids as needed.
///
/// `OpenCountryPicker` needs the overlay slot, so callers holding the whole
/// `AppState` go through [`run_flow_commands`].
fn flow_effects(tui: &mut TuiState, commands: Vec<FlowCommand>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for command in commands {
        match command {
            FlowCommand::SendCode { phone } => effects.push(UiEffect::SendCode {
                task: Some(tui.task_seq.next_id()),
                phone,
            }),
            FlowCommand::VerifyCode { phone, code } => effects.push(UiEffect::VerifyCode {
                task: Some(tui.task_seq.next_id()),
                phone,
                code,
            }),
            FlowCommand::StartCooldown { seconds } => {
                if tui.tasks.cooldown.is_running() {
                    effects.push(cancel_task(tui, TaskKind::Cooldown));
                }
                effects.push(UiEffect::StartCooldown {
                    task: Some(tui.task_seq.next_id()),
                    seconds,
                });
            }
            FlowCommand::ScheduleHandoff { delay } => {
                if tui.tasks.handoff.is_running() {
                    effects.push(cancel_task(tui, TaskKind::Handoff));
                }
                effects.push(UiEffect::ScheduleHandoff {
                    task: Some(tui.task_seq.next_id()),
                    delay,
                });
            }
            FlowCommand::Finish(outcome) => {
                let outcome = match outcome {
                    FlowOutcome::Verified { phone } => HandOff::Verified { phone },
                    FlowOutcome::Skipped => HandOff::Skipped,
                };
                effects.extend(leave(tui, outcome));
            }
            FlowCommand::OpenCountryPicker => {
                tracing::debug!("country picker requested without overlay access");
            }
        }
    }
    effects
}

fn run_flow_commands(app: &mut AppState, commands: Vec<FlowCommand>) -> Vec<UiEffect> {
    let (open_picker, rest): (Vec<_>, Vec<_>) = commands
        .into_iter()
        .partition(|c| matches!(c, FlowCommand::OpenCountryPicker));

    let mut effects = flow_effects(&mut app.tui, rest);
    if !open_picker.is_empty() && app.overlay.is_none() && !app.tui.should_quit {
        effects.extend(open_overlay_request(app, OverlayRequest::CountryPicker));
    }
    effects
}

fn cancel_task(tui: &mut TuiState, kind: TaskKind) -> UiEffect {
    UiEffect::CancelTask {
        kind,
        token: tui.tasks.state_mut(kind).take_cancel(),
    }
}

/// Records the outcome, cancels timers and quits.
fn leave(tui: &mut TuiState, outcome: HandOff) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for kind in [TaskKind::Cooldown, TaskKind::Handoff] {
        if tui.tasks.state(kind).is_running() {
            effects.push(cancel_task(tui, kind));
        }
    }
    tui.finish(outcome);
    effects.push(UiEffect::Quit);
    effects
}

fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) {
    for mutation in mutations {
        match mutation {
            StateMutation::Verification(VerificationMutation::SelectCountry(country)) => {
                tui.verification.select_country(country);
                tui.verification.focus = Focus::Phone;
            }
            StateMutation::Config(mutation) => apply_config_mutation(tui, mutation),
        }
    }
}

fn apply_config_mutation(tui: &mut TuiState, mutation: ConfigMutation) {
    match mutation {
        ConfigMutation::SetLanguage(language) => {
            tracing::info!(language = language.code(), "language changed");
            tui.translator = Translator::new(language);
            tui.config.language = Some(language.code().to_string());
        }
    }
}

fn apply_overlay_update(app: &mut AppState, mut update: OverlayUpdate) -> Vec<UiEffect> {
    apply_mutations(&mut app.tui, std::mem::take(&mut update.mutations));
    let mut effects = update.effects;
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.overlay = None,
        OverlayTransition::Open(request) => effects.extend(open_overlay_request(app, request)),
    }
    effects
}

fn open_overlay_request(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    let (overlay, effects) = request.build(&app.tui);
    app.overlay = Some(overlay);
    effects
}

fn handle_frame(tui: &mut TuiState) {
    // The content may have shrunk since the last scroll.
    tui.shell.scroll = tui.shell.scroll.min(tui.shell.max_scroll.get());
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => {
            if app.overlay.is_some() {
                return vec![];
            }
            let commands = flow::handle_paste(&mut app.tui.verification, &text);
            run_flow_commands(app, commands)
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        return apply_overlay_update(app, update);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => return leave(&mut app.tui, HandOff::Cancelled),
        KeyCode::Char('c') if ctrl => return leave(&mut app.tui, HandOff::Cancelled),
        KeyCode::Char('l') if ctrl => {
            return open_overlay_request(app, OverlayRequest::LanguagePicker);
        }
        KeyCode::PageUp => {
            app.tui.shell.scroll_by(-PAGE_SCROLL);
            return vec![];
        }
        KeyCode::PageDown => {
            app.tui.shell.scroll_by(PAGE_SCROLL);
            return vec![];
        }
        _ => {}
    }

    if app.tui.shell.show_tabs
        && let Some(tab) = shell::handle_key(key)
    {
        return navigate(&mut app.tui, tab);
    }

    let commands = flow::handle_key(&mut app.tui.verification, &app.tui.translator, key);
    run_flow_commands(app, commands)
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    if app.overlay.is_some() {
        return vec![];
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.tui.shell.scroll_by(-WHEEL_SCROLL);
            vec![]
        }
        MouseEventKind::ScrollDown => {
            app.tui.shell.scroll_by(WHEEL_SCROLL);
            vec![]
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(bar) = app.tui.shell.tab_bar_area.get() else {
                return vec![];
            };
            match shell::hit_test(bar, mouse.column, mouse.row) {
                Some(tab) => navigate(&mut app.tui, tab),
                None => vec![],
            }
        }
        _ => vec![],
    }
}

fn navigate(tui: &mut TuiState, tab: Tab) -> Vec<UiEffect> {
    tui.shell.active = Some(tab);
    leave(tui, HandOff::Navigate { tab })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio_util::sync::CancellationToken;
    use vaultx_core::i18n::Language;
    use vaultx_core::sms::{SendReceipt, VerificationError};

    use super::*;
    use crate::common::{TaskCompleted, TaskId, TaskStarted};
    use crate::overlays::Overlay;
    use crate::verification::Phase;

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(ch: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(ch),
            KeyModifiers::CONTROL,
        )))
    }

    fn type_text(app: &mut AppState, text: &str) -> Vec<UiEffect> {
        let mut effects = Vec::new();
        for ch in text.chars() {
            effects.extend(update(app, key(KeyCode::Char(ch))));
        }
        effects
    }

    fn started(app: &mut AppState, kind: TaskKind, id: TaskId, cancel: Option<CancellationToken>) {
        update(
            app,
            UiEvent::TaskStarted {
                kind,
                started: TaskStarted { id, cancel },
            },
        );
    }

    fn completed(app: &mut AppState, kind: TaskKind, id: TaskId, event: UiEvent) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::TaskCompleted {
                kind,
                completed: TaskCompleted {
                    id,
                    result: Box::new(event),
                },
            },
        )
    }

    /// Types a valid number, sends, and completes the send successfully.
    fn reach_code_sent(app: &mut AppState) -> Vec<UiEffect> {
        type_text(app, "5551234567");
        let effects = update(app, key(KeyCode::Enter));
        let Some(UiEffect::SendCode {
            task: Some(task),
            phone,
        }) = effects.into_iter().next()
        else {
            panic!("expected SendCode");
        };
        started(app, TaskKind::SendCode, task, None);
        completed(
            app,
            TaskKind::SendCode,
            task,
            UiEvent::Sms(SmsUiEvent::CodeSent {
                phone,
                result: Ok(SendReceipt::default()),
            }),
        )
    }

    #[test]
    fn test_enter_on_phone_sends_full_number() {
        let mut app = AppState::for_tests();
        type_text(&mut app, "5551234567");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::SendCode { task: Some(_), phone }] if phone == "+15551234567"
        ));
        assert!(app.tui.verification.sending);
    }

    #[test]
    fn test_short_phone_never_reaches_network() {
        let mut app = AppState::for_tests();
        type_text(&mut app, "12345");
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(
            app.tui.verification.error_message.as_deref(),
            Some("Please enter a valid phone number")
        );
    }

    #[test]
    fn test_code_sent_starts_cooldown() {
        let mut app = AppState::for_tests();
        let effects = reach_code_sent(&mut app);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::StartCooldown {
                task: Some(_),
                seconds: 60
            }]
        ));
        assert_eq!(app.tui.verification.phase, Phase::CodeSent);
        assert_eq!(app.tui.verification.focus, Focus::Code);
        assert_eq!(app.tui.verification.resend_count, 1);
    }

    #[test]
    fn test_cooldown_ticks_only_for_active_task() {
        let mut app = AppState::for_tests();
        reach_code_sent(&mut app);
        let active = TaskId(100);
        started(&mut app, TaskKind::Cooldown, active, None);

        update(&mut app, UiEvent::CooldownTick { task: TaskId(99) });
        assert_eq!(app.tui.verification.cooldown_remaining, 60);

        update(&mut app, UiEvent::CooldownTick { task: active });
        assert_eq!(app.tui.verification.cooldown_remaining, 59);

        completed(&mut app, TaskKind::Cooldown, active, UiEvent::CooldownFinished);
        assert_eq!(app.tui.verification.cooldown_remaining, 0);
        assert!(!app.tui.tasks.cooldown.is_running());
    }

    #[test]
    fn test_resend_unlocks_after_sixty_ticks() {
        let mut app = AppState::for_tests();
        let effects = reach_code_sent(&mut app);
        let Some(UiEffect::StartCooldown {
            task: Some(cooldown),
            ..
        }) = effects.into_iter().next()
        else {
            panic!("expected StartCooldown");
        };
        started(&mut app, TaskKind::Cooldown, cooldown, None);

        update(&mut app, key(KeyCode::Tab));
        assert_eq!(app.tui.verification.focus, Focus::Resend);
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());

        for _ in 0..59 {
            update(&mut app, UiEvent::CooldownTick { task: cooldown });
        }
        assert_eq!(app.tui.verification.cooldown_remaining, 1);
        assert!(update(&mut app, key(KeyCode::Enter)).is_empty());
        assert_eq!(app.tui.verification.resend_count, 1);

        completed(&mut app, TaskKind::Cooldown, cooldown, UiEvent::CooldownFinished);
        assert_eq!(app.tui.verification.cooldown_remaining, 0);

        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(effects.iter().any(
            |e| matches!(e, UiEffect::SendCode { task: Some(_), phone } if phone == "+15551234567")
        ));
        assert!(app.tui.verification.sending);
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut app = AppState::for_tests();
        reach_code_sent(&mut app);
        started(&mut app, TaskKind::Cooldown, TaskId(5), None);
        completed(&mut app, TaskKind::Cooldown, TaskId(4), UiEvent::CooldownFinished);
        assert_eq!(app.tui.verification.cooldown_remaining, 60);
    }

    #[test]
    fn test_typing_full_code_verifies() {
        let mut app = AppState::for_tests();
        reach_code_sent(&mut app);
        let effects = type_text(&mut app, "123456");
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::VerifyCode { task: Some(_), phone, code }]
                if phone == "+15551234567" && code == "123456"
        ));
        assert!(app.tui.verification.verifying);
    }

    #[test]
    fn test_rejected_code_clears_cells() {
        let mut app = AppState::for_tests();
        reach_code_sent(&mut app);
        type_text(&mut app, "123456");

        let effects = update(
            &mut app,
            UiEvent::Sms(SmsUiEvent::CodeChecked {
                phone: "+15551234567".to_string(),
                result: Err(VerificationError::Service {
                    status: 400,
                    detail: Some("Code expired".to_string()),
                }),
            }),
        );
        assert!(effects.is_empty());
        let v = &app.tui.verification;
        assert_eq!(v.error_message.as_deref(), Some("Code expired"));
        assert_eq!(v.code.value(), "");
        assert!(v.code.is_errored());
        assert_eq!(v.phase, Phase::CodeSent);
    }

    #[test]
    fn test_verified_hands_off_after_delay() {
        let mut app = AppState::for_tests();
        reach_code_sent(&mut app);
        let effects = update(
            &mut app,
            UiEvent::Sms(SmsUiEvent::CodeChecked {
                phone: "+15551234567".to_string(),
                result: Ok(()),
            }),
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::ScheduleHandoff { delay, .. }] if *delay == Duration::from_millis(1500)
        ));
        assert!(!app.tui.should_quit);

        let effects = update(&mut app, UiEvent::HandoffDue);
        assert!(matches!(effects.last(), Some(UiEffect::Quit)));
        assert_eq!(
            app.tui.outcome,
            Some(HandOff::Verified {
                phone: "+15551234567".to_string()
            })
        );
    }

    #[test]
    fn test_esc_cancels_running_cooldown() {
        let mut app = AppState::for_tests();
        reach_code_sent(&mut app);
        let token = CancellationToken::new();
        started(&mut app, TaskKind::Cooldown, TaskId(7), Some(token.clone()));

        let effects = update(&mut app, key(KeyCode::Esc));
        assert!(matches!(
            effects.as_slice(),
            [
                UiEffect::CancelTask {
                    kind: TaskKind::Cooldown,
                    token: Some(_)
                },
                UiEffect::Quit
            ]
        ));
        assert_eq!(app.tui.outcome, Some(HandOff::Cancelled));
    }

    #[test]
    fn test_enter_on_country_opens_picker_and_selection_applies() {
        let mut app = AppState::for_tests();
        app.tui.verification.focus = Focus::Country;
        update(&mut app, key(KeyCode::Enter));
        assert!(matches!(app.overlay, Some(Overlay::CountryPicker(_))));

        for ch in "france".chars() {
            update(&mut app, key(KeyCode::Char(ch)));
        }
        update(&mut app, key(KeyCode::Enter));
        assert!(app.overlay.is_none());
        assert_eq!(app.tui.verification.candidate.country_code, "+33");
        assert_eq!(app.tui.verification.focus, Focus::Phone);
    }

    #[test]
    fn test_ctrl_l_switches_language() {
        let mut app = AppState::for_tests();
        update(&mut app, ctrl('l'));
        assert!(matches!(app.overlay, Some(Overlay::LanguagePicker(_))));

        for ch in "espa".chars() {
            update(&mut app, key(KeyCode::Char(ch)));
        }
        let effects = update(&mut app, key(KeyCode::Enter));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::PersistLanguage {
                language: Language::Es
            }]
        ));
        assert_eq!(app.tui.translator.language(), Language::Es);
        assert_eq!(app.tui.config.language.as_deref(), Some("es"));
    }

    #[test]
    fn test_alt_digit_navigates_only_with_tabs() {
        let alt_two = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('2'),
            KeyModifiers::ALT,
        )));

        let mut app = AppState::for_tests();
        update(&mut app, alt_two);
        assert!(app.tui.outcome.is_none());

        let mut app = AppState::for_tests();
        app.tui.shell.show_tabs = true;
        let alt_two = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('2'),
            KeyModifiers::ALT,
        )));
        update(&mut app, alt_two);
        assert_eq!(
            app.tui.outcome,
            Some(HandOff::Navigate { tab: Tab::Markets })
        );
    }

    #[test]
    fn test_paste_fills_phone() {
        let mut app = AppState::for_tests();
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("(555) 123-4567".to_string())),
        );
        assert_eq!(app.tui.verification.candidate.local_digits, "5551234567");
    }

    #[test]
    fn test_ctrl_c_in_overlay_only_closes_overlay() {
        let mut app = AppState::for_tests();
        update(&mut app, ctrl('l'));
        update(&mut app, ctrl('c'));
        assert!(app.overlay.is_none());
        assert!(!app.tui.should_quit);
    }
}
