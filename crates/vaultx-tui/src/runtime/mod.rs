//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! The reducer stays pure and produces effects; this module executes them.
//! Async handlers post their results to an inbox channel that the loop
//! drains every iteration.
//!
//! - `mod.rs`: runtime, event loop, effect dispatch
//! - `inbox.rs`: inbox channel types
//! - `handlers/`: HTTP calls and timers

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use vaultx_core::config::Config;
use vaultx_core::i18n::Translator;
use vaultx_core::sms::VerificationClient;

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::{AppState, HandOff};
use crate::{render, terminal, update};

/// Poll interval while a task is running or the user is typing.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when nothing is happening.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. The terminal is restored on drop and panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<VerificationClient>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Enters the alternate screen and builds the initial state.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(
        config: Config,
        translator: Translator,
        client: VerificationClient,
        prefill_phone: Option<&str>,
    ) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(config, translator, prefill_phone);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            client: Arc::new(client),
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until the screen is left.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<HandOff> {
        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();
        self.cancel_all();
        result?;

        Ok(self
            .state
            .tui
            .outcome
            .clone()
            .unwrap_or(HandOff::Cancelled))
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Frame alone changes nothing visible.
                if !matches!(&event, UiEvent::Frame { .. }) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty && !self.state.tui.should_quit {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.tui.tasks.is_any_running() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async task with a uniform TaskStarted/TaskCompleted lifecycle.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, cancelable: bool, f: F)
    where
        F: FnOnce(Option<CancellationToken>) -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        let cancel = cancelable.then(CancellationToken::new);
        let started = TaskStarted {
            id,
            cancel: cancel.clone(),
        };
        let _ = tx.send(UiEvent::TaskStarted { kind, started });
        tokio::spawn(async move {
            let inner = f(cancel).await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::CancelTask { token, .. } => {
                if let Some(cancel) = token {
                    cancel.cancel();
                }
            }
            UiEffect::SendCode { task, phone } => {
                let Some(task) = task else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::SendCode, task, false, move |_| {
                    handlers::send_code(client, phone)
                });
            }
            UiEffect::VerifyCode { task, phone, code } => {
                let Some(task) = task else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_task(TaskKind::VerifyCode, task, false, move |_| {
                    handlers::check_code(client, phone, code)
                });
            }
            UiEffect::StartCooldown { task, seconds } => {
                let Some(task) = task else {
                    return;
                };
                let tx = self.inbox_tx.clone();
                self.spawn_task(TaskKind::Cooldown, task, true, move |cancel| {
                    handlers::cooldown(task, seconds, tx, cancel)
                });
            }
            UiEffect::ScheduleHandoff { task, delay } => {
                let Some(task) = task else {
                    return;
                };
                self.spawn_task(TaskKind::Handoff, task, true, move |cancel| {
                    handlers::handoff_delay(delay, cancel)
                });
            }
            UiEffect::PersistLanguage { language } => {
                if let Err(err) = Config::save_language(language.code()) {
                    // The language is already active for this session.
                    tracing::warn!(error = %err, "failed to persist language");
                }
            }
        }
    }

    /// Cancels every timer still running.
    fn cancel_all(&self) {
        for token in self.state.tui.tasks.cancel_tokens() {
            token.cancel();
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        self.cancel_all();
        let _ = terminal::restore_terminal();
    }
}
