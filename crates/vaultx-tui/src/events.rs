//! UI event types.
//!
//! All external inputs (terminal, HTTP results, timers) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Async work uses a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is actually spawned
//! - The runtime emits `UiEvent::TaskCompleted` with the result event when done
//! - The reducer is the only place that mutates `TaskState`
//!
//! A completed task whose id is no longer the active one is dropped, so a
//! late HTTP response or a cancelled timer can never touch fresh state.

use crossterm::event::Event as CrosstermEvent;
use vaultx_core::sms::{SendReceipt, VerificationError};

use crate::common::{TaskCompleted, TaskId, TaskKind, TaskStarted};

/// Results of the two verification endpoints.
#[derive(Debug)]
pub enum SmsUiEvent {
    /// `POST /api/auth/sms/send` finished.
    CodeSent {
        phone: String,
        result: Result<SendReceipt, VerificationError>,
    },

    /// `POST /api/auth/sms/verify` finished.
    CodeChecked {
        phone: String,
        result: Result<(), VerificationError>,
    },
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Idle timer tick.
    Tick,

    /// Emitted once per frame before other events are processed.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, mouse, paste, resize).
    Terminal(CrosstermEvent),

    /// HTTP results.
    Sms(SmsUiEvent),

    /// One second of resend cooldown elapsed.
    CooldownTick { task: TaskId },

    /// Cooldown task ran to completion.
    CooldownFinished,

    /// Success delay elapsed; hand off to the caller.
    HandoffDue,

    /// Task lifecycle: runtime started a task (cancel token optional).
    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },

    /// Task lifecycle: runtime completed a task (wraps the result event).
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },
}
