//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Cancellation is initiated from the reducer via `UiEffect::CancelTask`.
//! The runtime executes it by calling `token.cancel()` on the provided token.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vaultx_core::i18n::Language;

use crate::common::{TaskId, TaskKind};

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Leave the event loop.
    Quit,

    /// Dispatch `POST /api/auth/sms/send`.
    SendCode { task: Option<TaskId>, phone: String },

    /// Dispatch `POST /api/auth/sms/verify`.
    VerifyCode {
        task: Option<TaskId>,
        phone: String,
        code: String,
    },

    /// Start the one-second resend countdown.
    StartCooldown { task: Option<TaskId>, seconds: u64 },

    /// Fire `UiEvent::HandoffDue` after `delay`.
    ScheduleHandoff {
        task: Option<TaskId>,
        delay: Duration,
    },

    /// Cancel a running task.
    CancelTask {
        kind: TaskKind,
        token: Option<CancellationToken>,
    },

    /// Write the language preference to the config file.
    PersistLanguage { language: Language },
}
