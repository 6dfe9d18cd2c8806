//! Resend cooldown and success hand-off timers.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::UiEvent;
use crate::runtime::inbox::UiEventSender;

const TICK: Duration = Duration::from_secs(1);

/// Counts down `seconds`, posting a `CooldownTick` each second.
///
/// Returns `CooldownFinished` when the count reaches zero or the token is
/// cancelled; a cancelled task's completion is dropped by the reducer.
pub async fn cooldown(
    task: TaskId,
    seconds: u64,
    tx: UiEventSender,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let cancel = cancel.unwrap_or_default();
    for remaining in (0..seconds).rev() {
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::debug!(remaining, "cooldown cancelled");
                break;
            }
            () = tokio::time::sleep(TICK) => {
                // The final tick is covered by CooldownFinished.
                if remaining > 0 && tx.send(UiEvent::CooldownTick { task }).is_err() {
                    break;
                }
            }
        }
    }
    UiEvent::CooldownFinished
}

/// Waits `delay`, then reports the hand-off as due.
pub async fn handoff_delay(delay: Duration, cancel: Option<CancellationToken>) -> UiEvent {
    let cancel = cancel.unwrap_or_default();
    tokio::select! {
        () = cancel.cancelled() => tracing::debug!("hand-off delay cancelled"),
        () = tokio::time::sleep(delay) => {}
    }
    UiEvent::HandoffDue
}
