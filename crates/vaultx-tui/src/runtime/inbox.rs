//! Inbox channel types.
//!
//! Every async handler reports back by sending a `UiEvent` here; the runtime
//! drains the receiver once per loop iteration.

use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;
