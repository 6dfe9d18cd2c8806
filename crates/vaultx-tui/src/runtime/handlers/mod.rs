//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that perform I/O and return the `UiEvent`
//! describing the result. They never touch state; the runtime spawns them
//! and posts the result to the inbox.

pub mod sms;
pub mod timers;

pub use sms::{check_code, send_code};
pub use timers::{cooldown, handoff_delay};
