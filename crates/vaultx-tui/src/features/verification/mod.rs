//! SMS phone verification screen.
//!
//! Two phases: collecting the phone number, then entering the code that was
//! sent to it. The flow ends by handing control back to the caller.

mod render;
mod state;
pub mod update;

pub use render::{content_height, render_verification};
pub use state::{Focus, Phase, VerificationSettings, VerificationState};
pub use update::{FlowCommand, FlowOutcome};
