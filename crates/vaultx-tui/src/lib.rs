//! Full-screen phone verification screen for VaultX.
//!
//! Elm-style: `update` is the only place state changes, `render` only reads,
//! and `runtime` executes the effects the reducer returns.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
pub use features::{code_input, field, shell, verification};
pub use runtime::TuiRuntime;
pub use state::HandOff;
use vaultx_core::config::Config;
use vaultx_core::i18n::Translator;
use vaultx_core::sms::VerificationClient;

/// Shows the verification screen until it is left and reports how.
///
/// Must be called from within a multi-threaded tokio runtime; HTTP calls
/// and timers are spawned onto it while this thread drives the terminal.
///
/// # Errors
/// Returns an error when stderr is not a terminal or terminal I/O fails.
pub async fn run_verification(
    config: &Config,
    translator: Translator,
    client: VerificationClient,
    prefill_phone: Option<&str>,
) -> Result<HandOff> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Phone verification requires a terminal.\n\
             Use `vaultx sms send` and `vaultx sms check` for non-interactive use."
        );
    }

    tracing::info!(
        language = translator.language().code(),
        tabs = config.show_tabs,
        "starting verification screen"
    );
    let mut runtime = TuiRuntime::new(config.clone(), translator, client, prefill_phone)?;
    runtime.run()
}
