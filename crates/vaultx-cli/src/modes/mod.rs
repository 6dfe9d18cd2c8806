//! Runtime execution modes.
//!
//! - `tui`: full-screen verification screen (optional feature)

#[cfg(feature = "tui")]
pub use vaultx_tui::{HandOff, run_verification};

#[cfg(not(feature = "tui"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandOff {
    Verified { phone: String },
    Skipped,
    Navigate { tab: String },
    Cancelled,
}

#[cfg(not(feature = "tui"))]
impl std::fmt::Display for HandOff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandOff::Verified { phone } => write!(f, "verified {phone}"),
            HandOff::Skipped => f.write_str("skipped"),
            HandOff::Navigate { tab } => write!(f, "navigate {tab}"),
            HandOff::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[cfg(not(feature = "tui"))]
pub async fn run_verification(
    _config: &vaultx_core::config::Config,
    _translator: vaultx_core::i18n::Translator,
    _client: vaultx_core::sms::VerificationClient,
    _prefill_phone: Option<&str>,
) -> anyhow::Result<HandOff> {
    anyhow::bail!(
        "TUI support is disabled in this build (feature \"tui\").\n\
         Use `vaultx sms send` and `vaultx sms check` instead."
    );
}
