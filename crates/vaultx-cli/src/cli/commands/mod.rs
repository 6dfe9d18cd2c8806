//! CLI command handlers.

pub mod config;
pub mod locales;
pub mod profile;
pub mod sms;
pub mod verify;

use vaultx_core::config::Config;
use vaultx_core::i18n::{DetectionInputs, Detector, Translator};

/// Translator for non-interactive output.
///
/// Uses the stored preference, then the process locale. Nothing is persisted.
pub(crate) fn translator(config: &Config) -> Translator {
    let inputs = DetectionInputs {
        preference: config.language.clone(),
        ..DetectionInputs::default()
    }
    .with_platform_env();
    Translator::new(Detector::default().detect(&inputs).language)
}
