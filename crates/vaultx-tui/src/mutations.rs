//! Cross-slice state mutations.
//!
//! Overlays return these mutations to request changes outside their own
//! slice. The main reducer applies them in order.

use vaultx_core::i18n::Language;
use vaultx_core::phone::Country;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateMutation {
    Verification(VerificationMutation),
    Config(ConfigMutation),
}

/// Verification slice mutations requested by other slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationMutation {
    SelectCountry(Country),
}

/// Config/locale mutations requested by other slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigMutation {
    SetLanguage(Language),
}
