//! Core library for VaultX.
//!
//! Configuration, the local profile, phone number parsing, the SMS
//! verification client and localized text. UI crates build on top of this.

pub mod config;
pub mod i18n;
pub mod logging;
pub mod phone;
pub mod profile;
pub mod sms;
