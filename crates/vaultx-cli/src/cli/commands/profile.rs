//! Profile command handlers.

use std::fs;

use anyhow::{Context, Result};
use vaultx_core::config::{Config, paths};
use vaultx_core::i18n::Namespace;
use vaultx_core::phone::parse_prefill;
use vaultx_core::profile::UserProfile;
use vaultx_core::sms::validate_phone;

pub fn show() -> Result<()> {
    let profile = UserProfile::load().context("load profile")?;

    println!("Profile: {}", paths::profile_path().display());
    println!("Phone:    {}", profile.phone.as_deref().unwrap_or("(none)"));
    println!("Status:   {}", profile.phone_status);
    if let Some(at) = profile.phone_verified_at {
        println!("Verified: {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    let token = if profile.bearer_token().is_some() {
        "set"
    } else {
        "not set"
    };
    println!("Token:    {token}");
    Ok(())
}

pub fn set_phone(config: &Config, phone: &str) -> Result<()> {
    let candidate = parse_prefill(phone, &config.verification.default_country_code);
    let message = super::translator(config).t(Namespace::Auth, "sms.invalid_phone");
    validate_phone(&candidate, config.verification.min_phone_digits, &message)?;

    let number = candidate.full_number();
    let mut profile = UserProfile::load().context("load profile")?;
    profile.set_phone(&number);
    profile.save().context("save profile")?;

    println!("Phone set to {number} ({}).", profile.phone_status);
    Ok(())
}

pub fn set_token(token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token must not be empty");
    }

    let mut profile = UserProfile::load().context("load profile")?;
    profile.token = Some(token.to_string());
    profile.save().context("save profile")?;

    println!("Token saved.");
    Ok(())
}

pub fn reset() -> Result<()> {
    let path = paths::profile_path();
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("remove profile at {}", path.display()))?;
        println!("Removed {}", path.display());
    } else {
        println!("No profile at {}", path.display());
    }
    Ok(())
}
