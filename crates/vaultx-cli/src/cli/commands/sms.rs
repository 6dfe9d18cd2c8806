//! Non-interactive SMS verification.

use anyhow::{Context, Result};
use chrono::Utc;
use vaultx_core::config::Config;
use vaultx_core::i18n::{Namespace, Translator};
use vaultx_core::phone::{PhoneCandidate, parse_prefill};
use vaultx_core::profile::UserProfile;
use vaultx_core::sms::{SmsConfig, VerificationClient, VerificationError, validate_phone};

pub async fn send(config: &Config, phone: &str) -> Result<()> {
    let t = super::translator(config);
    let candidate = candidate(config, &t, phone)?;
    let number = candidate.full_number();

    let client = client(config)?;
    let receipt = client.send_code(&number).await.map_err(|err| {
        failure(
            err,
            &t.t(Namespace::Auth, "sms.send_failed"),
            &t.t(Namespace::Auth, "sms.send_failed_generic"),
        )
    })?;

    let length = config.verification.code_length.to_string();
    let message = receipt.message.unwrap_or_else(|| {
        t.t_with(
            Namespace::Auth,
            "sms.code_sent",
            &[("length", &length), ("phone", &number)],
        )
    });
    println!("{message}");
    Ok(())
}

pub async fn check(config: &Config, phone: &str, code: &str) -> Result<()> {
    let t = super::translator(config);
    let candidate = candidate(config, &t, phone)?;
    let number = candidate.full_number();

    let code = code.trim();
    let length = config.verification.code_length;
    if code.len() != length || !code.bytes().all(|b| b.is_ascii_digit()) {
        anyhow::bail!("The code must be exactly {length} digits");
    }

    let client = client(config)?;
    client.check_code(&number, code).await.map_err(|err| {
        failure(
            err,
            &t.t(Namespace::Auth, "sms.invalid_code"),
            &t.t(Namespace::Auth, "sms.invalid_code_generic"),
        )
    })?;

    let mut profile = UserProfile::load().context("load profile")?;
    profile.mark_verified(&number, Utc::now());
    profile.save().context("save profile")?;

    println!("{}", t.t(Namespace::Auth, "sms.verified"));
    Ok(())
}

fn candidate(config: &Config, t: &Translator, phone: &str) -> Result<PhoneCandidate> {
    let candidate = parse_prefill(phone, &config.verification.default_country_code);
    validate_phone(
        &candidate,
        config.verification.min_phone_digits,
        &t.t(Namespace::Auth, "sms.invalid_phone"),
    )?;
    Ok(candidate)
}

fn client(config: &Config) -> Result<VerificationClient> {
    let profile = UserProfile::load().context("load profile")?;
    let sms = SmsConfig::from_config(config, profile.bearer_token().map(str::to_string))
        .context("resolve backend")?;
    VerificationClient::new(sms)
}

/// Converts a request failure into the message shown to the user.
///
/// Transport failures keep the underlying error as the cause.
fn failure(err: VerificationError, fallback: &str, generic: &str) -> anyhow::Error {
    let message = err.user_message(fallback, generic);
    tracing::warn!(error = %err, "verification request failed");
    match err {
        VerificationError::Transport(_) => anyhow::Error::new(err).context(message),
        VerificationError::Validation(_) | VerificationError::Service { .. } => {
            anyhow::anyhow!(message)
        }
    }
}
