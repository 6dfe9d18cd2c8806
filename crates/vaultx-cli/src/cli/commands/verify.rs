//! Interactive verification command.

use anyhow::{Context, Result};
use chrono::Utc;
use vaultx_core::config::Config;
use vaultx_core::i18n::{DetectionInputs, Detector, Translator};
use vaultx_core::profile::UserProfile;
use vaultx_core::sms::{SmsConfig, VerificationClient};

use crate::modes::{self, HandOff};

#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    pub phone: Option<String>,
    pub lang: Option<String>,
    pub tabs: bool,
}

pub async fn run(config: &Config, opts: &VerifyOptions) -> Result<()> {
    let mut config = config.clone();

    let inputs = DetectionInputs {
        preference: config.language.clone(),
        hint: opts.lang.clone(),
        ..DetectionInputs::default()
    }
    .with_platform_env();
    let detection = Detector::default().detect(&inputs);
    if detection.persist
        && let Err(err) = Config::save_language(detection.language.code())
    {
        tracing::warn!(error = %err, "failed to persist detected language");
    }
    config.language = Some(detection.language.code().to_string());
    if opts.tabs {
        config.show_tabs = true;
    }

    let mut profile = UserProfile::load().context("load profile")?;
    let prefill = opts
        .phone
        .as_deref()
        .or_else(|| profile.prefill_phone())
        .map(str::to_string);

    let sms = SmsConfig::from_config(&config, profile.bearer_token().map(str::to_string))
        .context("resolve backend")?;
    let client = VerificationClient::new(sms)?;
    let translator = Translator::new(detection.language);

    let outcome = modes::run_verification(&config, translator, client, prefill.as_deref())
        .await
        .context("verification screen failed")?;
    tracing::info!(outcome = %outcome, "verification screen closed");

    match outcome {
        HandOff::Verified { phone } => {
            profile.mark_verified(&phone, Utc::now());
            profile.save().context("save profile")?;
            println!("Phone {phone} verified.");
        }
        HandOff::Skipped => {
            profile.mark_skipped();
            profile.save().context("save profile")?;
            println!("Phone verification skipped.");
        }
        HandOff::Navigate { tab } => {
            println!("Opening {tab}.");
        }
        HandOff::Cancelled => {
            println!("Verification cancelled.");
        }
    }

    Ok(())
}
