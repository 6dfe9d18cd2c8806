//! Local user profile.
//!
//! Stores the phone number, session token and phone verification outcome in
//! `${VAULTX_HOME}/profile.toml`.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// Outcome of the phone verification step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneStatus {
    #[default]
    Unverified,
    Verified,
    Skipped,
}

impl fmt::Display for PhoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneStatus::Unverified => write!(f, "unverified"),
            PhoneStatus::Verified => write!(f, "verified"),
            PhoneStatus::Skipped => write!(f, "skipped"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Bearer token for backend requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub phone_status: PhoneStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_verified_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::profile_path())
    }

    /// Loads a profile, returning an empty one when the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile from {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse profile from {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::profile_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize profile")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write profile to {}", path.display()))
    }

    /// Phone used to prefill the verification screen.
    pub fn prefill_phone(&self) -> Option<&str> {
        self.phone.as_deref().filter(|p| !p.trim().is_empty())
    }

    /// Token, if one is set and non-blank.
    pub fn bearer_token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Records a successful verification of `phone`.
    pub fn mark_verified(&mut self, phone: &str, at: DateTime<Utc>) {
        self.phone = Some(phone.to_string());
        self.phone_status = PhoneStatus::Verified;
        self.phone_verified_at = Some(at);
    }

    /// Records that the user skipped verification.
    ///
    /// A phone that was already verified stays verified.
    pub fn mark_skipped(&mut self) {
        if self.phone_status != PhoneStatus::Verified {
            self.phone_status = PhoneStatus::Skipped;
        }
    }

    /// Changing the phone invalidates a previous verification.
    pub fn set_phone(&mut self, phone: &str) {
        if self.phone.as_deref() != Some(phone) {
            self.phone_status = PhoneStatus::Unverified;
            self.phone_verified_at = None;
        }
        self.phone = Some(phone.to_string());
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_profile_is_empty() {
        let dir = tempdir().unwrap();
        let profile = UserProfile::load_from(&dir.path().join("profile.toml")).unwrap();
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.phone_status, PhoneStatus::Unverified);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("profile.toml");

        let mut profile = UserProfile {
            token: Some("tok".to_string()),
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        profile.mark_verified("+447911123456", at);
        profile.save_to(&path).unwrap();

        let loaded = UserProfile::load_from(&path).unwrap();
        assert_eq!(loaded, profile);
        assert_eq!(loaded.phone_status, PhoneStatus::Verified);
        assert_eq!(loaded.phone_verified_at, Some(at));
    }

    #[test]
    fn test_skip_does_not_downgrade_verified() {
        let mut profile = UserProfile::default();
        profile.mark_skipped();
        assert_eq!(profile.phone_status, PhoneStatus::Skipped);

        profile.mark_verified("+15551234567", Utc::now());
        profile.mark_skipped();
        assert_eq!(profile.phone_status, PhoneStatus::Verified);
    }

    #[test]
    fn test_set_phone_resets_verification() {
        let mut profile = UserProfile::default();
        profile.mark_verified("+15551234567", Utc::now());

        profile.set_phone("+15551234567");
        assert_eq!(profile.phone_status, PhoneStatus::Verified);

        profile.set_phone("+15559999999");
        assert_eq!(profile.phone_status, PhoneStatus::Unverified);
        assert_eq!(profile.phone_verified_at, None);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let profile = UserProfile {
            phone: Some("  ".to_string()),
            token: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(profile.prefill_phone(), None);
        assert_eq!(profile.bearer_token(), None);
    }
}
