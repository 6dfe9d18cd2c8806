use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the UI ships text for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    It,
    Pt,
    Ru,
    Zh,
    Ja,
    Ko,
    Ar,
    Hi,
    Tr,
    Pl,
    Nl,
}

impl Language {
    pub const ALL: [Language; 15] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Ru,
        Language::Zh,
        Language::Ja,
        Language::Ko,
        Language::Ar,
        Language::Hi,
        Language::Tr,
        Language::Pl,
        Language::Nl,
    ];

    /// Language used when nothing else resolves.
    pub const FALLBACK: Language = Language::En;

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::Ar => "ar",
            Language::Hi => "hi",
            Language::Tr => "tr",
            Language::Pl => "pl",
            Language::Nl => "nl",
        }
    }

    /// Display name, native form first.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español (Spanish)",
            Language::Fr => "Français (French)",
            Language::De => "Deutsch (German)",
            Language::It => "Italiano (Italian)",
            Language::Pt => "Português (Portuguese)",
            Language::Ru => "Русский (Russian)",
            Language::Zh => "中文 (Chinese)",
            Language::Ja => "日本語 (Japanese)",
            Language::Ko => "한국어 (Korean)",
            Language::Ar => "العربية (Arabic)",
            Language::Hi => "हिन्दी (Hindi)",
            Language::Tr => "Türkçe (Turkish)",
            Language::Pl => "Polski (Polish)",
            Language::Nl => "Nederlands (Dutch)",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::En => "🇺🇸",
            Language::Es => "🇪🇸",
            Language::Fr => "🇫🇷",
            Language::De => "🇩🇪",
            Language::It => "🇮🇹",
            Language::Pt => "🇵🇹",
            Language::Ru => "🇷🇺",
            Language::Zh => "🇨🇳",
            Language::Ja => "🇯🇵",
            Language::Ko => "🇰🇷",
            Language::Ar => "🇸🇦",
            Language::Hi => "🇮🇳",
            Language::Tr => "🇹🇷",
            Language::Pl => "🇵🇱",
            Language::Nl => "🇳🇱",
        }
    }

    /// Normalizes a locale tag to a supported language.
    ///
    /// Accepts POSIX (`pt_BR.UTF-8`, `de_DE@euro`) and BCP 47 (`zh-Hant-TW`)
    /// forms. Returns `None` for `C`, `POSIX`, empty and unsupported values.
    pub fn normalize(raw: &str) -> Option<Language> {
        let base = raw
            .trim()
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        let primary = base.split(['_', '-']).next().unwrap_or_default();
        if primary.is_empty() {
            return None;
        }
        let primary = primary.to_ascii_lowercase();
        Language::ALL.into_iter().find(|lang| lang.code() == primary)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::normalize(s).ok_or_else(|| {
            let supported: Vec<&str> = Language::ALL.iter().map(|l| l.code()).collect();
            format!(
                "Unsupported language '{s}'. Supported: {}",
                supported.join(", ")
            )
        })
    }
}
