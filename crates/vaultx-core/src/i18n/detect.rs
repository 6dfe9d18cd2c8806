//! Language detection.
//!
//! Sources are consulted in a configured order; the first value that
//! normalizes to a supported language wins.

use std::fmt;

use super::Language;

/// Environment variables consulted for the platform locale, in order.
pub const PLATFORM_LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

/// Where a language value can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// Persisted `language` in config.
    Preference,
    /// Process locale environment.
    Platform,
    /// Explicit hint passed by the caller (`--lang`).
    DocumentHint,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSource::Preference => write!(f, "preference"),
            DetectionSource::Platform => write!(f, "platform"),
            DetectionSource::DocumentHint => write!(f, "hint"),
        }
    }
}

/// Raw values available to detection.
#[derive(Debug, Clone, Default)]
pub struct DetectionInputs {
    pub preference: Option<String>,
    /// Platform locale values in priority order.
    pub platform: Vec<String>,
    pub hint: Option<String>,
}

impl DetectionInputs {
    /// Reads the platform locale from the process environment.
    pub fn with_platform_env(mut self) -> Self {
        self.platform = PLATFORM_LOCALE_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .filter(|v| !v.trim().is_empty())
            .collect();
        self
    }

    fn values(&self, source: DetectionSource) -> Vec<&str> {
        match source {
            DetectionSource::Preference => self.preference.as_deref().into_iter().collect(),
            DetectionSource::Platform => self.platform.iter().map(String::as_str).collect(),
            DetectionSource::DocumentHint => self.hint.as_deref().into_iter().collect(),
        }
    }
}

/// Outcome of detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub language: Language,
    /// `None` when nothing matched and the fallback was used.
    pub source: Option<DetectionSource>,
    /// The result should be written back to the preference store.
    pub persist: bool,
}

/// Detection order and cache configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detector {
    pub order: Vec<DetectionSource>,
    pub caches: Vec<DetectionSource>,
}

impl Default for Detector {
    fn default() -> Self {
        Self {
            order: vec![
                DetectionSource::Preference,
                DetectionSource::Platform,
                DetectionSource::DocumentHint,
            ],
            caches: vec![DetectionSource::Preference],
        }
    }
}

impl Detector {
    pub fn detect(&self, inputs: &DetectionInputs) -> Detection {
        let found = self.order.iter().find_map(|&source| {
            inputs
                .values(source)
                .into_iter()
                .find_map(Language::normalize)
                .map(|lang| (lang, source))
        });

        let (language, source) = match found {
            Some((lang, source)) => (lang, Some(source)),
            None => (Language::FALLBACK, None),
        };

        // Write back unless the stored preference already says the same.
        let stored = inputs.preference.as_deref().and_then(Language::normalize);
        let persist =
            self.caches.contains(&DetectionSource::Preference) && stored != Some(language);

        tracing::debug!(
            language = %language,
            source = source.map_or_else(|| "fallback".to_string(), |s| s.to_string()),
            persist,
            "language detected"
        );

        Detection {
            language,
            source,
            persist,
        }
    }
}
