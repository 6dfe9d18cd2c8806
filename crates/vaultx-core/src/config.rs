//! Configuration management for VaultX.
//!
//! Loads configuration from ${VAULTX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `backend_url`.
pub const BACKEND_URL_ENV: &str = "VAULTX_BACKEND_URL";

/// SMS verification tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Number of cells in the code input.
    pub code_length: usize,
    /// Minimum local digits accepted before a send is attempted.
    pub min_phone_digits: usize,
    /// Cooldown between sends, in seconds.
    pub resend_cooldown_secs: u32,
    /// Delay between the success message and the hand-off.
    pub success_delay_ms: u64,
    /// Calling code used when the profile carries none.
    pub default_country_code: String,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_length: 6,
            min_phone_digits: 7,
            resend_cooldown_secs: 60,
            success_delay_ms: 1500,
            default_country_code: "+1".to_string(),
        }
    }
}

impl VerificationConfig {
    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }
}

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `VAULTX_LOG` is unset.
    pub level: String,
    /// Log file name relative to the VaultX home.
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "vaultx.log".to_string(),
        }
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Merges user config values into the default template.
///
/// Keeps the template comments while preserving the user's values.
fn merge_with_template(user_config: &str) -> Result<String> {
    use toml_edit::DocumentMut;

    let mut doc: DocumentMut = default_config_template()
        .parse()
        .context("Failed to parse default config template")?;

    let user_doc: DocumentMut = user_config.parse().context("Failed to parse user config")?;

    merge_items(doc.as_table_mut(), user_doc.as_table());

    Ok(doc.to_string())
}

/// Recursively merges items from source table into target table.
fn merge_items(target: &mut toml_edit::Table, source: &toml_edit::Table) {
    use toml_edit::Item;

    for (key, value) in source.iter() {
        match value {
            Item::Value(v) => {
                target[key] = Item::Value(v.clone());
            }
            Item::Table(src_table) => {
                if let Some(Item::Table(target_table)) = target.get_mut(key) {
                    merge_items(target_table, src_table);
                } else {
                    target[key] = Item::Table(src_table.clone());
                }
            }
            Item::ArrayOfTables(src_arr) => {
                target[key] = Item::ArrayOfTables(src_arr.clone());
            }
            Item::None => {}
        }
    }
}

pub mod paths {
    //! Path resolution for VaultX configuration and data files.
    //!
    //! VAULTX_HOME resolution order:
    //! 1. VAULTX_HOME environment variable (if set)
    //! 2. ~/.config/vaultx (default)

    use std::path::PathBuf;

    /// Returns the VaultX home directory.
    pub fn vaultx_home() -> PathBuf {
        if let Ok(home) = std::env::var("VAULTX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".vaultx"),
            |h| h.join(".config").join("vaultx"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        vaultx_home().join("config.toml")
    }

    /// Returns the path to the profile.toml file.
    pub fn profile_path() -> PathBuf {
        vaultx_home().join("profile.toml")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend base URL for the SMS endpoints.
    pub backend_url: String,

    /// Request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,

    /// Persisted UI language preference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Whether screens are wrapped with the bottom tab bar.
    pub show_tabs: bool,

    /// SMS verification tuning.
    pub verification: VerificationConfig,

    /// Log output.
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: Self::DEFAULT_BACKEND_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
            language: None,
            show_tabs: false,
            verification: VerificationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Saves only the language field to the config file.
    pub fn save_language(language: &str) -> Result<()> {
        Self::save_language_to(&paths::config_path(), language)
    }

    /// Saves only the language field to a specific config file path.
    ///
    /// Creates the file with default template if it doesn't exist.
    /// If file exists, merges user values into the latest template.
    pub fn save_language_to(path: &Path, language: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            let user_config = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            merge_with_template(&user_config)?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["language"] = value(language);

        Self::write_config(path, &doc.to_string())
    }

    fn write_config(path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Returns the backend URL, preferring `VAULTX_BACKEND_URL`.
    pub fn effective_backend_url(&self) -> Result<Url> {
        let env = std::env::var(BACKEND_URL_ENV).ok();
        self.backend_url_with_override(env.as_deref())
    }

    /// Resolves the backend URL against an explicit override.
    ///
    /// Empty or whitespace-only values are treated as unset.
    pub fn backend_url_with_override(&self, override_url: Option<&str>) -> Result<Url> {
        let raw = override_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.backend_url.trim());

        let url = Url::parse(raw).with_context(|| format!("Invalid backend URL: {raw}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("Backend URL must use http or https: {raw}");
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }
}
