//! Voyage configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Credential values that mean "not configured yet"
///
/// These are the placeholder strings the setup guidance tells the user to
/// replace; finding one routes to the setup view just like a missing key.
const PLACEHOLDER_KEYS: &[&str] = &["PASTE_YOUR_API_KEY_HERE", "YOUR_API_KEY_HERE"];

/// Main Voyage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Storage locations (preferences, logs)
    pub storage: StorageConfig,

    /// Document export configuration
    pub export: ExportConfig,
}

impl Config {
    /// Where the API credential stands at startup
    pub fn credential_status(&self) -> CredentialStatus {
        self.llm.resolve().credential_status()
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .voyage.yml
        let local_config = PathBuf::from(".voyage.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/voyage/voyage.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("voyage").join("voyage.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Outcome of the startup credential check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// A real-looking key is present
    Present,
    /// The environment variable is unset or empty
    Missing,
    /// The variable holds one of the known placeholder strings
    Placeholder,
}

impl CredentialStatus {
    /// True when generation requests can be made
    pub fn is_usable(self) -> bool {
        matches!(self, Self::Present)
    }
}

/// LLM provider configuration
///
/// `api-key-env` and `base-url` default per provider when left empty; see
/// [`LlmConfig::resolve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("gemini" or "openai")
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: String::new(),
            base_url: String::new(),
            max_tokens: 8192,
        }
    }
}

impl LlmConfig {
    /// Fill provider-dependent blanks and produce a concrete configuration
    pub fn resolve(&self) -> ResolvedLlmConfig {
        let api_key_env = if self.api_key_env.is_empty() {
            match self.provider.as_str() {
                "openai" => "OPENAI_API_KEY".to_string(),
                _ => "GEMINI_API_KEY".to_string(),
            }
        } else {
            self.api_key_env.clone()
        };

        let base_url = if self.base_url.is_empty() {
            match self.provider.as_str() {
                "openai" => "https://api.openai.com".to_string(),
                _ => "https://generativelanguage.googleapis.com".to_string(),
            }
        } else {
            self.base_url.clone()
        };

        ResolvedLlmConfig {
            provider: self.provider.clone(),
            model: self.model.clone(),
            api_key_env,
            base_url,
            max_tokens: self.max_tokens,
        }
    }
}

/// LLM configuration with provider defaults applied
#[derive(Debug, Clone)]
pub struct ResolvedLlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub max_tokens: u32,
}

impl ResolvedLlmConfig {
    /// Read the credential from the configured environment variable
    ///
    /// Read once at client construction; a placeholder value counts as
    /// missing so the setup guidance stays accurate.
    pub fn get_api_key(&self) -> Result<String> {
        match self.credential_status() {
            CredentialStatus::Present => Ok(std::env::var(&self.api_key_env)?),
            CredentialStatus::Missing => Err(eyre::eyre!(
                "API key not found. Set the {} environment variable.",
                self.api_key_env
            )),
            CredentialStatus::Placeholder => Err(eyre::eyre!(
                "{} still holds a placeholder value. Replace it with a real key.",
                self.api_key_env
            )),
        }
    }

    /// Classify the current credential value
    pub fn credential_status(&self) -> CredentialStatus {
        match std::env::var(&self.api_key_env) {
            Err(_) => CredentialStatus::Missing,
            Ok(value) => {
                let value = value.trim();
                if value.is_empty() {
                    CredentialStatus::Missing
                } else if PLACEHOLDER_KEYS.contains(&value) {
                    CredentialStatus::Placeholder
                } else {
                    CredentialStatus::Present
                }
            }
        }
    }
}

/// Storage locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted preferences and logs
    #[serde(rename = "data-dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("voyage"),
        }
    }
}

impl StorageConfig {
    /// Directory the preference store lives in
    pub fn prefs_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }

    /// Directory log files are written to
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

/// Document export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory export documents are written to
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Lines per page in the paginated document
    #[serde(rename = "page-lines")]
    pub page_lines: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            page_lines: 48,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "gemini");
        assert!(config.llm.model.contains("gemini"));
        assert_eq!(config.llm.max_tokens, 8192);
        assert_eq!(config.export.page_lines, 48);
    }

    #[test]
    fn test_resolve_fills_gemini_defaults() {
        let resolved = LlmConfig::default().resolve();

        assert_eq!(resolved.api_key_env, "GEMINI_API_KEY");
        assert_eq!(resolved.base_url, "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_resolve_fills_openai_defaults() {
        let config = LlmConfig {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..Default::default()
        };
        let resolved = config.resolve();

        assert_eq!(resolved.api_key_env, "OPENAI_API_KEY");
        assert_eq!(resolved.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_resolve_keeps_explicit_values() {
        let config = LlmConfig {
            api_key_env: "MY_KEY".to_string(),
            base_url: "https://example.com".to_string(),
            ..Default::default()
        };
        let resolved = config.resolve();

        assert_eq!(resolved.api_key_env, "MY_KEY");
        assert_eq!(resolved.base_url, "https://example.com");
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: openai
  model: gpt-4o-mini
  api-key-env: MY_API_KEY
  base-url: https://api.example.com
  max-tokens: 2048

export:
  page-lines: 60
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.api_key_env, "MY_API_KEY");
        assert_eq!(config.llm.max_tokens, 2048);
        assert_eq!(config.export.page_lines, 60);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gemini-2.0-flash
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.provider, "gemini");
        assert_eq!(config.llm.max_tokens, 8192);
    }

    #[test]
    #[serial]
    fn test_credential_status_missing() {
        let config = LlmConfig {
            api_key_env: "VOYAGE_TEST_KEY_MISSING".to_string(),
            ..Default::default()
        };
        unsafe { std::env::remove_var("VOYAGE_TEST_KEY_MISSING") };

        assert_eq!(config.resolve().credential_status(), CredentialStatus::Missing);
        assert!(!config.resolve().credential_status().is_usable());
    }

    #[test]
    #[serial]
    fn test_credential_status_placeholder() {
        let config = LlmConfig {
            api_key_env: "VOYAGE_TEST_KEY_PLACEHOLDER".to_string(),
            ..Default::default()
        };
        unsafe { std::env::set_var("VOYAGE_TEST_KEY_PLACEHOLDER", "PASTE_YOUR_API_KEY_HERE") };

        let status = config.resolve().credential_status();
        unsafe { std::env::remove_var("VOYAGE_TEST_KEY_PLACEHOLDER") };

        assert_eq!(status, CredentialStatus::Placeholder);
        assert!(!status.is_usable());
    }

    #[test]
    #[serial]
    fn test_credential_status_present() {
        let config = LlmConfig {
            api_key_env: "VOYAGE_TEST_KEY_PRESENT".to_string(),
            ..Default::default()
        };
        unsafe { std::env::set_var("VOYAGE_TEST_KEY_PRESENT", "real-looking-key") };

        let resolved = config.resolve();
        let status = resolved.credential_status();
        let key = resolved.get_api_key();
        unsafe { std::env::remove_var("VOYAGE_TEST_KEY_PRESENT") };

        assert_eq!(status, CredentialStatus::Present);
        assert_eq!(key.unwrap(), "real-looking-key");
    }
}
