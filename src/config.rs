//! Configuration loading and management for manus.
//!
//! Loads settings from `manus.toml` with environment variable overrides for sensitive data.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("missing required API key for provider: {0}")]
    MissingApiKey(String),
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// LLM provider: "gemini" or "openai"
    pub provider: String,
    /// Model identifier (e.g., "gemini-2.0-flash")
    pub model: String,
    /// System persona for the agent
    pub persona: String,
}

/// API keys configuration (loaded from environment)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    #[serde(default)]
    pub gemini_key: Option<String>,
    #[serde(default)]
    pub openai_key: Option<String>,
}

/// Default script-generation parameters, substituted into the prompt.
///
/// Each can be overridden per invocation from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Overall emotional register, e.g. "Educational" or "Humorous"
    pub mood: String,
    /// Presentation style, e.g. "Conversational" or "Tutorial"
    pub tone: String,
    /// Who the video is for
    pub audience: String,
    /// Expected video length, e.g. "Short (5-10 mins)"
    pub length: String,
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl Config {
    /// Load configuration from the default location (manus.toml in cwd or home).
    ///
    /// A missing file is not an error: defaults apply, and the API key can
    /// come entirely from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(config_path) => Self::load_from(&config_path),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                Ok(config)
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override API keys from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            self.api.gemini_key = Some(key);
        }
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            self.api.openai_key = Some(key);
        }
    }

    /// Find the config file in standard locations
    fn find_config_file() -> Option<PathBuf> {
        // Check current directory first
        let local_config = PathBuf::from("manus.toml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Check home directory
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config").join("manus").join("manus.toml");
            if home_config.exists() {
                return Some(home_config);
            }
        }

        None
    }

    /// Get the API key for the configured provider
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        match self.agent.provider.as_str() {
            "gemini" => self
                .api
                .gemini_key
                .as_deref()
                .ok_or_else(|| ConfigError::MissingApiKey("gemini".to_string())),
            "openai" => self
                .api
                .openai_key
                .as_deref()
                .ok_or_else(|| ConfigError::MissingApiKey("openai".to_string())),
            other => Err(ConfigError::MissingApiKey(other.to_string())),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            persona: "You are a helpful YouTube content assistant.".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mood: "Educational".to_string(),
            tone: "Conversational".to_string(),
            audience: "General Public".to_string(),
            length: "Short (5-10 mins)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.agent.provider, "gemini");
        assert_eq!(config.agent.model, "gemini-2.0-flash");
        assert!(!config.generation.mood.is_empty());
    }

    #[test]
    fn load_from_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[agent]
provider = "gemini"
model = "gemini-2.5-pro"
persona = "You write scripts for a science channel."

[generation]
mood = "Energetic"
tone = "Storytelling"
audience = "Beginners"
length = "Medium (10-20 mins)"
"#
        )
        .unwrap();

        let config = Config::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.agent.model, "gemini-2.5-pro");
        assert_eq!(config.generation.mood, "Energetic");
        assert_eq!(config.generation.audience, "Beginners");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generation]\nmood = \"Humorous\"").unwrap();

        let config = Config::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.generation.mood, "Humorous");
        // Untouched sections keep their defaults
        assert_eq!(config.agent.provider, "gemini");
        assert_eq!(config.generation.tone, "Conversational");
    }

    #[test]
    fn missing_key_names_the_provider() {
        let config = Config::default();
        // Only meaningful when the environment has no key set
        if std::env::var("GEMINI_API_KEY").is_err() {
            let err = config.api_key().unwrap_err();
            assert!(err.to_string().contains("gemini"));
        }
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let config = Config {
            agent: AgentConfig {
                provider: "llama-at-home".to_string(),
                ..AgentConfig::default()
            },
            ..Config::default()
        };
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }
}
