use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::ai::{GenerationConfig, QuickAction, ReplyLength, Tone};
use crate::constants::{API_KEY_ENV, DEFAULT_DRAFTS, DEFAULT_ENDPOINT, DEFAULT_MODEL};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generation service settings
    #[serde(default)]
    pub ai: AiConfig,
    /// Initial reply settings for a new session
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key; the GEMINI_API_KEY environment variable takes precedence
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Extra attempts after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            endpoint: default_endpoint(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AiConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        let non_empty = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };
        std::env::var(API_KEY_ENV)
            .ok()
            .and_then(non_empty)
            .or_else(|| self.api_key.clone().and_then(non_empty))
    }
}

/// Reply settings the session starts with. Tone and length are kept as
/// strings so a typo degrades to the default instead of rejecting the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_length")]
    pub length: String,
    #[serde(default = "default_drafts")]
    pub drafts: usize,
    #[serde(default)]
    pub signature: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            length: default_length(),
            drafts: default_drafts(),
            signature: String::new(),
        }
    }
}

impl DefaultsConfig {
    pub fn generation_config(&self, action: Option<QuickAction>) -> GenerationConfig {
        GenerationConfig::new(
            Tone::resolve(&self.tone),
            ReplyLength::resolve(&self.length),
            action,
            self.signature.clone(),
            self.drafts,
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for exported drafts (default: current directory)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_retries() -> u32 {
    2
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_tone() -> String {
    Tone::default().name().to_string()
}

fn default_length() -> String {
    ReplyLength::default().name().to_string()
}

fn default_drafts() -> usize {
    DEFAULT_DRAFTS
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("replyr");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file, or the built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        let dir = Self::config_dir()?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }
}
