//! Configuration loading and validation for Promptloom.
//!
//! Loads configuration from `~/.promptloom/config.toml` with environment
//! variable overrides, and exposes it to the assembler through the
//! [`ConfigProvider`] capability. An in-memory [`MapConfig`] provides
//! deterministic settings for tests and embedding callers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use promptloom_core::settings::{ConfigProvider, CHAT_SECTION, PRE_INSTRUCTION_KEY};

/// The root configuration structure.
///
/// Maps directly to `~/.promptloom/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat behavior settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Prompt assembly settings
    #[serde(default)]
    pub assembly: AssemblyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Extra instruction appended to the system preamble
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_instruction: Option<String>,

    /// Backend protocol version, selects the preamble shape
    #[serde(default = "default_api_version")]
    pub api_version: u32,
}

fn default_api_version() -> u32 {
    0
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            pre_instruction: None,
            api_version: default_api_version(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyConfig {
    /// Total prompt budget in rendered characters
    #[serde(default = "default_char_budget")]
    pub char_budget: usize,
}

fn default_char_budget() -> usize {
    28_000
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            char_budget: default_char_budget(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.promptloom/config.toml).
    ///
    /// Environment variable overrides (highest priority):
    /// - `PROMPTLOOM_PRE_INSTRUCTION`
    /// - `PROMPTLOOM_CHAR_BUDGET`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(pre_instruction) = std::env::var("PROMPTLOOM_PRE_INSTRUCTION") {
            config.chat.pre_instruction = Some(pre_instruction);
        }

        if let Ok(raw) = std::env::var("PROMPTLOOM_CHAR_BUDGET") {
            match raw.parse() {
                Ok(budget) => config.assembly.char_budget = budget,
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unparseable PROMPTLOOM_CHAR_BUDGET");
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".promptloom")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.assembly.char_budget == 0 {
            return Err(ConfigError::ValidationError(
                "assembly.char_budget must be greater than 0".into(),
            ));
        }

        if let Some(pre_instruction) = &self.chat.pre_instruction {
            if pre_instruction.chars().count() * 4 > self.assembly.char_budget {
                return Err(ConfigError::ValidationError(
                    "chat.pre_instruction is too long for the configured char_budget".into(),
                ));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string (for onboarding).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            chat: ChatConfig::default(),
            assembly: AssemblyConfig::default(),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        match (section, key) {
            (CHAT_SECTION, PRE_INSTRUCTION_KEY) => self.chat.pre_instruction.clone(),
            (CHAT_SECTION, "api_version") => Some(self.chat.api_version.to_string()),
            ("assembly", "char_budget") => Some(self.assembly.char_budget.to_string()),
            _ => None,
        }
    }
}

/// An in-memory `ConfigProvider` holding explicit values.
///
/// The deterministic settings source for tests; also usable by callers that
/// manage settings themselves and only need to satisfy the capability.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    values: HashMap<(String, String), String>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.values
            .insert((section.to_string(), key.to_string()), value.to_string());
    }

    /// Builder-style `set`.
    pub fn with(mut self, section: &str, key: &str, value: &str) -> Self {
        self.set(section, key, value);
        self
    }
}

impl ConfigProvider for MapConfig {
    fn get(&self, section: &str, key: &str) -> Option<String> {
        self.values
            .get(&(section.to_string(), key.to_string()))
            .cloned()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
