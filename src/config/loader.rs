//! Configuration file loading and saving

use crate::constants::{config as config_defaults, llm};
use crate::utils::validators;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Project-section settings: which files an analysis run picks up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    #[serde(default)]
    pub name: Option<String>,
    /// Glob patterns admitted into the file set; empty admits everything
    #[serde(default)]
    pub include: Vec<String>,
    /// Glob patterns removed from the file set
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Hosted-model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Saved-project storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_projects_dir")]
    pub projects_dir: String,
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    llm::DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    llm::DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    llm::TIMEOUT_SECS
}

fn default_projects_dir() -> String {
    config_defaults::DEFAULT_PROJECTS_DIR.to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            projects_dir: default_projects_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;

        validators::validate_config(&config).map_err(validators::validation_errors_to_anyhow)?;

        Ok(config)
    }

    /// Load configuration, defaulting when the file does not exist
    ///
    /// A present-but-invalid file is still an error; only absence falls back
    /// to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, format!("---\n{}", yaml))?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validators::validate_config(self).map_err(validators::validation_errors_to_anyhow)
    }

    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }
}
