//! Centralized validation logic
//!
//! All configuration and CLI-argument validation rules live here so the
//! commands stay thin and the rules stay testable in isolation.

use crate::config::Config;
use anyhow::{Result, anyhow};
use std::path::Path;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A glob pattern in the config or CLI arguments failed to parse
    InvalidGlobPattern(String, String),
    /// The configured project name is empty or whitespace
    EmptyProjectName,
    /// The model identifier is empty
    EmptyModelName,
    /// The model token budget is zero
    ZeroMaxTokens,
    /// The model timeout is zero
    ZeroTimeout,
    /// The projects storage directory is empty
    EmptyProjectsDir,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidGlobPattern(pattern, reason) => {
                write!(f, "Invalid glob pattern '{}': {}", pattern, reason)
            }
            ValidationError::EmptyProjectName => {
                write!(f, "Project name cannot be empty")
            }
            ValidationError::EmptyModelName => {
                write!(f, "Model name cannot be empty")
            }
            ValidationError::ZeroMaxTokens => {
                write!(f, "llm.max_tokens must be greater than zero")
            }
            ValidationError::ZeroTimeout => {
                write!(f, "llm.timeout_secs must be greater than zero")
            }
            ValidationError::EmptyProjectsDir => {
                write!(f, "storage.projects_dir cannot be empty")
            }
        }
    }
}

/// Validates a complete configuration object
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(name) = &config.project.name
        && name.trim().is_empty()
    {
        errors.push(ValidationError::EmptyProjectName);
    }

    for pattern in config.project.include.iter().chain(&config.project.exclude) {
        if let Err(error) = glob::Pattern::new(pattern) {
            errors.push(ValidationError::InvalidGlobPattern(
                pattern.clone(),
                error.to_string(),
            ));
        }
    }

    if config.llm.model.trim().is_empty() {
        errors.push(ValidationError::EmptyModelName);
    }
    if config.llm.max_tokens == 0 {
        errors.push(ValidationError::ZeroMaxTokens);
    }
    if config.llm.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.storage.projects_dir.trim().is_empty() {
        errors.push(ValidationError::EmptyProjectsDir);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Convert a list of validation errors into a single anyhow error
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    anyhow!("Configuration validation failed:\n  {}", messages.join("\n  "))
}

/// Validate that a CLI input path exists
pub fn validate_input_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Input path does not exist: {}", path.display());
    }
    Ok(())
}

/// Validate a saved-project name from the CLI
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Project name cannot be empty");
    }
    if name.len() > 100 {
        anyhow::bail!("Project name too long (max 100 characters)");
    }
    Ok(())
}
