//! Base types and traits for the command pattern

use crate::config::Config;
use crate::console::Logger;
use crate::project::{self, ProjectFile};
use anyhow::Result;
use crew_llm::{LlmClient, TextGenerator};
use std::path::Path;
use std::sync::Arc;

/// Context passed to all commands containing shared configuration and options
#[derive(Clone)]
pub struct CommandContext {
    /// The loaded configuration
    pub config: Config,
    /// Whether to emit machine-readable JSON instead of text
    pub json: bool,
    /// Whether to skip the hosted model and run deterministic-only
    pub no_ai: bool,
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}

/// Build the shared text generator, or `None` for deterministic-only runs
///
/// A missing API key downgrades to deterministic mode with a warning rather
/// than failing the command; the platform's contract is that model trouble
/// never blocks the analysis that does not need it.
pub fn build_generator(context: &CommandContext) -> Option<Arc<dyn TextGenerator>> {
    if context.no_ai || !context.config.llm.enabled {
        return None;
    }

    match LlmClient::from_env(
        context.config.llm.model.clone(),
        context.config.llm.max_tokens,
    ) {
        Ok(client) => Some(Arc::new(client)),
        Err(error) => {
            Logger.warn("crew", &format!("Model disabled: {error}"));
            None
        }
    }
}

/// Load the file set for a path argument
///
/// Directories are walked with the configured include/exclude globs; a
/// single file becomes a one-file set.
pub fn load_files(path: &Path, context: &CommandContext) -> Result<Vec<ProjectFile>> {
    if path.is_dir() {
        project::load_file_set(
            path,
            &context.config.project.include,
            &context.config.project.exclude,
        )
    } else {
        project::loader::load_single_file(path)
    }
}
