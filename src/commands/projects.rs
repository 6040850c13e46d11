//! Saved-project commands

use super::base::{Command, CommandContext};
use crate::console::Logger;
use crate::project::ProjectStore;
use crate::utils::{language, validators};
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct ListProjectsCommand;

#[async_trait::async_trait]
impl Command for ListProjectsCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let store = ProjectStore::new(&context.config.storage.projects_dir);
        let projects = store.list()?;

        if context.json {
            println!("{}", serde_json::to_string_pretty(&projects)?);
            return Ok(());
        }

        if projects.is_empty() {
            println!("No saved projects.");
            return Ok(());
        }

        for project in projects {
            println!(
                "{}  {}  [{}]  updated {}",
                project.id,
                project.name,
                project.language,
                project.updated_at.format("%Y-%m-%d %H:%M")
            );
        }
        Ok(())
    }
}

pub struct SaveProjectCommand {
    pub name: String,
    pub path: PathBuf,
}

#[async_trait::async_trait]
impl Command for SaveProjectCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_project_name(&self.name)?;
        validators::validate_input_path(&self.path)?;

        let code = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let lang = language::infer_language(&self.path.to_string_lossy());

        let store = ProjectStore::new(&context.config.storage.projects_dir);
        let saved = store.save(&self.name, &code, lang)?;

        Logger.success("projects", &format!("Saved '{}' as {}", saved.name, saved.id));
        Ok(())
    }
}

pub struct DeleteProjectCommand {
    pub id: String,
}

#[async_trait::async_trait]
impl Command for DeleteProjectCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let store = ProjectStore::new(&context.config.storage.projects_dir);

        if store.delete(&self.id)? {
            Logger.success("projects", &format!("Deleted {}", self.id));
        } else {
            anyhow::bail!("Project not found: {}", self.id);
        }
        Ok(())
    }
}
