//! Documentation generation command

use super::base::{Command, CommandContext, load_files};
use crate::agents::{Agent, AgentKind, AgentRequest, DocumenterAgent};
use crate::console::Logger;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub struct DocCommand {
    /// File or directory to document
    pub path: PathBuf,
    /// Project name used in the generated document
    pub name: Option<String>,
    /// Write the documentation to this file
    pub output: Option<PathBuf>,
}

#[async_trait::async_trait]
impl Command for DocCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let files = load_files(&self.path, context)?;

        let project_name = self
            .name
            .clone()
            .or_else(|| context.config.project.name.clone())
            .unwrap_or_else(|| {
                self.path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| "Untitled Project".to_string())
            });

        let agent = DocumenterAgent::new();
        let mut request = AgentRequest::new(AgentKind::Documenter, "");
        request.project_files = Some(files);
        request.options.project_name = Some(project_name);

        let response = agent.process(&request).await?;

        if context.json {
            println!("{}", serde_json::to_string_pretty(&response.data)?);
            return Ok(());
        }

        let rendered = format!(
            "# {}\n\n{}\n\n## Structure\n{}\n\n## API\n{}\n",
            response.data["projectName"].as_str().unwrap_or(""),
            response.data["description"].as_str().unwrap_or(""),
            response.data["structure"].as_str().unwrap_or(""),
            response.data["apiDocs"].as_str().unwrap_or(""),
        );

        match &self.output {
            Some(output) => {
                std::fs::write(output, &rendered)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                Logger.success(
                    "documenter",
                    &format!("Documentation written to {}", output.display()),
                );
            }
            None => println!("{}", rendered),
        }

        Ok(())
    }
}
