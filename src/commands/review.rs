//! Code review command

use super::base::{Command, CommandContext, build_generator};
use crate::agents::{Agent, AgentKind, AgentRequest, ReviewerAgent};
use crate::console::Logger;
use crate::utils::validators;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct ReviewCommand {
    /// Source file to review
    pub path: PathBuf,
}

#[async_trait::async_trait]
impl Command for ReviewCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_input_path(&self.path)?;

        let code = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let language = crate::utils::language::infer_language(&self.path.to_string_lossy());

        let agent = ReviewerAgent::new(build_generator(context));
        let mut request = AgentRequest::new(AgentKind::Reviewer, code);
        request.language = Some(language.to_string());

        let response = agent.process(&request).await?;

        if context.json {
            println!("{}", serde_json::to_string_pretty(&response.data)?);
            return Ok(());
        }

        let logger = Logger;
        let score = response.data["score"].as_f64().unwrap_or(0.0);
        logger.info("reviewer", &format!("Score: {score}/10"));
        if let Some(summary) = response.data["summary"].as_str()
            && !summary.is_empty()
        {
            println!("  {}", summary);
        }

        print_list("Improvements", &response.data["improvements"]);
        print_list("Best Practices", &response.data["bestPractices"]);
        print_list("Security", &response.data["security"]);

        Ok(())
    }
}

fn print_list(title: &str, values: &serde_json::Value) {
    let Some(items) = values.as_array() else {
        return;
    };
    if items.is_empty() {
        return;
    }

    println!("\n{}", title.bold());
    for item in items {
        if let Some(text) = item.as_str() {
            println!("  - {}", text);
        }
    }
}
