//! Debugging command

use super::base::{Command, CommandContext};
use crate::agents::{Agent, AgentKind, AgentRequest, DebuggerAgent};
use crate::console::Logger;
use crate::utils::validators;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct DebugCommand {
    /// Source file to debug
    pub path: PathBuf,
    /// File containing recorded runtime stderr to analyze
    pub error_file: Option<PathBuf>,
    /// Propose a patched version of the code when confidence is high
    pub auto_fix: bool,
}

#[async_trait::async_trait]
impl Command for DebugCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        validators::validate_input_path(&self.path)?;

        let code = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let runtime_error = match &self.error_file {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            ),
            None => None,
        };

        let language = crate::utils::language::infer_language(&self.path.to_string_lossy());

        let agent = DebuggerAgent::new();
        let mut request = AgentRequest::new(AgentKind::Debugger, code);
        request.language = Some(language.to_string());
        request.options.runtime_error = runtime_error;
        request.options.auto_fix = self.auto_fix;

        let response = agent.process(&request).await?;

        if context.json {
            println!("{}", serde_json::to_string_pretty(&response.data)?);
            return Ok(());
        }

        let logger = Logger;
        let report = &response.data["report"];
        let severity = report["severity"].as_str().unwrap_or("low");
        logger.info("debugger", &format!("Severity: {}", severity));

        let issues = report["issues"].as_array().cloned().unwrap_or_default();
        if issues.is_empty() {
            logger.success("debugger", "No issues found");
        }
        for issue in &issues {
            let kind = issue["type"].as_str().unwrap_or("info");
            let line = issue["line"].as_u64().unwrap_or(0);
            let message = issue["message"].as_str().unwrap_or("");
            let label = match kind {
                "error" => kind.red().to_string(),
                "warning" => kind.yellow().to_string(),
                _ => kind.normal().to_string(),
            };
            println!("  line {:>3} [{}] {}", line, label, message);
            if let Some(suggestion) = issue["suggestion"].as_str() {
                println!("           {}", suggestion.dimmed());
            }
        }

        if let Some(analysis) = response.data["rootCauseAnalysis"].as_object() {
            println!("\n{}", "Root Cause".bold());
            if let Some(explanation) = analysis["explanation"].as_str() {
                println!("  {}", explanation);
            }
            if let Some(fix) = analysis["suggestedFix"].as_str() {
                println!("  {} {}", "fix:".green(), fix);
            }
            if let Some(patched) = analysis.get("patchedCode").and_then(|v| v.as_str()) {
                println!("\n{}\n{}", "Patched Code".bold(), patched);
            }
        }

        Ok(())
    }
}
