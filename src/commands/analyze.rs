//! Architecture analysis command

use super::base::{Command, CommandContext, build_generator, load_files};
use crate::agents::{Agent, AgentKind, AgentRequest, ArchitectAgent};
use crate::analysis::ArchitectureAnalysis;
use crate::console::Logger;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct AnalyzeCommand {
    /// File or directory to analyze
    pub path: PathBuf,
    /// Write the design document to this file
    pub output: Option<PathBuf>,
    /// Print only the design document
    pub doc_only: bool,
}

#[async_trait::async_trait]
impl Command for AnalyzeCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let logger = Logger;
        let files = load_files(&self.path, context)?;
        if !context.json {
            logger.info("architect", &format!("Analyzing {} files", files.len()));
        }

        let agent = ArchitectAgent::new(build_generator(context));
        let mut request = AgentRequest::new(AgentKind::Architect, "");
        request.project_files = Some(files);
        let response = agent.process(&request).await?;

        if let Some(output) = &self.output {
            let analysis: ArchitectureAnalysis = serde_json::from_value(response.data.clone())?;
            std::fs::write(output, &analysis.design_document)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            if !context.json {
                logger.success(
                    "architect",
                    &format!("Design document written to {}", output.display()),
                );
            }
        }

        if context.json {
            println!("{}", serde_json::to_string_pretty(&response.data)?);
            return Ok(());
        }

        let analysis: ArchitectureAnalysis = serde_json::from_value(response.data)?;

        if self.doc_only {
            println!("{}", analysis.design_document);
            return Ok(());
        }

        print_analysis(&analysis);
        logger.success("architect", "Analysis complete");
        Ok(())
    }
}

fn print_analysis(analysis: &ArchitectureAnalysis) {
    println!("\n{}", "Detected Patterns".bold());
    if analysis.detected_patterns.is_empty() {
        println!("  (none)");
    }
    for pattern in &analysis.detected_patterns {
        println!("  - {}", pattern);
    }

    println!("\n{}", "Layers".bold());
    if analysis.layer_structure.is_empty() {
        println!("  (none)");
    }
    for layer in &analysis.layer_structure {
        println!("  {} ({} files)", layer.name, layer.files.len());
    }

    println!("\n{}", "Dependencies".bold());
    println!("  modules: {}", analysis.dependencies.nodes.len());
    println!("  internal edges: {}", analysis.dependencies.edges.len());
    println!(
        "  external imports: {}",
        analysis.dependencies.external_imports.len()
    );
    println!("  cycles: {}", analysis.dependencies.cycles.len());

    println!("\n{}", "Metrics".bold());
    let m = &analysis.metrics;
    println!("  complexity: {}", m.complexity);
    println!("  maintainability: {}", m.maintainability);
    println!("  modularity: {}", m.modularity);
    println!("  coupling: {}", m.coupling);
    println!("  cohesion: {}", m.cohesion);
    println!("  testability: {}", m.testability);

    println!("\n{}", "Design Flaws".bold());
    if analysis.design_flaws.is_empty() {
        println!("  (none)");
    }
    for flaw in &analysis.design_flaws {
        let severity = format!("{:?}", flaw.severity).to_lowercase();
        let severity = match flaw.severity {
            crate::analysis::Severity::Critical | crate::analysis::Severity::High => {
                severity.red().to_string()
            }
            crate::analysis::Severity::Medium => severity.yellow().to_string(),
            crate::analysis::Severity::Low => severity.normal().to_string(),
        };
        println!("  [{}] {} @ {}", severity, flaw.kind, flaw.location);
    }

    println!("\n{}", "Recommendations".bold());
    for (idx, rec) in analysis.recommendations.iter().enumerate() {
        println!("  {}. {}", idx + 1, rec.title);
    }
    println!();
}
