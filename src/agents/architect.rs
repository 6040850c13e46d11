//! Architecture analysis agent
//!
//! Runs the deterministic core, then layers optional AI enrichment on top.
//! The merge contract: patterns are unioned with set semantics (first
//! occurrence wins the position), flaws and recommendations are concatenated
//! deterministic-first without deduplication. Enrichment failure of any kind
//! degrades to the deterministic result; it can never fail the request.

use super::prompts;
use super::{Agent, AgentKind, AgentRequest, AgentResponse};
use crate::analysis::{
    AnalysisParts, ArchitectureAnalysis, ArchitectureAnalyzer, DesignFlaw, Recommendation,
};
use crate::constants::llm::TIMEOUT_SECS;
use crate::project::ProjectFile;
use crate::report::{self, DesignDocument};
use anyhow::Result;
use crew_llm::{TextGenerator, enrich, extract_json_object};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Enrichment payload expected back from the model
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AiReview {
    patterns: Vec<String>,
    flaws: Vec<DesignFlaw>,
    recommendations: Vec<Recommendation>,
    executive_summary: String,
}

pub struct ArchitectAgent {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl ArchitectAgent {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }

    /// Analyze a file set, merging AI enrichment when available
    pub async fn analyze(&self, files: &[ProjectFile]) -> ArchitectureAnalysis {
        let parts = ArchitectureAnalyzer::analyze(files);
        let ai = self.ai_review(files, &parts).await;

        let detected_patterns = merge_patterns(parts.detected_patterns, ai.patterns);
        let mut design_flaws = parts.design_flaws;
        design_flaws.extend(ai.flaws);
        let mut recommendations = parts.recommendations;
        recommendations.extend(ai.recommendations);

        let design_document = report::render(&DesignDocument {
            patterns: &detected_patterns,
            layers: &parts.layer_structure,
            dependencies: &parts.dependencies,
            metrics: &parts.metrics,
            recommendations: &recommendations,
            executive_summary: &ai.executive_summary,
        });

        ArchitectureAnalysis {
            detected_patterns,
            layer_structure: parts.layer_structure,
            dependencies: parts.dependencies,
            design_flaws,
            metrics: parts.metrics,
            recommendations,
            design_document,
        }
    }

    /// Ask the model for enrichment; every failure path returns the default
    async fn ai_review(&self, files: &[ProjectFile], parts: &AnalysisParts) -> AiReview {
        let Some(generator) = &self.generator else {
            return AiReview::unavailable();
        };

        let prompt = match prompts::architect_prompt(
            files,
            &parts.layer_structure,
            &parts.dependencies,
            &parts.metrics,
        ) {
            Ok(prompt) => prompt,
            Err(error) => {
                eprintln!("Failed to build architect prompt: {error:#}");
                return AiReview::unavailable();
            }
        };

        let Some(response) = enrich(generator.as_ref(), &prompt, None, self.timeout).await else {
            return AiReview::unavailable();
        };

        let candidate = extract_json_object(&response).unwrap_or(&response);
        match serde_json::from_str(candidate) {
            Ok(review) => review,
            Err(error) => {
                eprintln!("AI analysis returned unparseable output: {error}");
                AiReview::unavailable()
            }
        }
    }
}

impl AiReview {
    fn unavailable() -> Self {
        Self {
            executive_summary: "AI analysis unavailable.".to_string(),
            ..Self::default()
        }
    }
}

/// Union pattern lists, keeping first-seen order
fn merge_patterns(deterministic: Vec<String>, ai: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::new();
    for pattern in deterministic.into_iter().chain(ai) {
        if seen.insert(pattern.clone()) {
            merged.push(pattern);
        }
    }
    merged
}

#[async_trait::async_trait]
impl Agent for ArchitectAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Architect
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let files = request.file_set();
        let analysis = self.analyze(&files).await;

        let suggestions = analysis
            .recommendations
            .iter()
            .map(|r| r.title.clone())
            .collect();

        Ok(
            AgentResponse::new(AgentKind::Architect, serde_json::to_value(&analysis)?)
                .with_suggestions(suggestions),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;

    struct Canned(String);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate_text(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate_text(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
            anyhow::bail!("auth error")
        }
    }

    fn cycle_files() -> Vec<ProjectFile> {
        vec![
            ProjectFile::new("a.ts", "import {x} from './b'", "typescript"),
            ProjectFile::new("b.ts", "import {y} from './a'", "typescript"),
        ]
    }

    #[tokio::test]
    async fn test_deterministic_only_without_generator() {
        let agent = ArchitectAgent::new(None);
        let analysis = agent.analyze(&cycle_files()).await;

        assert_eq!(analysis.dependencies.edges.len(), 2);
        assert!(!analysis.dependencies.cycles.is_empty());
        assert!(
            analysis
                .design_flaws
                .iter()
                .any(|f| f.kind == "Circular Dependency")
        );
        assert!(analysis.design_document.contains("AI analysis unavailable."));
    }

    #[tokio::test]
    async fn test_enrichment_merged_with_dedup_on_patterns() {
        let reply = r#"Sure, here's my take:
{
  "patterns": ["Layered Architecture", "Event-Driven"],
  "flaws": [{"type": "Leaky Abstraction", "severity": "medium", "location": "a.ts", "description": "d", "impact": "i", "suggestion": "s"}],
  "recommendations": [],
  "executiveSummary": "Small but cyclic."
}"#;
        let agent = ArchitectAgent::new(Some(Arc::new(Canned(reply.to_string()))));

        let files = vec![
            ProjectFile::new("ui/view.tsx", "", "typescript"),
            ProjectFile::new("api/routes.ts", "", "typescript"),
            ProjectFile::new("db/model.ts", "", "typescript"),
        ];
        let analysis = agent.analyze(&files).await;

        // "Layered Architecture" already came from the heuristics; only one copy survives.
        let layered: Vec<_> = analysis
            .detected_patterns
            .iter()
            .filter(|p| *p == "Layered Architecture")
            .collect();
        assert_eq!(layered.len(), 1);
        assert!(
            analysis
                .detected_patterns
                .contains(&"Event-Driven".to_string())
        );
        assert!(
            analysis
                .design_flaws
                .iter()
                .any(|f| f.kind == "Leaky Abstraction")
        );
        assert!(analysis.design_document.contains("Small but cyclic."));
    }

    #[tokio::test]
    async fn test_generator_failure_degrades_gracefully() {
        let agent = ArchitectAgent::new(Some(Arc::new(Failing)));
        let analysis = agent.analyze(&cycle_files()).await;

        // Deterministic portion intact, enrichment empty.
        assert!(!analysis.dependencies.cycles.is_empty());
        assert!(analysis.design_document.contains("AI analysis unavailable."));
    }

    #[tokio::test]
    async fn test_malformed_model_output_degrades() {
        let agent = ArchitectAgent::new(Some(Arc::new(Canned("not json at all".to_string()))));
        let analysis = agent.analyze(&cycle_files()).await;

        assert!(analysis.design_document.contains("AI analysis unavailable."));
        assert!(
            analysis
                .design_flaws
                .iter()
                .all(|f| f.kind != "Leaky Abstraction")
        );
    }

    #[tokio::test]
    async fn test_process_reports_recommendation_titles() {
        let agent = ArchitectAgent::new(None);
        let mut request = AgentRequest::new(AgentKind::Architect, "");
        request.project_files = Some(cycle_files());

        let response = agent.process(&request).await.unwrap();
        assert!(response.success);
        assert!(
            response
                .suggestions
                .contains(&"Fix Circular Dependency".to_string())
        );
        assert!(
            response
                .suggestions
                .contains(&"Apply SOLID Principles".to_string())
        );
    }
}
