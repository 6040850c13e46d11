//! Documentation agent
//!
//! Fully deterministic: a structure listing of the file set plus API docs
//! extracted from files under api/route paths.

use super::{Agent, AgentKind, AgentRequest, AgentResponse};
use crate::analysis::structure;
use crate::project::ProjectFile;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Generated project documentation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    pub project_name: String,
    pub description: String,
    pub structure: String,
    pub api_docs: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct DocumenterAgent;

impl DocumenterAgent {
    pub fn new() -> Self {
        Self
    }

    /// Generate documentation for a file set
    pub fn generate(files: &[ProjectFile], project_name: &str) -> Documentation {
        Documentation {
            project_name: project_name.to_string(),
            description: format!("Auto-generated documentation for {}", project_name),
            structure: Self::render_structure(files),
            api_docs: Self::render_api_docs(files),
            generated_at: Utc::now(),
        }
    }

    fn render_structure(files: &[ProjectFile]) -> String {
        files
            .iter()
            .map(|f| format!("- {}", f.path))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_api_docs(files: &[ProjectFile]) -> String {
        files
            .iter()
            .filter(|f| f.path.contains("api") || f.path.contains("routes"))
            .map(|f| {
                let functions = structure::extract_functions(&f.content)
                    .into_iter()
                    .map(|name| format!("- {}", name))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("## {}\n\n{}", f.path, functions)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

#[async_trait::async_trait]
impl Agent for DocumenterAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Documenter
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let files = request.file_set();
        let name = request
            .options
            .project_name
            .as_deref()
            .unwrap_or("Untitled Project");

        let documentation = Self::generate(&files, name);
        Ok(AgentResponse::new(
            AgentKind::Documenter,
            serde_json::to_value(&documentation)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_lists_every_file() {
        let files = vec![
            ProjectFile::new("src/a.ts", "", "typescript"),
            ProjectFile::new("src/b.ts", "", "typescript"),
        ];
        let doc = DocumenterAgent::generate(&files, "demo");

        assert_eq!(doc.structure, "- src/a.ts\n- src/b.ts");
        assert!(doc.description.contains("demo"));
    }

    #[test]
    fn test_api_docs_cover_api_paths_only() {
        let files = vec![
            ProjectFile::new("api/users.js", "function listUsers() {}", "javascript"),
            ProjectFile::new("core/math.js", "function add() {}", "javascript"),
        ];
        let doc = DocumenterAgent::generate(&files, "demo");

        assert!(doc.api_docs.contains("## api/users.js"));
        assert!(doc.api_docs.contains("- listUsers"));
        assert!(!doc.api_docs.contains("core/math.js"));
    }

    #[tokio::test]
    async fn test_process_uses_project_name_option() {
        let agent = DocumenterAgent::new();
        let mut request = AgentRequest::new(AgentKind::Documenter, "function f() {}");
        request.options.project_name = Some("sample".to_string());

        let response = agent.process(&request).await.unwrap();
        assert_eq!(response.data["projectName"], "sample");
    }
}
