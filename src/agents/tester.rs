//! Test-generation agent
//!
//! Asks the model for a Jest suite, then derives the deterministic facts
//! (test count and case names) with the code-structure parser. Running the
//! generated suite is a sandbox concern outside this agent.

use super::prompts;
use super::{Agent, AgentKind, AgentRequest, AgentResponse};
use crate::analysis::structure;
use crate::constants::llm::TIMEOUT_SECS;
use anyhow::Result;
use crew_llm::{TextGenerator, enrich};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Result of one test-generation request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestGeneration {
    pub generated_tests: String,
    pub test_count: usize,
    pub test_cases: Vec<String>,
    /// Coverage requires running the suite, which this agent does not do
    pub coverage: Option<serde_json::Value>,
}

pub struct TesterAgent {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl TesterAgent {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }

    /// Generate a test suite for a code buffer
    pub async fn generate_tests(&self, code: &str) -> TestGeneration {
        let Some(generator) = &self.generator else {
            return Self::empty_generation();
        };

        let prompt = match prompts::tester_prompt(code) {
            Ok(prompt) => prompt,
            Err(error) => {
                eprintln!("Failed to build tester prompt: {error:#}");
                return Self::empty_generation();
            }
        };

        let Some(response) = enrich(generator.as_ref(), &prompt, None, self.timeout).await else {
            return Self::empty_generation();
        };

        let generated_tests = structure::strip_code_fences(&response);
        let test_count = structure::count_tests(&generated_tests);
        let test_cases = structure::extract_test_names(&generated_tests);

        TestGeneration {
            generated_tests,
            test_count,
            test_cases,
            coverage: None,
        }
    }

    fn empty_generation() -> TestGeneration {
        TestGeneration {
            generated_tests: "// Error generating tests".to_string(),
            test_count: 0,
            test_cases: Vec::new(),
            coverage: None,
        }
    }
}

#[async_trait::async_trait]
impl Agent for TesterAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Tester
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let generation = self.generate_tests(&request.code).await;

        Ok(
            AgentResponse::new(AgentKind::Tester, serde_json::to_value(&generation)?)
                .with_suggestions(vec![
                    "Run tests to verify coverage".to_string(),
                    "Review generated edge cases".to_string(),
                ]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Canned(&'static str);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate_text(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate_text(&self, _prompt: &str, _system: Option<&str>) -> Result<String> {
            anyhow::bail!("service down")
        }
    }

    #[tokio::test]
    async fn test_generation_strips_fences_and_counts() {
        let reply = "```javascript\ndescribe('add', () => {\n  it('adds numbers', () => {});\n  it('handles zero', () => {});\n});\n```";
        let agent = TesterAgent::new(Some(Arc::new(Canned(reply))));

        let generation = agent.generate_tests("function add() {}").await;

        assert!(!generation.generated_tests.contains("```"));
        assert_eq!(generation.test_count, 2);
        assert_eq!(
            generation.test_cases,
            vec!["adds numbers", "handles zero"]
        );
        assert!(generation.coverage.is_none());
    }

    #[tokio::test]
    async fn test_generation_failure_returns_placeholder() {
        let agent = TesterAgent::new(Some(Arc::new(Failing)));
        let generation = agent.generate_tests("function add() {}").await;

        assert_eq!(generation.generated_tests, "// Error generating tests");
        assert_eq!(generation.test_count, 0);
        assert!(generation.test_cases.is_empty());
    }

    #[tokio::test]
    async fn test_generation_without_generator() {
        let agent = TesterAgent::new(None);
        let generation = agent.generate_tests("code").await;
        assert_eq!(generation.test_count, 0);
    }

    #[tokio::test]
    async fn test_process_attaches_standard_suggestions() {
        let agent = TesterAgent::new(None);
        let request = AgentRequest::new(AgentKind::Tester, "code");

        let response = agent.process(&request).await.unwrap();
        assert_eq!(response.suggestions.len(), 2);
    }
}
