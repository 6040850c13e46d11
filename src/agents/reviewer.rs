//! Code-review agent
//!
//! The review itself is model-driven; the agent owns the JSON contract, the
//! response parsing, and the canned fallback used whenever the model is
//! unavailable or returns something unparseable.

use super::prompts;
use super::{Agent, AgentKind, AgentRequest, AgentResponse};
use crate::constants::llm::TIMEOUT_SECS;
use anyhow::Result;
use crew_llm::{TextGenerator, enrich, extract_json_object};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Structured review result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeReview {
    pub score: f64,
    pub summary: String,
    pub improvements: Vec<String>,
    pub best_practices: Vec<String>,
    pub security: Vec<String>,
}

impl Default for CodeReview {
    fn default() -> Self {
        Self {
            score: 0.0,
            summary: String::new(),
            improvements: Vec::new(),
            best_practices: Vec::new(),
            security: Vec::new(),
        }
    }
}

pub struct ReviewerAgent {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl ReviewerAgent {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self {
            generator,
            timeout: Duration::from_secs(TIMEOUT_SECS),
        }
    }

    /// Review a code buffer, falling back to the canned review on failure
    pub async fn review(&self, code: &str, language: &str) -> CodeReview {
        let Some(generator) = &self.generator else {
            return Self::fallback_review();
        };

        let prompt = match prompts::reviewer_prompt(code, language) {
            Ok(prompt) => prompt,
            Err(error) => {
                eprintln!("Failed to build review prompt: {error:#}");
                return Self::fallback_review();
            }
        };

        let Some(response) = enrich(generator.as_ref(), &prompt, None, self.timeout).await else {
            return Self::fallback_review();
        };

        let candidate = extract_json_object(&response).unwrap_or(&response);
        match serde_json::from_str::<AiReviewPayload>(candidate) {
            Ok(payload) => payload.into(),
            Err(error) => {
                eprintln!("Review returned unparseable output: {error}");
                Self::fallback_review()
            }
        }
    }

    /// Deterministic review used when the model cannot be consulted
    fn fallback_review() -> CodeReview {
        CodeReview {
            score: 8.0,
            summary: "Automated heuristics only; model review unavailable.".to_string(),
            improvements: vec![
                "Add error handling".to_string(),
                "Improve variable naming".to_string(),
                "Add JSDoc comments".to_string(),
            ],
            best_practices: vec!["Use const/let instead of var".to_string()],
            security: vec!["Validate user input".to_string()],
        }
    }
}

/// Wire shape of the model's review reply
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AiReviewPayload {
    overall_score: f64,
    summary: String,
    improvements: Vec<String>,
    best_practices: Vec<String>,
    security: Vec<String>,
}

impl From<AiReviewPayload> for CodeReview {
    fn from(payload: AiReviewPayload) -> Self {
        Self {
            score: payload.overall_score,
            summary: payload.summary,
            improvements: payload.improvements,
            best_practices: payload.best_practices,
            security: payload.security,
        }
    }
}

#[async_trait::async_trait]
impl Agent for ReviewerAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Reviewer
    }

    async fn process(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let language = request.language.as_deref().unwrap_or("javascript");
        let review = self.review(&request.code, language).await;

        let suggestions = review.improvements.clone();
        Ok(
            AgentResponse::new(AgentKind::Reviewer, serde_json::to_value(&review)?)
                .with_suggestions(suggestions),
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

    #[tokio::test]
    async fn test_review_without_generator_uses_fallback() {
        let agent = ReviewerAgent::new(None);
        let review = agent.review("var a = 1;", "javascript").await;

        assert_eq!(review.score, 8.0);
        assert!(review.improvements.contains(&"Add error handling".to_string()));
    }

    #[tokio::test]
    async fn test_review_parses_wrapped_json() {
        let reply = r#"Here is my review:
{"overallScore": 6.5, "summary": "Decent", "improvements": ["Split function"], "bestPractices": [], "security": ["Sanitize input"]}"#;
        let agent = ReviewerAgent::new(Some(Arc::new(Canned(reply))));

        let review = agent.review("code", "javascript").await;
        assert_eq!(review.score, 6.5);
        assert_eq!(review.summary, "Decent");
        assert_eq!(review.security, vec!["Sanitize input"]);
    }

    #[tokio::test]
    async fn test_review_malformed_output_falls_back() {
        let agent = ReviewerAgent::new(Some(Arc::new(Canned("no json"))));
        let review = agent.review("code", "javascript").await;

        assert_eq!(review.score, 8.0);
    }

    #[tokio::test]
    async fn test_process_surfaces_improvements_as_suggestions() {
        let agent = ReviewerAgent::new(None);
        let request = AgentRequest::new(AgentKind::Reviewer, "code");

        let response = agent.process(&request).await.unwrap();
        assert!(
            response
                .suggestions
                .contains(&"Add error handling".to_string())
        );
    }
}
