//! Agent handlers and orchestration
//!
//! Each agent turns one kind of request (architecture analysis, debugging,
//! review, test generation, documentation) into a structured response. The
//! hosted model is an injected dependency ([`TextGenerator`]); agents that
//! use it must keep producing their deterministic portion when it is absent
//! or failing.

pub mod architect;
pub mod debugger;
pub mod documenter;
mod prompts;
pub mod reviewer;
pub mod tester;

pub use architect::ArchitectAgent;
pub use debugger::DebuggerAgent;
pub use documenter::DocumenterAgent;
pub use reviewer::ReviewerAgent;
pub use tester::TesterAgent;

use crate::project::{self, ProjectFile};
use anyhow::Result;
use chrono::{DateTime, Utc};
use crew_llm::TextGenerator;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// The kinds of agent the platform can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Architect,
    Debugger,
    Reviewer,
    Tester,
    Documenter,
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Architect => write!(f, "architect"),
            Self::Debugger => write!(f, "debugger"),
            Self::Reviewer => write!(f, "reviewer"),
            Self::Tester => write!(f, "tester"),
            Self::Documenter => write!(f, "documenter"),
        }
    }
}

/// Per-request options not every agent cares about
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Recorded runtime output (stderr) for the debugger to analyze
    pub runtime_error: Option<String>,
    /// Whether the debugger may propose a patched version of the code
    pub auto_fix: bool,
    /// Project name used by the documenter
    pub project_name: Option<String>,
}

/// One request dispatched to an agent
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub kind: AgentKind,
    pub code: String,
    pub language: Option<String>,
    pub project_files: Option<Vec<ProjectFile>>,
    pub options: RequestOptions,
}

impl AgentRequest {
    pub fn new(kind: AgentKind, code: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            language: None,
            project_files: None,
            options: RequestOptions::default(),
        }
    }

    /// The file set to analyze, synthesizing a one-file set when absent
    pub fn file_set(&self) -> Vec<ProjectFile> {
        match &self.project_files {
            Some(files) if !files.is_empty() => files.clone(),
            _ => project::single_file_set(&self.code, self.language.as_deref()),
        }
    }
}

/// Structured result returned by every agent
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResponse {
    pub kind: AgentKind,
    pub success: bool,
    pub data: serde_json::Value,
    pub suggestions: Vec<String>,
    pub errors: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl AgentResponse {
    pub fn new(kind: AgentKind, data: serde_json::Value) -> Self {
        Self {
            kind,
            success: true,
            data,
            suggestions: Vec::new(),
            errors: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }
}

/// Trait every agent implements
#[async_trait::async_trait]
pub trait Agent: Send + Sync {
    /// The kind this agent answers for
    fn kind(&self) -> AgentKind;

    /// Handle one request
    async fn process(&self, request: &AgentRequest) -> Result<AgentResponse>;
}

/// Routes requests to the agent registered for their kind
pub struct Orchestrator {
    agents: HashMap<AgentKind, Box<dyn Agent>>,
}

/// One row of the orchestrator status listing
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatus {
    pub kind: AgentKind,
    pub status: &'static str,
}

impl Orchestrator {
    /// Build an orchestrator with all five agents registered
    ///
    /// `generator` is shared by every agent that talks to the hosted model;
    /// `None` runs the platform in deterministic-only mode.
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        let mut agents: HashMap<AgentKind, Box<dyn Agent>> = HashMap::new();

        agents.insert(
            AgentKind::Architect,
            Box::new(ArchitectAgent::new(generator.clone())),
        );
        agents.insert(AgentKind::Debugger, Box::new(DebuggerAgent::new()));
        agents.insert(
            AgentKind::Reviewer,
            Box::new(ReviewerAgent::new(generator.clone())),
        );
        agents.insert(AgentKind::Tester, Box::new(TesterAgent::new(generator)));
        agents.insert(AgentKind::Documenter, Box::new(DocumenterAgent::new()));

        Self { agents }
    }

    /// Dispatch a request to the agent registered for its kind
    pub async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse> {
        let agent = self
            .agents
            .get(&request.kind)
            .ok_or_else(|| anyhow::anyhow!("Agent '{}' not found", request.kind))?;
        agent.process(request).await
    }

    /// Report every registered agent as active
    pub fn status(&self) -> Vec<AgentStatus> {
        let mut statuses: Vec<AgentStatus> = self
            .agents
            .keys()
            .map(|kind| AgentStatus {
                kind: *kind,
                status: "active",
            })
            .collect();
        statuses.sort_by_key(|s| s.kind.to_string());
        statuses
    }
}
