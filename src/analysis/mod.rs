//! Deterministic static-analysis core
//!
//! Everything in this module is synchronous and pure over its inputs: given
//! the same file set, every function returns the same result. The hosted
//! model never participates here; AI enrichment happens at the agent layer
//! and is merged on top of this output.
//!
//! The pipeline runs leaf-first: imports are extracted and resolved per file,
//! combined into a dependency graph, cycles detected, files bucketed into
//! architectural layers, and patterns, flaws, metrics, and recommendations
//! derived from those.

pub mod flaws;
pub mod graph;
pub mod imports;
pub mod layers;
pub mod metrics;
pub mod patterns;
pub mod recommend;
pub mod structure;

pub use graph::{DependencyEdge, DependencyGraph, EdgeKind};
pub use layers::Layer;

use crate::project::ProjectFile;
use serde::{Deserialize, Serialize};

/// Severity of a design flaw
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A structural problem found in the analyzed project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignFlaw {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub location: String,
    pub description: String,
    pub impact: String,
    pub suggestion: String,
}

/// Priority of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A suggested improvement derived from flaws, metrics, and layers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub implementation: String,
}

/// Six bounded [0, 10] scores describing the project's structure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureMetrics {
    pub complexity: f64,
    pub maintainability: f64,
    pub modularity: f64,
    pub coupling: f64,
    pub cohesion: f64,
    pub testability: f64,
}

/// Complete result of one architecture analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureAnalysis {
    pub detected_patterns: Vec<String>,
    pub layer_structure: Vec<Layer>,
    pub dependencies: DependencyGraph,
    pub design_flaws: Vec<DesignFlaw>,
    pub metrics: ArchitectureMetrics,
    pub recommendations: Vec<Recommendation>,
    pub design_document: String,
}

/// Coordinator for the deterministic pipeline
///
/// Produces every field of [`ArchitectureAnalysis`] except the design
/// document, which the caller renders once enrichment (if any) has been
/// merged in.
pub struct ArchitectureAnalyzer;

/// Deterministic analysis output, before document rendering
#[derive(Debug, Clone)]
pub struct AnalysisParts {
    pub layer_structure: Vec<Layer>,
    pub dependencies: DependencyGraph,
    pub detected_patterns: Vec<String>,
    pub design_flaws: Vec<DesignFlaw>,
    pub metrics: ArchitectureMetrics,
    pub recommendations: Vec<Recommendation>,
}

impl ArchitectureAnalyzer {
    /// Run the full deterministic pipeline over a file set
    pub fn analyze(files: &[ProjectFile]) -> AnalysisParts {
        let layer_structure = layers::infer_layers(files);
        let dependencies = graph::build_graph(files);
        let detected_patterns = patterns::detect_patterns(files, &layer_structure);
        let design_flaws = flaws::find_flaws(files, &dependencies, &layer_structure);
        let metrics = metrics::calculate(files, &dependencies, &layer_structure);
        let recommendations = recommend::generate(&design_flaws, &metrics, &layer_structure);

        AnalysisParts {
            layer_structure,
            dependencies,
            detected_patterns,
            design_flaws,
            metrics,
            recommendations,
        }
    }
}
