//! Design-document rendering
//!
//! Pure formatting over a completed [`ArchitectureAnalysis`]: headers, a
//! metrics table with status markers, the dependency statistics, and the
//! numbered recommendation list. No analysis logic lives here.

use crate::analysis::{ArchitectureMetrics, DependencyGraph, Layer, Recommendation};
use chrono::Utc;

/// Inputs for one rendered design document
pub struct DesignDocument<'a> {
    pub patterns: &'a [String],
    pub layers: &'a [Layer],
    pub dependencies: &'a DependencyGraph,
    pub metrics: &'a ArchitectureMetrics,
    pub recommendations: &'a [Recommendation],
    pub executive_summary: &'a str,
}

/// Render the analysis as a Markdown design document
pub fn render(doc: &DesignDocument) -> String {
    let mut out = String::new();

    out.push_str("# Architecture Design Document\n\n");

    out.push_str("## Executive Summary\n");
    if doc.executive_summary.is_empty() {
        out.push_str(
            "This document provides an analysis of the current system architecture, \
             identifies design patterns, highlights potential issues, and recommends \
             improvements.\n\n",
        );
    } else {
        out.push_str(doc.executive_summary);
        out.push_str("\n\n");
    }

    out.push_str("## Detected Architecture Patterns\n");
    for pattern in doc.patterns {
        out.push_str(&format!("- {}\n", pattern));
    }
    out.push('\n');

    out.push_str("## Layer Structure\n");
    for layer in doc.layers {
        out.push_str(&format!("\n### {}\n", layer.name));
        out.push_str(&format!("**Files:** {}\n", layer.files.len()));
        out.push_str("**Responsibilities:**\n");
        for responsibility in &layer.responsibilities {
            out.push_str(&format!("- {}\n", responsibility));
        }
        out.push_str("**Files in this layer:**\n");
        for file in &layer.files {
            out.push_str(&format!("- {}\n", file));
        }
    }
    out.push('\n');

    let m = doc.metrics;
    out.push_str("## Architecture Metrics\n");
    out.push_str("| Metric | Score (0-10) | Status |\n");
    out.push_str("|--------|--------------|--------|\n");
    out.push_str(&format!(
        "| Complexity | {} | {} |\n",
        m.complexity,
        status(m.complexity, true)
    ));
    out.push_str(&format!(
        "| Maintainability | {} | {} |\n",
        m.maintainability,
        status(m.maintainability, false)
    ));
    out.push_str(&format!(
        "| Modularity | {} | {} |\n",
        m.modularity,
        status(m.modularity, false)
    ));
    out.push_str(&format!(
        "| Coupling | {} | {} |\n",
        m.coupling,
        status(m.coupling, true)
    ));
    out.push_str(&format!(
        "| Cohesion | {} | {} |\n",
        m.cohesion,
        status(m.cohesion, false)
    ));
    out.push_str(&format!(
        "| Testability | {} | {} |\n",
        m.testability,
        status(m.testability, false)
    ));
    out.push('\n');

    let deps = doc.dependencies;
    let avg = deps.edges.len() as f64 / deps.nodes.len().max(1) as f64;
    out.push_str("## Dependency Analysis\n");
    out.push_str(&format!("- **Total Modules:** {}\n", deps.nodes.len()));
    out.push_str(&format!("- **Total Dependencies:** {}\n", deps.edges.len()));
    out.push_str(&format!(
        "- **External Dependencies:** {}\n",
        deps.external_imports.len()
    ));
    out.push_str(&format!(
        "- **Circular Dependencies:** {}\n",
        deps.cycles.len()
    ));
    out.push_str(&format!(
        "- **Average Dependencies per Module:** {:.2}\n\n",
        avg
    ));

    out.push_str("## Recommendations\n");
    for (idx, rec) in doc.recommendations.iter().enumerate() {
        out.push_str(&format!(
            "\n### {}. {} [{} PRIORITY]\n",
            idx + 1,
            rec.title,
            priority_label(rec).to_uppercase()
        ));
        out.push_str(&format!("**Category:** {}\n\n", rec.category));
        out.push_str(&format!("**Description:** {}\n\n", rec.description));
        out.push_str("**Benefits:**\n");
        for benefit in &rec.benefits {
            out.push_str(&format!("- {}\n", benefit));
        }
        out.push_str(&format!("\n**Implementation:**\n{}\n", rec.implementation));
    }
    out.push('\n');

    out.push_str("## Next Steps\n");
    out.push_str("1. Address high-priority recommendations first\n");
    out.push_str("2. Implement architectural improvements incrementally\n");
    out.push_str("3. Add automated tests to prevent regressions\n");
    out.push_str("4. Document architectural decisions (ADRs)\n");
    out.push_str("5. Regular architecture reviews\n\n");

    out.push_str(&format!(
        "---\n*Generated by the crew architect agent on {}*\n",
        Utc::now().to_rfc3339()
    ));

    out
}

/// Status marker for a metric score
///
/// Complexity and coupling read inverted: lower is better.
fn status(score: f64, inverse: bool) -> &'static str {
    if inverse {
        if score <= 3.0 {
            "✅ Good"
        } else if score <= 6.0 {
            "⚠️ Needs Attention"
        } else {
            "❌ Poor"
        }
    } else if score >= 7.0 {
        "✅ Good"
    } else if score >= 4.0 {
        "⚠️ Needs Attention"
    } else {
        "❌ Poor"
    }
}

fn priority_label(rec: &Recommendation) -> &'static str {
    match rec.priority {
        crate::analysis::Priority::Low => "low",
        crate::analysis::Priority::Medium => "medium",
        crate::analysis::Priority::High => "high",
    }
}
