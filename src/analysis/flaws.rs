//! Design-flaw scanning
//!
//! Five independent checks run in a fixed order; each appends zero or more
//! flaws. Output order is check order, not severity order. The thresholds
//! live in [`crate::constants::analysis`] and are part of the analysis
//! contract.

use super::graph::{self, DependencyGraph};
use super::layers::Layer;
use super::{DesignFlaw, Severity};
use crate::constants::analysis::{GOD_OBJECT_LINES, MAX_FAN_OUT, MIN_LAYERS};
use crate::project::ProjectFile;

/// Scan the analyzed project for structural problems
pub fn find_flaws(
    files: &[ProjectFile],
    dependencies: &DependencyGraph,
    layer_structure: &[Layer],
) -> Vec<DesignFlaw> {
    let mut flaws = Vec::new();

    // One flaw for the whole project, rendered from the first cycle.
    if let Some(first_cycle) = dependencies.cycles.first() {
        flaws.push(DesignFlaw {
            kind: "Circular Dependency".to_string(),
            severity: Severity::High,
            location: first_cycle.join(" -> "),
            description: "Circular dependencies detected between modules".to_string(),
            impact: "Makes code harder to test, maintain, and can cause runtime issues"
                .to_string(),
            suggestion: "Break the cycle by introducing interfaces or dependency inversion"
                .to_string(),
        });
    }

    for file in files {
        let lines = file.content.split('\n').count();
        if lines > GOD_OBJECT_LINES {
            flaws.push(DesignFlaw {
                kind: "God Object".to_string(),
                severity: Severity::Medium,
                location: file.path.clone(),
                description: format!(
                    "File has {} lines - too large and likely doing too much",
                    lines
                ),
                impact: "Reduces maintainability and violates Single Responsibility Principle"
                    .to_string(),
                suggestion: "Split into smaller, focused modules with clear responsibilities"
                    .to_string(),
            });
        }
    }

    for file in files {
        if file.content.contains("async")
            && !file.content.contains("try")
            && !file.content.contains("catch")
        {
            flaws.push(DesignFlaw {
                kind: "Missing Error Handling".to_string(),
                severity: Severity::High,
                location: file.path.clone(),
                description: "Async code without try-catch blocks".to_string(),
                impact: "Unhandled promise rejections can crash the application".to_string(),
                suggestion: "Add try-catch blocks around async operations".to_string(),
            });
        }
    }

    for node in &dependencies.nodes {
        let outgoing = graph::fan_out(dependencies, node);
        if outgoing > MAX_FAN_OUT {
            flaws.push(DesignFlaw {
                kind: "Tight Coupling".to_string(),
                severity: Severity::Medium,
                location: node.clone(),
                description: format!("Module depends on {} other modules", outgoing),
                impact: "High coupling makes changes risky and testing difficult".to_string(),
                suggestion: "Apply dependency injection and interface segregation".to_string(),
            });
        }
    }

    if layer_structure.len() < MIN_LAYERS {
        flaws.push(DesignFlaw {
            kind: "Poor Separation of Concerns".to_string(),
            severity: Severity::Medium,
            location: "Project structure".to_string(),
            description: "Insufficient architectural layers detected".to_string(),
            impact: "Business logic mixed with presentation or data access".to_string(),
            suggestion:
                "Organize code into clear layers: presentation, business logic, data access"
                    .to_string(),
        });
    }

    flaws
}
