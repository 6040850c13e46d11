//! Architectural layer classification
//!
//! Keyword heuristic over file paths. Classification is independent per
//! layer: a path containing both "service" and "controller" lands in both
//! Business Logic and API/Routes. Layers with no matching files are omitted
//! from the output, which always follows the fixed rule order below.

use crate::project::ProjectFile;
use serde::{Deserialize, Serialize};

/// A heuristically inferred architectural grouping of files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub files: Vec<String>,
    pub responsibilities: Vec<String>,
}

struct LayerRule {
    name: &'static str,
    keywords: &'static [&'static str],
    responsibilities: &'static [&'static str],
}

const LAYER_RULES: &[LayerRule] = &[
    LayerRule {
        name: "Presentation",
        keywords: &["component", "view", "ui", "page", "screen"],
        responsibilities: &["User interface", "User interaction"],
    },
    LayerRule {
        name: "API/Routes",
        keywords: &["route", "controller", "api", "endpoint"],
        responsibilities: &["HTTP handling", "Request routing"],
    },
    LayerRule {
        name: "Business Logic",
        keywords: &["service", "manager", "handler", "use-case"],
        responsibilities: &["Business rules", "Domain logic"],
    },
    LayerRule {
        name: "Data Access",
        keywords: &["repository", "dao", "model", "entity", "schema"],
        responsibilities: &["Data persistence", "Database queries"],
    },
    LayerRule {
        name: "Infrastructure",
        keywords: &["config", "util", "helper", "middleware"],
        responsibilities: &["Cross-cutting concerns", "Utilities"],
    },
];

/// Bucket files into named layers by path keywords
pub fn infer_layers(files: &[ProjectFile]) -> Vec<Layer> {
    let mut layers = Vec::new();

    for rule in LAYER_RULES {
        let matching: Vec<String> = files
            .iter()
            .filter(|f| {
                let path = f.path.to_lowercase();
                rule.keywords.iter().any(|kw| path.contains(kw))
            })
            .map(|f| f.path.clone())
            .collect();

        if !matching.is_empty() {
            layers.push(Layer {
                name: rule.name.to_string(),
                files: matching,
                responsibilities: rule
                    .responsibilities
                    .iter()
                    .map(|r| r.to_string())
                    .collect(),
            });
        }
    }

    layers
}

/// Whether a layer with the given name was classified
pub fn has_layer(layers: &[Layer], name: &str) -> bool {
    layers.iter().any(|l| l.name == name)
}
