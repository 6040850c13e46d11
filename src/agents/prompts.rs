//! Prompt construction for model-backed agents
//!
//! Templates are embedded at compile time and rendered with minijinja. Each
//! agent gets exactly one template; the structural facts it interpolates
//! (layers, metrics, previews) come from the deterministic core.

use crate::analysis::{ArchitectureMetrics, DependencyGraph, Layer};
use crate::constants::analysis::FILE_PREVIEW_LINES;
use crate::project::ProjectFile;
use anyhow::Result;
use minijinja::{Environment, context};
use serde::Serialize;
use std::sync::OnceLock;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn get_template_env() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(|| {
        let mut env = Environment::new();

        env.add_template(
            "architect_prompt",
            include_str!("templates/architect_prompt.md"),
        )
        .expect("Failed to add architect_prompt template");
        env.add_template(
            "reviewer_prompt",
            include_str!("templates/reviewer_prompt.md"),
        )
        .expect("Failed to add reviewer_prompt template");
        env.add_template("tester_prompt", include_str!("templates/tester_prompt.md"))
            .expect("Failed to add tester_prompt template");

        env
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FilePreview {
    path: String,
    content_preview: String,
}

/// Build the architecture-enrichment prompt
///
/// File contents are truncated to their first lines to stay inside the
/// model's context window.
pub fn architect_prompt(
    files: &[ProjectFile],
    layers: &[Layer],
    dependencies: &DependencyGraph,
    metrics: &ArchitectureMetrics,
) -> Result<String> {
    let previews: Vec<FilePreview> = files
        .iter()
        .map(|f| FilePreview {
            path: f.path.clone(),
            content_preview: f
                .content
                .lines()
                .take(FILE_PREVIEW_LINES)
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect();

    let layers_json = serde_json::to_string_pretty(layers)?;
    let metrics_json = serde_json::to_string_pretty(metrics)?;
    let files_json = serde_json::to_string_pretty(&previews)?;

    let tmpl = get_template_env().get_template("architect_prompt")?;
    let rendered = tmpl.render(context! {
        layers => layers_json,
        metrics => metrics_json,
        node_count => dependencies.nodes.len(),
        edge_count => dependencies.edges.len(),
        cycle_count => dependencies.cycles.len(),
        files => files_json,
    })?;
    Ok(rendered)
}

/// Build the code-review prompt
pub fn reviewer_prompt(code: &str, language: &str) -> Result<String> {
    let tmpl = get_template_env().get_template("reviewer_prompt")?;
    let rendered = tmpl.render(context! {
        code => code,
        language => language,
    })?;
    Ok(rendered)
}

/// Build the test-generation prompt
pub fn tester_prompt(code: &str) -> Result<String> {
    let tmpl = get_template_env().get_template("tester_prompt")?;
    let rendered = tmpl.render(context! { code => code })?;
    Ok(rendered)
}
