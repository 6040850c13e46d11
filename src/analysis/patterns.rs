//! Architectural pattern detection
//!
//! Pure rule evaluation over the classified layers and the raw file list.
//! Rules fire independently and their labels are distinct, so the output
//! needs no deduplication; order is the fixed rule order.

use super::layers::{self, Layer};
use crate::project::ProjectFile;

/// Content markers that identify a web framework
const WEB_FRAMEWORK_MARKERS: &[&str] = &["express", "fastify"];

/// Detect named architectural patterns
pub fn detect_patterns(files: &[ProjectFile], layer_structure: &[Layer]) -> Vec<String> {
    let mut patterns = Vec::new();

    if layers::has_layer(layer_structure, "Presentation")
        && layers::has_layer(layer_structure, "API/Routes")
        && layers::has_layer(layer_structure, "Data Access")
    {
        patterns.push("MVC (Model-View-Controller)".to_string());
    }

    if layer_structure.len() >= 3 {
        patterns.push("Layered Architecture".to_string());
    }

    if files.iter().any(|f| f.path.contains("repository")) {
        patterns.push("Repository Pattern".to_string());
    }

    if files.iter().any(|f| f.path.contains("service")) {
        patterns.push("Service Layer Pattern".to_string());
    }

    let has_framework = files.iter().any(|f| {
        WEB_FRAMEWORK_MARKERS
            .iter()
            .any(|marker| f.content.contains(marker))
    });
    let has_api_path = files
        .iter()
        .any(|f| f.path.contains("api") || f.path.contains("route"));
    if has_framework && has_api_path {
        patterns.push("REST API Architecture".to_string());
    }

    patterns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::layers::infer_layers;

    fn file(path: &str, content: &str) -> ProjectFile {
        ProjectFile::new(path, content, "javascript")
    }

    fn detect(files: &[ProjectFile]) -> Vec<String> {
        let layer_structure = infer_layers(files);
        detect_patterns(files, &layer_structure)
    }

    #[test]
    fn test_no_patterns_for_flat_project() {
        let files = vec![file("main.js", "console.log('hi')")];
        assert!(detect(&files).is_empty());
    }

    #[test]
    fn test_mvc_requires_three_specific_layers() {
        let files = vec![
            file("ui/view.tsx", ""),
            file("api/routes.ts", ""),
            file("db/model.ts", ""),
        ];
        let patterns = detect(&files);

        assert!(patterns.contains(&"MVC (Model-View-Controller)".to_string()));
        // Three layers also implies the layered-architecture rule.
        assert!(patterns.contains(&"Layered Architecture".to_string()));
    }

    #[test]
    fn test_repository_and_service_by_path() {
        let files = vec![
            file("src/user-repository.ts", ""),
            file("src/user-service.ts", ""),
        ];
        let patterns = detect(&files);

        assert!(patterns.contains(&"Repository Pattern".to_string()));
        assert!(patterns.contains(&"Service Layer Pattern".to_string()));
    }

    #[test]
    fn test_rest_api_needs_framework_and_path() {
        let only_framework = vec![file("main.js", "const app = express()")];
        assert!(!detect(&only_framework).contains(&"REST API Architecture".to_string()));

        let both = vec![
            file("main.js", "const app = express()"),
            file("api/users.js", ""),
        ];
        assert!(detect(&both).contains(&"REST API Architecture".to_string()));
    }

    #[test]
    fn test_rule_evaluation_order() {
        let files = vec![
            file("ui/page.tsx", ""),
            file("api/controller.ts", "express"),
            file("db/repository.ts", ""),
            file("core/service.ts", ""),
        ];
        let patterns = detect(&files);

        assert_eq!(
            patterns,
            vec![
                "MVC (Model-View-Controller)",
                "Layered Architecture",
                "Repository Pattern",
                "Service Layer Pattern",
                "REST API Architecture",
            ]
        );
    }
}
