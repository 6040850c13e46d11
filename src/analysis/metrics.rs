//! Architecture metric calculation
//!
//! Six deterministic scores derived from file count, edge count, layer
//! count, and content length. Simple proxies, not validated software
//! metrics. The formulas are contractual: reproducibility matters more than
//! metric theory here. Every score is clamped to [0, 10] and rounded to one
//! decimal place, and every division guards its denominator with
//! `max(x, 1)` so empty inputs stay defined.

use super::ArchitectureMetrics;
use super::graph::DependencyGraph;
use super::layers::Layer;
use crate::project::ProjectFile;

/// Compute the six architecture metrics for a file set
pub fn calculate(
    files: &[ProjectFile],
    dependencies: &DependencyGraph,
    layer_structure: &[Layer],
) -> ArchitectureMetrics {
    let file_count = files.len();
    let edge_count = dependencies.edges.len();
    let layer_count = layer_structure.len();

    let avg_deps_per_file = edge_count as f64 / file_count.max(1) as f64;
    let complexity = (avg_deps_per_file * 2.0).min(10.0);

    let total_size: usize = files.iter().map(|f| f.content.len()).sum();
    let avg_file_size = total_size as f64 / file_count.max(1) as f64;
    let maintainability = (10.0 - avg_file_size / 1000.0 - complexity / 2.0).max(0.0);

    let modularity = (layer_count as f64 * 2.0).min(10.0);

    let coupling = avg_deps_per_file.min(10.0);

    let avg_files_per_layer = file_count as f64 / layer_count.max(1) as f64;
    let cohesion = (avg_files_per_layer / 2.0).min(10.0);

    let testability = (modularity + (10.0 - coupling)) / 2.0;

    ArchitectureMetrics {
        complexity: round1(complexity),
        maintainability: round1(maintainability),
        modularity: round1(modularity),
        coupling: round1(coupling),
        cohesion: round1(cohesion),
        testability: round1(testability),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::build_graph;
    use crate::analysis::layers::infer_layers;

    fn file(path: &str, content: &str) -> ProjectFile {
        ProjectFile::new(path, content, "javascript")
    }

    fn metrics_for(files: &[ProjectFile]) -> ArchitectureMetrics {
        let graph = build_graph(files);
        let layers = infer_layers(files);
        calculate(files, &graph, &layers)
    }

    fn assert_bounded(m: &ArchitectureMetrics) {
        for value in [
            m.complexity,
            m.maintainability,
            m.modularity,
            m.coupling,
            m.cohesion,
            m.testability,
        ] {
            assert!((0.0..=10.0).contains(&value), "metric out of range: {value}");
        }
    }

    #[test]
    fn test_empty_file_set_is_defined() {
        let m = metrics_for(&[]);

        assert_eq!(m.complexity, 0.0);
        assert_eq!(m.coupling, 0.0);
        assert_eq!(m.modularity, 0.0);
        assert_eq!(m.cohesion, 0.0);
        assert_eq!(m.maintainability, 10.0);
        assert_eq!(m.testability, 5.0);
        assert_bounded(&m);
    }

    #[test]
    fn test_known_small_project() {
        // 2 files, 2 internal edges, 0 layers.
        let files = vec![
            file("a.ts", "import {x} from './b'"),
            file("b.ts", "import {y} from './a'"),
        ];
        let m = metrics_for(&files);

        // avgDeps = 1.0 -> complexity 2.0, coupling 1.0.
        assert_eq!(m.complexity, 2.0);
        assert_eq!(m.coupling, 1.0);
        assert_eq!(m.modularity, 0.0);
        assert_eq!(m.testability, 4.5);
        assert_bounded(&m);
    }

    #[test]
    fn test_modularity_scales_with_layers() {
        let files = vec![
            file("ui/view.tsx", ""),
            file("api/routes.ts", ""),
            file("db/model.ts", ""),
        ];
        let m = metrics_for(&files);

        assert_eq!(m.modularity, 6.0);
        assert_bounded(&m);
    }

    #[test]
    fn test_metrics_stay_bounded_under_load() {
        // Dense graph: every file imports every other.
        let mut files = Vec::new();
        for i in 0..12 {
            let imports: String = (0..12)
                .filter(|j| *j != i)
                .map(|j| format!("import {{x{j}}} from './m{j}x'\n"))
                .collect();
            files.push(file(&format!("m{i}x.ts"), &imports));
        }
        let m = metrics_for(&files);

        assert_eq!(m.complexity, 10.0);
        assert_bounded(&m);
    }

    #[test]
    fn test_large_files_floor_maintainability() {
        let content = "x".repeat(20_000);
        let m = metrics_for(&[file("huge.js", &content)]);

        assert_eq!(m.maintainability, 0.0);
        assert_bounded(&m);
    }

    #[test]
    fn test_rounding_to_one_decimal() {
        // 3 files, 1 edge: avgDeps = 1/3 -> complexity 0.667 -> 0.7.
        let files = vec![
            file("a.ts", "import {x} from './b'"),
            file("b.ts", ""),
            file("c.ts", ""),
        ];
        let m = metrics_for(&files);

        assert_eq!(m.complexity, 0.7);
        assert_eq!(m.coupling, 0.3);
    }
}
