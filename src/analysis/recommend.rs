//! Recommendation generation
//!
//! A fixed sequence of independent rules over the flaws, metrics, and
//! layers. Each rule appends at most one recommendation (one per qualifying
//! flaw for the first rule); the closing SOLID recommendation is always
//! last. Duplicates are never merged.

use super::layers::Layer;
use super::{ArchitectureMetrics, DesignFlaw, Priority, Recommendation, Severity};

/// Derive prioritized improvement recommendations
pub fn generate(
    flaws: &[DesignFlaw],
    metrics: &ArchitectureMetrics,
    _layer_structure: &[Layer],
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    for flaw in flaws
        .iter()
        .filter(|f| f.severity == Severity::Critical || f.severity == Severity::High)
    {
        recommendations.push(Recommendation {
            category: "Critical Fix".to_string(),
            priority: Priority::High,
            title: format!("Fix {}", flaw.kind),
            description: flaw.description.clone(),
            benefits: vec![
                "Improved stability".to_string(),
                "Reduced technical debt".to_string(),
            ],
            implementation: flaw.suggestion.clone(),
        });
    }

    if metrics.maintainability < 5.0 {
        recommendations.push(Recommendation {
            category: "Maintainability".to_string(),
            priority: Priority::High,
            title: "Improve Code Maintainability".to_string(),
            description: "Current maintainability score is low".to_string(),
            benefits: vec![
                "Easier to modify".to_string(),
                "Faster development".to_string(),
                "Reduced bugs".to_string(),
            ],
            implementation: "Refactor large files, add documentation, improve naming".to_string(),
        });
    }

    if metrics.coupling > 7.0 {
        recommendations.push(Recommendation {
            category: "Architecture".to_string(),
            priority: Priority::Medium,
            title: "Reduce Module Coupling".to_string(),
            description: "Modules are too tightly coupled".to_string(),
            benefits: vec![
                "Better testability".to_string(),
                "Easier to change".to_string(),
                "More reusable code".to_string(),
            ],
            implementation:
                "Apply dependency injection, use interfaces, implement facade pattern".to_string(),
        });
    }

    if metrics.modularity < 5.0 {
        recommendations.push(Recommendation {
            category: "Structure".to_string(),
            priority: Priority::Medium,
            title: "Enhance Modular Structure".to_string(),
            description: "Project lacks clear modular organization".to_string(),
            benefits: vec![
                "Better organization".to_string(),
                "Easier navigation".to_string(),
                "Clear boundaries".to_string(),
            ],
            implementation:
                "Organize into feature modules or domain-driven design structure".to_string(),
        });
    }

    if metrics.testability < 6.0 {
        recommendations.push(Recommendation {
            category: "Testing".to_string(),
            priority: Priority::Medium,
            title: "Improve Testability".to_string(),
            description: "Architecture makes testing difficult".to_string(),
            benefits: vec![
                "Higher test coverage".to_string(),
                "Faster feedback".to_string(),
                "More confidence".to_string(),
            ],
            implementation:
                "Use dependency injection, create test doubles, separate concerns".to_string(),
        });
    }

    recommendations.push(Recommendation {
        category: "Best Practices".to_string(),
        priority: Priority::Low,
        title: "Apply SOLID Principles".to_string(),
        description: "Ensure code follows SOLID design principles".to_string(),
        benefits: vec![
            "Better design".to_string(),
            "More flexible".to_string(),
            "Easier to extend".to_string(),
        ],
        implementation: "Review each principle: Single Responsibility, Open/Closed, \
                         Liskov Substitution, Interface Segregation, Dependency Inversion"
            .to_string(),
    });

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_metrics() -> ArchitectureMetrics {
        ArchitectureMetrics {
            complexity: 1.0,
            maintainability: 8.0,
            modularity: 8.0,
            coupling: 1.0,
            cohesion: 5.0,
            testability: 8.5,
        }
    }

    fn flaw(kind: &str, severity: Severity) -> DesignFlaw {
        DesignFlaw {
            kind: kind.to_string(),
            severity,
            location: "here".to_string(),
            description: format!("{} found", kind),
            impact: "bad".to_string(),
            suggestion: "fix it".to_string(),
        }
    }

    #[test]
    fn test_solid_recommendation_always_last() {
        let recs = generate(&[], &healthy_metrics(), &[]);

        assert_eq!(recs.len(), 1);
        let last = recs.last().unwrap();
        assert_eq!(last.title, "Apply SOLID Principles");
        assert_eq!(last.priority, Priority::Low);
    }

    #[test]
    fn test_one_critical_fix_per_severe_flaw() {
        let flaws = vec![
            flaw("Circular Dependency", Severity::High),
            flaw("God Object", Severity::Medium),
            flaw("Missing Error Handling", Severity::Critical),
        ];
        let recs = generate(&flaws, &healthy_metrics(), &[]);

        let critical: Vec<_> = recs.iter().filter(|r| r.category == "Critical Fix").collect();
        assert_eq!(critical.len(), 2);
        assert_eq!(critical[0].title, "Fix Circular Dependency");
        assert_eq!(critical[1].title, "Fix Missing Error Handling");
    }

    #[test]
    fn test_metric_thresholds_fire_independently() {
        let metrics = ArchitectureMetrics {
            complexity: 9.0,
            maintainability: 4.0,
            modularity: 3.0,
            coupling: 8.0,
            cohesion: 2.0,
            testability: 2.5,
        };
        let recs = generate(&[], &metrics, &[]);

        let titles: Vec<_> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Improve Code Maintainability",
                "Reduce Module Coupling",
                "Enhance Modular Structure",
                "Improve Testability",
                "Apply SOLID Principles",
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Values exactly at the threshold do not fire.
        let metrics = ArchitectureMetrics {
            complexity: 0.0,
            maintainability: 5.0,
            modularity: 5.0,
            coupling: 7.0,
            cohesion: 0.0,
            testability: 6.0,
        };
        let recs = generate(&[], &metrics, &[]);

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].title, "Apply SOLID Principles");
    }
}
