//! Configuration loading and validation behavior

mod support;

use crew::Config;
use support::Workspace;

#[test]
fn test_missing_config_falls_back_to_defaults() {
    let workspace = Workspace::new();
    let missing = workspace.path().join("absent.yaml");

    let config = Config::load_or_default(&missing.to_string_lossy()).unwrap();
    assert!(config.llm.enabled);
    assert_eq!(config.llm.timeout_secs, 30);
    assert!(config.project.include.is_empty());
}

#[test]
fn test_full_config_parses() {
    let workspace = Workspace::new();
    workspace.write_config(
        r#"---
project:
  name: shop-backend
  include:
    - "src/**/*.ts"
  exclude:
    - "**/*.spec.ts"
llm:
  enabled: false
  model: claude-3-5-sonnet-20240620
  max_tokens: 2048
  timeout_secs: 15
storage:
  projects_dir: /tmp/crew-projects
"#,
    );

    let config = Config::load(&workspace.config_path.to_string_lossy()).unwrap();
    assert_eq!(config.project.name.as_deref(), Some("shop-backend"));
    assert_eq!(config.project.include, vec!["src/**/*.ts"]);
    assert!(!config.llm.enabled);
    assert_eq!(config.llm.max_tokens, 2048);
    assert_eq!(config.llm.timeout_secs, 15);
    assert_eq!(config.storage.projects_dir, "/tmp/crew-projects");
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let workspace = Workspace::new();
    workspace.write_config("project: [unclosed");

    assert!(Config::load(&workspace.config_path.to_string_lossy()).is_err());
}

#[test]
fn test_present_but_invalid_config_does_not_default() {
    let workspace = Workspace::new();
    workspace.write_config("llm:\n  max_tokens: 0\n");

    // load_or_default only defaults on absence, not invalidity.
    assert!(Config::load_or_default(&workspace.config_path.to_string_lossy()).is_err());
}

#[test]
fn test_validation_error_names_offending_pattern() {
    let workspace = Workspace::new();
    workspace.write_config("project:\n  include:\n    - 'a[bad'\n");

    let error = Config::load(&workspace.config_path.to_string_lossy()).unwrap_err();
    assert!(error.to_string().contains("a[bad"));
}
