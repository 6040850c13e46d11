//! End-to-end smoke tests through the compiled binary
//!
//! These shell out to `cargo run` the way a user would invoke the CLI, so
//! they are serialized and kept to a handful of scenarios.

mod support;

use serial_test::serial;
use std::process::Command;
use support::Workspace;

fn run_crew(args: &[&str]) -> (i32, String, String) {
    let current_dir = std::env::current_dir().expect("Failed to get current directory");
    let output = Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .current_dir(&current_dir)
        .output()
        .expect("Failed to run crew binary");

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
#[serial]
fn test_no_command_is_an_error() {
    let (status, _stdout, stderr) = run_crew(&[]);
    assert_ne!(status, 0);
    assert!(stderr.contains("No command provided"));
}

#[test]
#[serial]
fn test_analyze_json_reports_cycle() {
    let workspace = Workspace::new();
    workspace.write_file("a.ts", "import {x} from './b'");
    workspace.write_file("b.ts", "import {y} from './a'");

    let (status, stdout, _stderr) = run_crew(&[
        "analyze",
        &workspace.path().to_string_lossy(),
        "--no-ai",
        "--json",
    ]);

    assert_eq!(status, 0);
    let value: serde_json::Value =
        serde_json::from_str(&stdout).expect("analyze --json should emit valid JSON");
    assert_eq!(value["dependencies"]["nodes"].as_array().unwrap().len(), 2);
    assert!(!value["dependencies"]["cycles"].as_array().unwrap().is_empty());
    let flaws = value["designFlaws"].as_array().unwrap();
    assert!(flaws.iter().any(|f| f["type"] == "Circular Dependency"));
}

#[test]
#[serial]
fn test_debug_json_flags_var_usage() {
    let workspace = Workspace::new();
    let file = workspace.write_file("buggy.js", "var a = 1;\nconsole.log(a);\n");

    let (status, stdout, _stderr) = run_crew(&["debug", &file.to_string_lossy(), "--json"]);

    assert_eq!(status, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let issues = value["report"]["issues"].as_array().unwrap();
    assert!(!issues.is_empty());
}

#[test]
#[serial]
fn test_doc_json_lists_files() {
    let workspace = Workspace::new();
    workspace.write_file("api/users.js", "function listUsers() {}");

    let (status, stdout, _stderr) = run_crew(&[
        "doc",
        &workspace.path().to_string_lossy(),
        "--name",
        "sample",
        "--json",
    ]);

    assert_eq!(status, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["projectName"], "sample");
    assert!(value["structure"].as_str().unwrap().contains("api/users.js"));
}

#[test]
#[serial]
fn test_agents_lists_all_five() {
    let (status, stdout, _stderr) = run_crew(&["agents", "--json"]);

    assert_eq!(status, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 5);
}

#[test]
#[serial]
fn test_analyze_missing_path_fails() {
    let (status, _stdout, _stderr) =
        run_crew(&["analyze", "/path/that/does/not/exist/12345", "--no-ai", "--json"]);
    assert_ne!(status, 0);
}
