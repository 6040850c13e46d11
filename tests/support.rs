//! Common test support utilities and fixtures
//!
//! This module provides shared functionality to reduce code duplication
//! across integration tests.

use anyhow::Result;
use async_trait::async_trait;
use crew::ProjectFile;
use crew_llm::TextGenerator;
use std::sync::Mutex;
use std::{fs, path::PathBuf};
use tempfile::TempDir;

/// A test workspace with a temporary directory and config management
pub struct Workspace {
    pub root: TempDir,
    pub config_path: PathBuf,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    /// Create a new temporary workspace
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory");
        let config_path = root.path().join("crew.yaml");
        Self { root, config_path }
    }

    /// Write configuration YAML to the workspace
    pub fn write_config(&self, yaml: &str) {
        fs::write(&self.config_path, yaml).expect("Failed to write config");
    }

    /// Write a source file relative to the workspace root
    pub fn write_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Get the workspace root path
    pub fn path(&self) -> &std::path::Path {
        self.root.path()
    }
}

/// Build a ProjectFile with the default test language
pub fn file(path: &str, content: &str) -> ProjectFile {
    ProjectFile::new(path, content, "javascript")
}

/// A two-file set whose members import each other
pub fn cyclic_pair() -> Vec<ProjectFile> {
    vec![
        file("a.ts", "import {x} from './b'"),
        file("b.ts", "import {y} from './a'"),
    ]
}

/// Text generator double that replays a canned response
pub struct CannedGenerator {
    response: String,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate_text(&self, prompt: &str, _system_prompt: Option<&str>) -> Result<String> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());
        Ok(self.response.clone())
    }
}

/// Text generator double that always fails
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate_text(&self, _prompt: &str, _system_prompt: Option<&str>) -> Result<String> {
        anyhow::bail!("simulated transport failure")
    }
}
