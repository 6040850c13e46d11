//! Saved-project persistence
//!
//! Projects saved from the editor are kept as one JSON document per project
//! under a storage directory. This is the only state that outlives a request;
//! analysis results are never persisted.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A persisted project record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedProject {
    pub id: String,
    pub name: String,
    pub code: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Directory-backed store for saved projects
pub struct ProjectStore {
    dir: PathBuf,
}

impl ProjectStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Save a new project, assigning it a fresh id
    pub fn save(&self, name: &str, code: &str, language: &str) -> Result<SavedProject> {
        if name.trim().is_empty() {
            anyhow::bail!("Project name cannot be empty");
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create project directory: {}", self.dir.display()))?;

        let now = Utc::now();
        let project = SavedProject {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            code: code.to_string(),
            language: language.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.write(&project)?;
        Ok(project)
    }

    /// Overwrite an existing project, bumping its update timestamp
    pub fn update(&self, id: &str, code: &str) -> Result<SavedProject> {
        let mut project = self
            .load(id)?
            .ok_or_else(|| anyhow::anyhow!("Project not found: {}", id))?;

        project.code = code.to_string();
        project.updated_at = Utc::now();
        self.write(&project)?;
        Ok(project)
    }

    /// Load a project by id, `None` if it does not exist
    pub fn load(&self, id: &str) -> Result<Option<SavedProject>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read project: {}", path.display()))?;
        let project = serde_json::from_str(&content)
            .with_context(|| format!("Corrupt project record: {}", path.display()))?;
        Ok(Some(project))
    }

    /// List all saved projects, most recently updated first
    pub fn list(&self) -> Result<Vec<SavedProject>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut projects = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            // A single unreadable record should not hide the rest.
            if let Ok(content) = fs::read_to_string(&path)
                && let Ok(project) = serde_json::from_str::<SavedProject>(&content)
            {
                projects.push(project);
            }
        }

        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(projects)
    }

    /// Delete a project by id; returns whether anything was removed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete project: {}", path.display()))?;
        Ok(true)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn write(&self, project: &SavedProject) -> Result<()> {
        let path = self.path_for(&project.id);
        let content = serde_json::to_string_pretty(project)?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write project: {}", path.display()))?;
        Ok(())
    }
}
