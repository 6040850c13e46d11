//! Project file sets and persistence
//!
//! A file set is the unit of analysis: an ordered list of source files with
//! their contents. File order is significant: the dependency graph records
//! nodes in file-set order, and import resolution returns the first match in
//! that order.

pub mod loader;
pub mod storage;

pub use loader::{load_file_set, single_file_set};
pub use storage::{ProjectStore, SavedProject};

use serde::{Deserialize, Serialize};

/// One source file submitted for analysis
///
/// Immutable for the duration of an analysis request; the path is the unique
/// key within a file set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub path: String,
    pub content: String,
    pub language: String,
}

impl ProjectFile {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            language: language.into(),
        }
    }
}
