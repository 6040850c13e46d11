//! Central constants for the crew application

/// Default values for configuration
pub mod config {
    /// Default configuration file name
    pub const DEFAULT_CONFIG_FILE: &str = "crew.yaml";

    /// Default directory for saved projects
    pub const DEFAULT_PROJECTS_DIR: &str = ".crew/projects";
}

/// Thresholds used by the design-flaw scanner
///
/// These values are part of the analysis contract: changing them changes
/// which flaws a given project produces.
pub mod analysis {
    /// A file with more lines than this is reported as a god object
    pub const GOD_OBJECT_LINES: usize = 500;

    /// A module with more outgoing dependencies than this is reported
    /// as tightly coupled
    pub const MAX_FAN_OUT: usize = 10;

    /// Projects classified into fewer layers than this are reported as
    /// lacking separation of concerns
    pub const MIN_LAYERS: usize = 3;

    /// Number of leading lines of each file included in AI prompts
    pub const FILE_PREVIEW_LINES: usize = 100;
}

/// Default values for project-file loading
pub mod files {
    /// Files larger than this are skipped when loading a file set
    pub const MAX_FILE_BYTES: u64 = 1_048_576;

    /// Directory names never descended into when walking a project
    pub const SKIPPED_DIRS: &[&str] = ["node_modules", ".git", "target", "dist", "build"].as_slice();

    /// Language assumed for a synthesized single-file set
    pub const DEFAULT_LANGUAGE: &str = "javascript";
}

/// Default values for the hosted-model boundary
pub mod llm {
    /// Ceiling applied to every model call before degrading to
    /// deterministic output
    pub const TIMEOUT_SECS: u64 = 30;

    /// Default model identifier
    pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20240620";

    /// Default token budget per generation
    pub const DEFAULT_MAX_TOKENS: u32 = 4096;
}
