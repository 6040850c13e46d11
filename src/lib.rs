//! Crew - a multi-agent code-assistance platform
//!
//! A file set goes in; structured findings come out. The deterministic
//! static-analysis core (imports, dependency graph, cycles, layers, flaws,
//! metrics) never touches the network; agents that consult the hosted model
//! degrade to that core when the model is unavailable.

pub mod agents;
pub mod analysis;
pub mod commands;
pub mod config;
pub mod console;
pub mod constants;
pub mod plugins;
pub mod project;
pub mod report;
pub mod utils;

pub type Result<T> = anyhow::Result<T>;

// Re-export commonly used types
pub use agents::{AgentKind, AgentRequest, AgentResponse, Orchestrator};
pub use analysis::{ArchitectureAnalysis, ArchitectureAnalyzer};
pub use config::Config;
pub use plugins::{PluginContext, is_debug_mode, load_plugin_context};
pub use project::ProjectFile;

/// Helper function for plugins to load the default config
pub fn load_default_config() -> anyhow::Result<Config> {
    Config::load_or_default(constants::config::DEFAULT_CONFIG_FILE)
}
