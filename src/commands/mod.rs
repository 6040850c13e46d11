//! Command implementations for the CLI

pub mod agents;
pub mod analyze;
pub mod base;
pub mod debug;
pub mod doc;
pub mod projects;
pub mod review;

pub use agents::AgentsCommand;
pub use analyze::AnalyzeCommand;
pub use base::{Command, CommandContext};
pub use debug::DebugCommand;
pub use doc::DocCommand;
pub use projects::{DeleteProjectCommand, ListProjectsCommand, SaveProjectCommand};
pub use review::ReviewCommand;
pub use test::TestCommand;
