//! Configuration management module

pub mod loader;

pub use loader::{Config, LlmSettings, ProjectSettings, StorageSettings};
