//! Hosted-model client library
//!
//! This library isolates every interaction with the hosted large-language
//! model behind one trait with a single method, so the rest of the platform
//! can be tested with local doubles and degrades cleanly when the service
//! misbehaves.
//!
//! ## Modules
//!
//! - [`client`]: HTTP client for the hosted Messages API
//! - [`util`]: Response post-processing helpers (JSON extraction, timeouts)

mod client;
mod util;

// Re-export public API
pub use client::LlmClient;
pub use util::{enrich, extract_json_object};

use anyhow::Result;
use async_trait::async_trait;

/// The one contract the platform has with the hosted model
///
/// Implementations may take seconds, fail outright, or return text that is
/// not valid structured data. Callers are expected to go through
/// [`enrich`], which applies the platform-wide timeout and downgrades every
/// failure to `None`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_text(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String>;
}
