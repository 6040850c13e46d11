//! Hosted Messages API client

use crate::TextGenerator;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Client for an Anthropic-style Messages API
///
/// Credentials come from the `CREW_LLM_API_KEY` environment variable; the
/// endpoint can be redirected with `CREW_LLM_BASE_URL` for proxies and
/// test servers.
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesPayload<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl LlmClient {
    /// Create a client with explicit settings
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        let base_url =
            env::var("CREW_LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
            max_tokens,
        }
    }

    /// Create a client from the environment
    ///
    /// # Errors
    /// Fails when `CREW_LLM_API_KEY` is not set.
    pub fn from_env(model: String, max_tokens: u32) -> Result<Self> {
        let api_key =
            env::var("CREW_LLM_API_KEY").context("CREW_LLM_API_KEY environment variable not set")?;
        Ok(Self::new(api_key, model, max_tokens))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate_text(&self, prompt: &str, system_prompt: Option<&str>) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);

        let payload = MessagesPayload {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            system: system_prompt,
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload)
            .send()
            .await
            .context("Failed to reach the model service")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Model request failed ({} {}): {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                error_text
            ));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .context("Failed to parse model response")?;

        Ok(body
            .content
            .first()
            .map(|block| block.text.clone())
            .unwrap_or_default())
    }
}
