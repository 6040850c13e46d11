//! Response post-processing helpers

use crate::TextGenerator;
use std::time::Duration;

/// Run a generation with the platform-wide timeout, degrading on failure
///
/// Every enrichment call in the platform goes through here: transport
/// errors, timeouts, and empty replies all collapse to `None`, which callers
/// translate into their documented deterministic fallback. The failure is
/// logged to stderr so degraded analyses remain diagnosable.
pub async fn enrich(
    generator: &dyn TextGenerator,
    prompt: &str,
    system_prompt: Option<&str>,
    timeout: Duration,
) -> Option<String> {
    match tokio::time::timeout(timeout, generator.generate_text(prompt, system_prompt)).await {
        Ok(Ok(text)) => Some(text),
        Ok(Err(error)) => {
            eprintln!("Model call failed: {error:#}");
            None
        }
        Err(_) => {
            eprintln!(
                "Model call timed out after {} seconds",
                timeout.as_secs()
            );
            None
        }
    }
}

/// Locate a JSON object inside free-form model output
///
/// The model frequently wraps JSON in prose or code fences; the substring
/// bounded by the first `{` and the last `}` is the best-effort candidate.
/// Returns `None` when no such span exists. The caller still has to parse
/// the result; this only trims the wrapping.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
