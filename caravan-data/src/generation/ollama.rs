//! Wire types for the Ollama `generate` endpoint.
//!
//! Only the non-streaming form is used: the request sets `stream` to
//! `false` and the service answers with a single JSON object whose
//! `response` field carries the full completion.
//!
//! See: <https://github.com/ollama/ollama/blob/main/docs/api.md#generate-a-completion>

use serde::{Deserialize, Serialize};

/// Body posted to `{base_url}/generate`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    /// Model tag, for example `llama3.2:1b`.
    pub model: &'a str,
    /// Prompt text.
    pub prompt: &'a str,
    /// Always `false`; streamed chunks are not consumed.
    pub stream: bool,
}

impl<'a> GenerateRequest<'a> {
    /// Build a non-streaming request.
    pub const fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
        }
    }
}

/// Successful or failed answer from the `generate` endpoint.
///
/// Ollama reports failures as `{"error": "..."}`, so both fields are
/// optional and callers decide which one applies.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    /// Generated text.
    #[serde(default)]
    pub response: Option<String>,
    /// Error description when the service rejected the request.
    #[serde(default)]
    pub error: Option<String>,
}
