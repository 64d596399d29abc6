//! Gemini provider implementation using the `generateContent` endpoint.
//!
//! One non-streaming POST per generation. The credential travels as the
//! `key` query parameter, and only `candidates[0].content.parts[0].text`
//! is read back.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::inference::{
    CompletionProvider, CompletionRequest, ProviderError, REMOTE_FALLBACK_MESSAGE,
};

// ============================================================================
// Gemini generateContent Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

/// The request body for `models/{model}:generateContent`
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

/// Response body. Success and error payloads share one shape; every field
/// is optional so a partial body still parses and is judged afterwards.
#[derive(Deserialize, Debug, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    #[serde(default)]
    message: Option<String>,
}

// ============================================================================
// Translation Layer
// ============================================================================

fn build_request<'a>(request: &CompletionRequest<'a>) -> GenerateRequest<'a> {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: request.prompt,
            }],
        }],
        generation_config: GenerationConfig {
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
        },
    }
}

/// Interprets a response body. The `error` payload wins over candidates,
/// regardless of HTTP status.
fn interpret_body(status: u16, body: &str) -> Result<String, ProviderError> {
    let parsed: GenerateResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::Transport(format!(
            "unreadable response from AI (HTTP {status}): {e}"
        ))
    })?;

    if let Some(error) = parsed.error {
        let message = error
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| REMOTE_FALLBACK_MESSAGE.to_string());
        return Err(ProviderError::Remote(message));
    }

    parsed
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or(ProviderError::EmptyResponse)
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini text-generation provider
pub struct GeminiProvider {
    base_url: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    ///
    /// # Arguments
    /// * `base_url` - Optional custom base URL (defaults to the public v1beta API)
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url
                .unwrap_or_else(|| crate::core::config::DEFAULT_GEMINI_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = build_request(&request);
        let json_body = serde_json::to_string(&body)
            .map_err(|e| ProviderError::Transport(format!("Request serialization failed: {e}")))?;

        info!(
            "Gemini generateContent request: model={}, prompt_len={}, temperature={}, max_output_tokens={}",
            request.model,
            request.prompt.len(),
            request.temperature,
            request.max_output_tokens,
        );

        let response = self
            .client
            .post(self.endpoint(request.model))
            .query(&[("key", request.api_key)])
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        debug!("Gemini response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        debug!("Gemini response body: {} bytes", text.len());

        let result = interpret_body(status, &text);
        match &result {
            Ok(generated) => info!("Generation complete: {} bytes", generated.len()),
            Err(e) => warn!("Gemini call failed (HTTP {}): {}", status, e),
        }
        result
    }
}
