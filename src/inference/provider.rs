use std::fmt;

use async_trait::async_trait;

/// Message used when the endpoint answers without usable candidate text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "Empty response from AI. Please try again.";

/// Fallback when the endpoint's error payload carries no message.
pub const REMOTE_FALLBACK_MESSAGE: &str = "API Connection Failed";

/// Errors that can occur during a completion call.
///
/// The `Display` output is the user-facing reason, without any prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The request could not complete (DNS, connection refused, unreadable body).
    Transport(String),
    /// The endpoint answered with a structured `error` payload.
    Remote(String),
    /// The endpoint answered successfully but with no candidate text.
    EmptyResponse,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Transport(msg) => write!(f, "{msg}"),
            ProviderError::Remote(msg) => write!(f, "{msg}"),
            ProviderError::EmptyResponse => write!(f, "{EMPTY_RESPONSE_MESSAGE}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// Everything a provider needs to fulfill one generation call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub model: &'a str,
    pub api_key: &'a str,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Sends one request and returns the generated text verbatim.
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError>;
}
