//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::state::App;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};

/// A provider that returns a fixed result and counts calls.
pub struct ScriptedProvider {
    result: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedProvider {
    pub fn ok(text: &str) -> Self {
        Self::with_result(Ok(text.to_string()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(result: Result<String, ProviderError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(request.prompt.to_string());
        }
        self.result.clone()
    }
}

/// Creates a test App with a key configured and a provider that answers "ok".
pub fn test_app() -> App {
    App::new(
        Arc::new(ScriptedProvider::ok("ok")),
        "test-model".to_string(),
        Some("test-key".to_string()),
    )
}

/// Creates a test App with no API key.
pub fn test_app_without_key() -> App {
    App::new(
        Arc::new(ScriptedProvider::ok("ok")),
        "test-model".to_string(),
        None,
    )
}

/// Creates a test App around the given provider.
pub fn test_app_with(provider: Arc<dyn CompletionProvider>) -> App {
    App::new(provider, "test-model".to_string(), Some("test-key".to_string()))
}
