//! # Application State
//!
//! Core business state for PromptForge. This module contains domain logic
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── provider: Arc<dyn CompletionProvider>  // network collaborator
//! ├── model_name: String                     // injected config
//! ├── api_key: Option<String>                // injected config
//! ├── raw_input: String                      // persona description
//! ├── refined_output: String                 // last generated prompt
//! ├── in_flight: bool                        // request outstanding
//! ├── copy_acknowledged: bool                // "Copied" badge visible
//! ├── copy_epoch: u64                        // latest copy, for timer matching
//! ├── notice: Option<Notice>                 // modal failure message
//! └── status_message: String                 // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::fmt;
use std::sync::Arc;

use crate::core::config::ResolvedConfig;
use crate::inference::{CompletionProvider, ProviderError};

/// A user-facing message shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Missing credential. Blocks the attempt entirely.
    Configuration,
    /// Any failure of a sent request.
    GenerationFailed,
}

impl Notice {
    pub fn config_missing() -> Self {
        Self {
            kind: NoticeKind::Configuration,
            message: "System Configuration Error: API key missing. \
                      Set GEMINI_API_KEY or [gemini] api_key in ~/.promptforge/config.toml."
                .to_string(),
        }
    }

    pub fn generation_failed(error: &ProviderError) -> Self {
        Self {
            kind: NoticeKind::GenerationFailed,
            message: format!("Generation failed: {error}"),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

pub struct App {
    pub provider: Arc<dyn CompletionProvider>,
    pub model_name: String,
    pub api_key: Option<String>,
    pub raw_input: String,
    pub refined_output: String,
    pub in_flight: bool,
    pub copy_acknowledged: bool,
    /// Bumped on every copy; a reset timer only applies if its epoch is current.
    pub copy_epoch: u64,
    pub notice: Option<Notice>,
    pub status_message: String,
}

impl App {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        model_name: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            provider,
            model_name,
            api_key,
            raw_input: String::new(),
            refined_output: String::new(),
            in_flight: false,
            copy_acknowledged: false,
            copy_epoch: 0,
            notice: None,
            status_message: String::new(),
        }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &ResolvedConfig) -> Self {
        Self::new(provider, config.model_name.clone(), config.api_key.clone())
    }

    /// Whether the generate control should accept a trigger right now.
    pub fn can_generate(&self) -> bool {
        !self.in_flight && !self.raw_input.is_empty()
    }

    /// Whether there is output to copy.
    pub fn can_copy(&self) -> bool {
        !self.refined_output.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.raw_input.is_empty());
        assert!(app.refined_output.is_empty());
        assert!(!app.in_flight);
        assert!(!app.copy_acknowledged);
        assert!(app.notice.is_none());
        assert_eq!(app.model_name, "test-model");
    }

    #[test]
    fn test_can_generate_needs_input_and_idle() {
        let mut app = test_app();
        assert!(!app.can_generate());

        app.raw_input = "Legal bot".to_string();
        assert!(app.can_generate());

        app.in_flight = true;
        assert!(!app.can_generate());
    }

    #[test]
    fn test_generation_failed_notice_prefix() {
        let notice = Notice::generation_failed(&ProviderError::Remote("rate limited".to_string()));
        assert_eq!(notice.kind, NoticeKind::GenerationFailed);
        assert_eq!(notice.to_string(), "Generation failed: rate limited");
    }
}
