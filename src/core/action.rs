//! # Actions
//!
//! Everything that can happen in PromptForge becomes an `Action`.
//! User presses Enter? That's `Action::Generate`.
//! The endpoint answers? That's `Action::GenerationFinished(result)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing any I/O the caller must
//! perform. No side effects happen here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! One generation cycle:
//!
//! ```text
//! IDLE --Generate (key set, input non-empty)--> IN_FLIGHT
//! IN_FLIGHT --GenerationFinished(Ok)--> IDLE (output populated)
//! IN_FLIGHT --GenerationFinished(Err)--> IDLE (output empty, notice raised)
//! IDLE --Generate (empty input | no key)--> IDLE
//! ```

use log::{debug, error, info};

use crate::core::config::{GENERATION_MAX_OUTPUT_TOKENS, GENERATION_TEMPERATURE};
use crate::core::state::{App, Notice};
use crate::core::template;
use crate::inference::{CompletionRequest, ProviderError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The input text changed (carries the full new text).
    EditInput(String),
    /// Trigger one generation.
    Generate,
    /// The outstanding request resolved.
    GenerationFinished(Result<String, ProviderError>),
    /// Copy the current output to the clipboard.
    Copy,
    /// The acknowledgment timer started by copy number `epoch` elapsed.
    CopyAckExpired(u64),
    /// The clipboard write failed.
    ClipboardFailed(String),
    DismissNotice,
    Quit,
}

/// Everything needed to run one request off the event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationJob {
    pub prompt: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl GenerationJob {
    pub fn request(&self) -> CompletionRequest<'_> {
        CompletionRequest {
            prompt: &self.prompt,
            model: &self.model,
            api_key: &self.api_key,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
        }
    }
}

/// I/O requested by `update()`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    SpawnRequest(GenerationJob),
    CopyToClipboard { text: String, epoch: u64 },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::EditInput(text) => {
            app.raw_input = text;
            Effect::None
        }
        Action::Generate => generate(app),
        Action::GenerationFinished(result) => {
            app.in_flight = false;
            match result {
                Ok(text) => {
                    info!("Generation succeeded: {} bytes", text.len());
                    app.refined_output = text;
                    app.status_message = "Prompt ready".to_string();
                }
                Err(e) => {
                    error!("Generation failed: {:?}", e);
                    app.refined_output.clear();
                    app.notice = Some(Notice::generation_failed(&e));
                    app.status_message.clear();
                }
            }
            Effect::None
        }
        Action::Copy => {
            if !app.can_copy() {
                return Effect::None;
            }
            app.copy_acknowledged = true;
            app.copy_epoch += 1;
            Effect::CopyToClipboard {
                text: app.refined_output.clone(),
                epoch: app.copy_epoch,
            }
        }
        Action::CopyAckExpired(epoch) => {
            if epoch == app.copy_epoch {
                app.copy_acknowledged = false;
            } else {
                debug!("Ignoring stale copy timer (epoch {} < {})", epoch, app.copy_epoch);
            }
            Effect::None
        }
        Action::ClipboardFailed(reason) => {
            app.status_message = format!("Clipboard unavailable: {reason}");
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn generate(app: &mut App) -> Effect {
    if app.in_flight {
        debug!("Generate ignored: request already in flight");
        return Effect::None;
    }
    let Some(api_key) = app.api_key.clone() else {
        info!("Generate blocked: no API key configured");
        app.notice = Some(Notice::config_missing());
        return Effect::None;
    };
    if app.raw_input.is_empty() {
        return Effect::None;
    }

    app.in_flight = true;
    app.refined_output.clear();
    app.copy_acknowledged = false;
    app.notice = None;
    app.status_message = "Analyzing...".to_string();

    Effect::SpawnRequest(GenerationJob {
        prompt: template::compose(&app.raw_input),
        model: app.model_name.clone(),
        api_key,
        temperature: GENERATION_TEMPERATURE,
        max_output_tokens: GENERATION_MAX_OUTPUT_TOKENS,
    })
}
