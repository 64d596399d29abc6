pub mod provider;
pub mod providers;

pub use provider::{
    CompletionProvider, CompletionRequest, EMPTY_RESPONSE_MESSAGE, ProviderError,
    REMOTE_FALLBACK_MESSAGE,
};
pub use providers::GeminiProvider;
