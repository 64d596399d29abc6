//! Background work requested by `Effect`s.
//!
//! Each task reports back by sending an `Action` on the event loop's
//! channel; none of them touch `App` directly.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::core::action::{Action, GenerationJob};
use crate::inference::CompletionProvider;

/// How long the "Copied" badge stays up after the latest copy.
pub const COPY_ACK_DURATION: Duration = Duration::from_millis(2000);

/// Runs one provider call and sends `GenerationFinished` with its result.
///
/// The returned handle can abort the call; the event loop only does so on exit.
pub fn spawn_generation(
    provider: Arc<dyn CompletionProvider>,
    job: GenerationJob,
    tx: UnboundedSender<Action>,
) -> AbortHandle {
    info!(
        "Spawning generation request via {} (model={})",
        provider.name(),
        job.model
    );
    let handle = tokio::spawn(async move {
        let result = provider.complete(job.request()).await;
        if tx.send(Action::GenerationFinished(result)).is_err() {
            warn!("Failed to send generation result: receiver dropped");
        }
    });
    handle.abort_handle()
}

/// Sends `CopyAckExpired(epoch)` once `COPY_ACK_DURATION` has passed.
pub fn spawn_copy_reset(epoch: u64, tx: UnboundedSender<Action>) -> AbortHandle {
    let handle = tokio::spawn(async move {
        tokio::time::sleep(COPY_ACK_DURATION).await;
        if tx.send(Action::CopyAckExpired(epoch)).is_err() {
            warn!("Failed to send copy reset: receiver dropped");
        }
    });
    handle.abort_handle()
}

/// Lazily opened system clipboard.
///
/// The handle is kept for the life of the app: on X11/Wayland the copied
/// text is served by the owning process and disappears with the handle.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: &str) -> Result<(), String> {
        if self.inner.is_none() {
            self.inner = Some(arboard::Clipboard::new().map_err(|e| e.to_string())?);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard.set_text(text.to_owned()).map_err(|e| e.to_string()),
            None => Err("clipboard unavailable".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Effect, update};
    use crate::core::template;
    use crate::inference::ProviderError;
    use crate::test_support::{ScriptedProvider, test_app, test_app_with};
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::Instant;

    fn start_generation(app: &mut crate::core::state::App, input: &str) -> GenerationJob {
        update(app, Action::EditInput(input.to_string()));
        match update(app, Action::Generate) {
            Effect::SpawnRequest(job) => job,
            other => panic!("expected SpawnRequest, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_successful_cycle_stores_output() {
        let provider = Arc::new(ScriptedProvider::ok("X"));
        let mut app = test_app_with(provider.clone());
        let (tx, mut rx) = unbounded_channel();

        let job = start_generation(&mut app, "Chef");
        spawn_generation(app.provider.clone(), job, tx);

        let action = rx.recv().await.unwrap();
        update(&mut app, action);

        assert_eq!(app.refined_output, "X");
        assert!(!app.in_flight);
        assert_eq!(provider.last_prompt(), Some(template::compose("Chef")));
    }

    #[tokio::test]
    async fn test_generate_while_in_flight_issues_single_call() {
        let provider = Arc::new(ScriptedProvider::ok("X"));
        let mut app = test_app_with(provider.clone());
        let (tx, mut rx) = unbounded_channel();

        let job = start_generation(&mut app, "Chef");
        spawn_generation(app.provider.clone(), job, tx.clone());

        // Second trigger before the first resolves
        assert_eq!(update(&mut app, Action::Generate), Effect::None);

        let action = rx.recv().await.unwrap();
        update(&mut app, action);
        assert_eq!(provider.calls(), 1);
        assert!(!app.in_flight);
    }

    #[tokio::test]
    async fn test_failed_cycle_notifies() {
        let provider = Arc::new(ScriptedProvider::failing(ProviderError::Remote(
            "rate limited".to_string(),
        )));
        let mut app = test_app_with(provider);
        let (tx, mut rx) = unbounded_channel();

        let job = start_generation(&mut app, "Chef");
        spawn_generation(app.provider.clone(), job, tx);
        let action = rx.recv().await.unwrap();
        update(&mut app, action);

        assert!(app.refined_output.is_empty());
        assert!(!app.in_flight);
        assert!(app.notice.unwrap().message.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_aborted_generation_sends_nothing() {
        let provider = Arc::new(ScriptedProvider::ok("X"));
        let mut app = test_app_with(provider);
        let (tx, mut rx) = unbounded_channel();

        let job = start_generation(&mut app, "Chef");
        let handle = spawn_generation(app.provider.clone(), job, tx);
        handle.abort();

        // The task held the only sender, so the channel closes once it is gone
        assert_eq!(rx.recv().await, None);
    }

    fn copy(app: &mut crate::core::state::App, tx: &UnboundedSender<Action>) {
        match update(app, Action::Copy) {
            Effect::CopyToClipboard { epoch, .. } => {
                spawn_copy_reset(epoch, tx.clone());
            }
            other => panic!("expected CopyToClipboard, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_ack_resets_after_two_seconds() {
        let mut app = test_app();
        app.refined_output = "prompt".to_string();
        let (tx, mut rx) = unbounded_channel();
        let start = Instant::now();

        copy(&mut app, &tx);
        assert!(app.copy_acknowledged);

        let action = rx.recv().await.unwrap();
        assert!(start.elapsed() >= COPY_ACK_DURATION);
        update(&mut app, action);
        assert!(!app.copy_acknowledged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_window() {
        let mut app = test_app();
        app.refined_output = "prompt".to_string();
        let (tx, mut rx) = unbounded_channel();
        let start = Instant::now();

        copy(&mut app, &tx);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        copy(&mut app, &tx);

        // First timer fires at 2s but belongs to a superseded copy
        let first = rx.recv().await.unwrap();
        assert_eq!(first, Action::CopyAckExpired(1));
        update(&mut app, first);
        assert!(app.copy_acknowledged);

        // Second timer fires 2s after the second copy
        let second = rx.recv().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(3000));
        update(&mut app, second);
        assert!(!app.copy_acknowledged);
    }
}
