//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard events into `core::Action` values and carries out
//! the `Effect`s that `update()` returns.
//!
//! This is the only module that knows about ratatui, crossterm and the
//! system clipboard.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (request in flight): draws every ~80ms so the button pulses.
//! - **Idle**: sleeps up to 500ms, only redraws on events, resizes or
//!   background actions (request results, copy timers).
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod tasks;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::inference::{CompletionProvider, GeminiProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, OutputPanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::tasks::SystemClipboard;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub input_box: InputBox,
    pub output_panel: OutputPanelState,
    // Animation state
    pub pulse_value: f32,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: InputBox::new(),
            output_panel: OutputPanelState::new(),
            pulse_value: 0.0,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is enabled unconditionally (Shift+Enter detection);
        // terminals without support ignore it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the Gemini provider from a resolved config.
///
/// The credential is not baked in: it travels with each request, so a
/// missing key is reported by the controller instead of failing here.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn CompletionProvider> {
    Arc::new(GeminiProvider::new(Some(config.gemini_base_url.clone())))
}

/// Map one terminal event to an action, updating presentation state on the way.
///
/// While a notice is shown it is modal: only Esc/Enter (dismiss) and
/// Ctrl+C get through.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::Resize => None,
        TuiEvent::ForceQuit => Some(Action::Quit),
        _ if app.notice.is_some() => {
            matches!(event, TuiEvent::Escape | TuiEvent::Submit).then_some(Action::DismissNotice)
        }
        TuiEvent::Copy => Some(Action::Copy),
        TuiEvent::Escape => None,
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            tui.output_panel.handle_event(event);
            None
        }
        _ => match tui.input_box.handle_event(event)? {
            InputEvent::ContentChanged => Some(Action::EditInput(tui.input_box.buffer.clone())),
            // Mirrors the disabled button: nothing happens while loading or empty
            InputEvent::Submit => app.can_generate().then_some(Action::Generate),
            InputEvent::CursorMoved => None,
        },
    }
}

/// Side-effect runner owned by the event loop.
struct EffectRunner {
    tx: UnboundedSender<Action>,
    clipboard: SystemClipboard,
    active_request: Option<AbortHandle>,
}

impl EffectRunner {
    /// Applies an action and runs its effect. Returns `true` when the app should quit.
    fn dispatch(&mut self, app: &mut App, tui: &mut TuiState, action: Action) -> bool {
        match update(app, action) {
            Effect::None => false,
            Effect::Quit => true,
            Effect::SpawnRequest(job) => {
                tui.output_panel.scroll_to_top();
                self.active_request = Some(tasks::spawn_generation(
                    app.provider.clone(),
                    job,
                    self.tx.clone(),
                ));
                false
            }
            Effect::CopyToClipboard { text, epoch } => {
                if let Err(reason) = self.clipboard.set_text(&text) {
                    warn!("Clipboard write failed: {}", reason);
                    update(app, Action::ClipboardFailed(reason));
                } else {
                    debug!("Copied {} bytes to clipboard", text.len());
                }
                tasks::spawn_copy_reset(epoch, self.tx.clone());
                false
            }
        }
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runner = EffectRunner {
        tx,
        clipboard: SystemClipboard::new(),
        active_request: None,
    };

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        if app.in_flight {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if app.in_flight {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain all pending events before the next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&app, &mut tui, &event)
                && runner.dispatch(&mut app, &mut tui, action)
            {
                break 'main;
            }
        }

        // Results from background tasks (request outcomes, copy timers)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if runner.dispatch(&mut app, &mut tui, action) {
                break 'main;
            }
        }
    }

    if let Some(handle) = runner.active_request.take() {
        handle.abort();
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::NoticeKind;
    use crate::test_support::{test_app, test_app_without_key};

    fn type_text(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            if let Some(action) = route_event(app, tui, &TuiEvent::InputChar(c)) {
                update(app, action);
            }
        }
    }

    #[test]
    fn test_typing_mirrors_buffer_into_app() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Chef");
        assert_eq!(app.raw_input, "Chef");
    }

    #[test]
    fn test_enter_with_empty_input_does_nothing() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::Submit), None);
    }

    #[test]
    fn test_enter_with_input_generates() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Chef");
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::Generate)
        );
    }

    #[test]
    fn test_enter_without_key_raises_config_notice() {
        let mut app = test_app_without_key();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Chef");
        let action = route_event(&app, &mut tui, &TuiEvent::Submit).unwrap();
        assert_eq!(update(&mut app, action), Effect::None);
        assert_eq!(app.notice.unwrap().kind, NoticeKind::Configuration);
    }

    #[test]
    fn test_notice_is_modal() {
        let mut app = test_app_without_key();
        let mut tui = TuiState::new();
        type_text(&mut app, &mut tui, "Chef");
        update(&mut app, Action::Generate);
        assert!(app.notice.is_some());

        // Typing is swallowed while the notice is up
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar('x')), None);
        assert_eq!(tui.input_box.buffer, "Chef");

        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Escape),
            Some(Action::DismissNotice)
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::ForceQuit),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_copy_key_maps_to_copy_action() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Copy),
            Some(Action::Copy)
        );
    }

    #[test]
    fn test_scroll_events_stay_in_presentation_layer() {
        let app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::ScrollDown), None);
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::Resize), None);
    }

    #[tokio::test]
    async fn test_dispatch_generate_spawns_request() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut runner = EffectRunner {
            tx,
            clipboard: SystemClipboard::new(),
            active_request: None,
        };

        update(&mut app, Action::EditInput("Chef".to_string()));
        assert!(!runner.dispatch(&mut app, &mut tui, Action::Generate));
        assert!(app.in_flight);
        assert!(runner.active_request.is_some());

        let action = rx.recv().await.unwrap();
        assert!(matches!(action, Action::GenerationFinished(Ok(_))));
        runner.dispatch(&mut app, &mut tui, action);
        assert!(!app.in_flight);
    }

    #[test]
    fn test_dispatch_quit() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut runner = EffectRunner {
            tx,
            clipboard: SystemClipboard::new(),
            active_request: None,
        };
        assert!(runner.dispatch(&mut app, &mut tui, Action::Quit));
    }
}
