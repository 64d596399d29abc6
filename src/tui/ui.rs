//! Screen layout. Composes the components each frame.
//!
//! ```text
//! ┌ title bar ─────────────────────────────────────────────┐
//! │ ╭ Agent Configuration ╮ ╭ system_prompt.md ─── COPY ╮ │
//! │ │                     │ │                           │ │
//! │ ╰─────────────────────╯ │                           │ │
//! │ ╭ GENERATE ...        ╮ │                           │ │
//! │ ╰─────────────────────╯ ╰───────────────────────────╯ │
//! └ key hints ─────────────────────────────────────────────┘
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{GenerateButton, NoticePopup, OutputPanel, TitleBar};

const BUTTON_HEIGHT: u16 = 3;
const KEY_HINTS: &str =
    "Enter generate · Ctrl+J newline · Ctrl+Y copy · PgUp/PgDn scroll · Esc dismiss · Ctrl+C quit";

/// Areas of the main layout, exposed for tests.
pub struct ScreenAreas {
    pub title: Rect,
    pub input: Rect,
    pub button: Rect,
    pub output: Rect,
    pub hints: Rect,
}

pub fn layout(area: Rect) -> ScreenAreas {
    use Constraint::{Length, Min, Ratio};

    let [title, main, hints] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(area);
    let [left, output] = Layout::horizontal([Ratio(1, 3), Ratio(2, 3)])
        .spacing(1)
        .areas(main);
    let [input, button] = Layout::vertical([Min(3), Length(BUTTON_HEIGHT)]).areas(left);

    ScreenAreas {
        title,
        input,
        button,
        output,
        hints,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let areas = layout(frame.area());

    TitleBar::new(app.model_name.clone(), app.status_message.clone())
        .render(frame, areas.title);

    tui.input_box.focused = app.notice.is_none();
    tui.input_box.render(frame, areas.input);

    GenerateButton::new(app.in_flight, app.can_generate(), tui.pulse_value)
        .render(frame, areas.button);

    OutputPanel::new(&app.refined_output, app.copy_acknowledged, &mut tui.output_panel)
        .render(frame, areas.output);

    frame.render_widget(
        Line::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
        areas.hints,
    );

    if let Some(notice) = &app.notice {
        NoticePopup::new(notice).render(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{test_app, test_app_without_key};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_layout_splits_one_third_two_thirds() {
        let areas = layout(Rect::new(0, 0, 121, 30));
        assert_eq!(areas.title.height, 1);
        assert_eq!(areas.hints.height, 1);
        assert_eq!(areas.button.height, BUTTON_HEIGHT);
        assert!(areas.output.width > areas.input.width);
        assert_eq!(areas.input.width, areas.button.width);
    }

    #[test]
    fn test_initial_screen() {
        let text = draw(&test_app());
        assert!(text.contains("PromptForge"));
        assert!(text.contains("Agent Configuration"));
        assert!(text.contains("GENERATE SECURE PROMPT"));
        assert!(text.contains("Awaiting Input"));
        assert!(!text.contains("COPY ^Y"));
    }

    #[test]
    fn test_loading_screen() {
        let mut app = test_app();
        update(&mut app, Action::EditInput("Chef".to_string()));
        update(&mut app, Action::Generate);
        let text = draw(&app);
        assert!(text.contains("ANALYZING..."));
        assert!(text.contains("Awaiting Input"));
    }

    #[test]
    fn test_result_screen() {
        let mut app = test_app();
        update(&mut app, Action::EditInput("Chef".to_string()));
        update(&mut app, Action::Generate);
        update(&mut app, Action::GenerationFinished(Ok("# SYSTEM PROMPT".to_string())));
        let text = draw(&app);
        assert!(text.contains("# SYSTEM PROMPT"));
        assert!(text.contains("COPY ^Y"));
    }

    #[test]
    fn test_notice_overlay() {
        let mut app = test_app_without_key();
        update(&mut app, Action::EditInput("Chef".to_string()));
        update(&mut app, Action::Generate);
        let text = draw(&app);
        assert!(text.contains("Configuration"));
        assert!(text.contains("API key missing"));
    }
}
