//! # TitleBar Component
//!
//! Single-line navbar across the top of the screen.
//!
//! ```text
//! ▣ PromptForge  model: gemini-flash-latest | Analyzing...     SECURE PRECISION MODE
//! ```
//!
//! Stateless: every field is a prop copied from `App` each frame.
//! When the status message is empty the ` | status` segment is omitted.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub const APP_NAME: &str = "PromptForge";
pub const MODE_TAG: &str = "SECURE PRECISION MODE";

pub struct TitleBar {
    pub model_name: String,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(model_name: String, status_message: String) -> Self {
        Self {
            model_name,
            status_message,
        }
    }

    fn left_line(&self) -> Line<'_> {
        let mut spans = vec![
            Span::styled(
                "▣ ",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                APP_NAME,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  model: {}", self.model_name),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!(" | {}", self.status_message),
                Style::default().fg(Color::Gray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let tag_width = MODE_TAG.chars().count() as u16 + 3;
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(tag_width)]).areas(area);

        frame.render_widget(self.left_line(), left);
        frame.render_widget(
            Line::from(vec![
                Span::raw("⚿ "),
                Span::raw(MODE_TAG),
            ])
            .style(Style::default().fg(Color::DarkGray))
            .right_aligned(),
            right,
        );
    }
}
