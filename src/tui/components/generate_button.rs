//! # GenerateButton Component
//!
//! The trigger control under the input panel. Purely presentational: the
//! event loop decides whether Enter actually dispatches `Action::Generate`.
//!
//! | State    | Label                       | Style               |
//! |----------|-----------------------------|---------------------|
//! | ready    | `GENERATE SECURE PROMPT →`  | black on white      |
//! | loading  | `ANALYZING...` (pulsing)    | gray on dark gray   |
//! | disabled | `GENERATE SECURE PROMPT →`  | dim, dark gray      |

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

pub const READY_LABEL: &str = "GENERATE SECURE PROMPT →";
pub const LOADING_LABEL: &str = "ANALYZING...";

/// Pulse intensity above which the loading label turns bold.
const PULSE_BOLD_THRESHOLD: f32 = 0.5;

pub struct GenerateButton {
    pub loading: bool,
    pub enabled: bool,
    /// 0.0..=1.0, drives the loading animation
    pub pulse: f32,
}

impl GenerateButton {
    pub fn new(loading: bool, enabled: bool, pulse: f32) -> Self {
        Self {
            loading,
            enabled,
            pulse,
        }
    }

    fn label(&self) -> &'static str {
        if self.loading { LOADING_LABEL } else { READY_LABEL }
    }

    fn style(&self) -> Style {
        if self.loading {
            let style = Style::default().fg(Color::Gray).bg(Color::DarkGray);
            if self.pulse > PULSE_BOLD_THRESHOLD {
                style.add_modifier(Modifier::BOLD)
            } else {
                style.add_modifier(Modifier::DIM)
            }
        } else if self.enabled {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        }
    }
}

impl Component for GenerateButton {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = self.style();
        let button = Paragraph::new(self.label())
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            );
        frame.render_widget(button, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(mut button: GenerateButton) -> String {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| button.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_ready_label() {
        let text = render(GenerateButton::new(false, true, 0.0));
        assert!(text.contains("GENERATE SECURE PROMPT"));
    }

    #[test]
    fn test_loading_label() {
        let text = render(GenerateButton::new(true, false, 1.0));
        assert!(text.contains("ANALYZING..."));
        assert!(!text.contains("GENERATE"));
    }

    #[test]
    fn test_disabled_style_is_dim() {
        let button = GenerateButton::new(false, false, 0.0);
        assert!(button.style().add_modifier.contains(Modifier::DIM));
        let ready = GenerateButton::new(false, true, 0.0);
        assert_eq!(ready.style().bg, Some(Color::White));
    }
}
