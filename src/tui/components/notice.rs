//! # NoticePopup Component
//!
//! Centered modal for failure notices. Drawn over the main layout until the
//! user presses Esc (or Enter).

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::state::{Notice, NoticeKind};
use crate::tui::component::Component;

const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 9;

pub struct NoticePopup<'a> {
    pub notice: &'a Notice,
}

impl<'a> NoticePopup<'a> {
    pub fn new(notice: &'a Notice) -> Self {
        Self { notice }
    }

    fn title(&self) -> &'static str {
        match self.notice.kind {
            NoticeKind::Configuration => " Configuration ",
            NoticeKind::GenerationFailed => " Error ",
        }
    }
}

/// A rectangle of at most `width` x `height`, centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

impl Component for NoticePopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
        let accent = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .title(self.title())
            .title_style(accent)
            .title_bottom(Line::from(" Esc to dismiss ").right_aligned())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.notice.message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White))
            .block(block);

        frame.render_widget(Clear, popup);
        frame.render_widget(body, popup);
    }
}
