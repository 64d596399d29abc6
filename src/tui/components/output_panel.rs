//! # OutputPanel Component
//!
//! Right-hand panel showing the generated system prompt exactly as returned,
//! with a copy badge in the top border.
//!
//! ```text
//! ╭ system_prompt.md ───────────── [ ⧉ COPY ^Y ] ╮
//! │ # SYSTEM PROMPT                              ▲│
//! │ ## ROLE                                      █│
//! │ ...                                          ▼│
//! ╰──────────────────────────────────────────────╯
//! ```
//!
//! Long text is soft-wrapped with `textwrap` (the stored output is never
//! modified) and rendered into a `ScrollView` sized to the wrapped height.
//! The badge only appears when there is output.

use std::borrow::Cow;

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::UnicodeWidthChar;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const FILE_LABEL: &str = " system_prompt.md ";
pub const EMPTY_STATE: &str = "Awaiting Input";
pub const COPY_BADGE: &str = " ⧉ COPY ^Y ";
pub const COPIED_BADGE: &str = " ✓ COPIED ";

/// Persistent scroll state for the output panel.
#[derive(Default)]
pub struct OutputPanelState {
    pub scroll_state: ScrollViewState,
}

impl OutputPanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_state.scroll_to_top();
    }
}

impl EventHandler for OutputPanelState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        Some(())
    }
}

/// Tab stop spacing used when laying out output.
pub const TAB_WIDTH: usize = 8;

/// Replaces tabs in a single line with spaces up to the next tab stop.
fn expand_tabs(line: &str) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }
    let mut expanded = String::with_capacity(line.len() + TAB_WIDTH);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            expanded.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            expanded.push(c);
            column += c.width().unwrap_or(0);
        }
    }
    Cow::Owned(expanded)
}

/// Wraps `text` to `width` columns, one `Line` per visual row.
/// Tabs are expanded for display only.
pub fn wrap_output(text: &str, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    let options = textwrap::Options::new(width).break_words(true);
    text.split('\n')
        .flat_map(|line| {
            textwrap::wrap(&expand_tabs(line), &options)
                .into_iter()
                .map(|row| Line::raw(row.into_owned()))
                .collect::<Vec<_>>()
        })
        .collect()
}

pub struct OutputPanel<'a> {
    pub output: &'a str,
    pub copy_acknowledged: bool,
    pub state: &'a mut OutputPanelState,
}

impl<'a> OutputPanel<'a> {
    pub fn new(output: &'a str, copy_acknowledged: bool, state: &'a mut OutputPanelState) -> Self {
        Self {
            output,
            copy_acknowledged,
            state,
        }
    }

    fn block(&self) -> Block<'static> {
        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(FILE_LABEL, Style::default().fg(Color::Gray)))
            .padding(Padding::horizontal(1));

        if !self.output.is_empty() {
            let badge = if self.copy_acknowledged {
                Span::styled(
                    COPIED_BADGE,
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(COPY_BADGE, Style::default().fg(Color::Gray).bg(Color::DarkGray))
            };
            block = block.title(Line::from(badge).right_aligned());
        }
        block
    }

    fn render_empty_state(frame: &mut Frame, area: Rect) {
        let [center] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let dim = Style::default().fg(Color::DarkGray);
        let text = vec![
            Line::styled("▣", dim).centered(),
            Line::raw(""),
            Line::styled(EMPTY_STATE, dim).centered(),
        ];
        frame.render_widget(Paragraph::new(text), center);
    }
}

impl Component for OutputPanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = self.block();
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.output.is_empty() {
            Self::render_empty_state(frame, inner);
            return;
        }

        // One column is reserved for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = wrap_output(self.output, content_width);
        let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            Paragraph::new(lines).style(Style::default().fg(Color::Gray)),
            Rect::new(0, 0, content_width, content_height),
        );
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
