//! # InputBox Component
//!
//! The "Agent Configuration" panel: a multi-line editor for the persona
//! description.
//!
//! ## Responsibilities
//!
//! - Capture text input (typing, paste, Ctrl+J newlines)
//! - Handle editing (backspace, delete, cursor movement)
//! - Emit `Submit` on Enter; the text itself stays in the box
//! - Show a placeholder while empty
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. The parent mirrors the buffer
//! into core state whenever `ContentChanged` is emitted.

mod rows;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use rows::{column_of, cursor_cell, layout_rows, next_char_boundary, offset_at_column, prev_char_boundary, row_of};

pub const PLACEHOLDER: &str =
    "Describe the agent (e.g. 'Simple Grammar Checker' or 'Complex Legal Bot')...";

const TITLE: &str = " ⚡ Agent Configuration ";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User asked for generation (Enter pressed)
    Submit,
    /// Buffer text changed
    ContentChanged,
    /// Only the cursor moved
    CursorMoved,
}

/// Multi-line text input.
///
/// # Props
///
/// - `focused`: whether to place the terminal cursor (false while a popup is open)
///
/// # State
///
/// - `buffer`: current text
/// - `cursor`: byte offset into `buffer`
/// - `scroll_offset`: first visible row
pub struct InputBox {
    pub buffer: String,
    pub focused: bool,
    cursor: usize,
    scroll_offset: usize,
    /// Inner width from the last render, used for vertical movement.
    last_width: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    const DEFAULT_WIDTH: u16 = 40;

    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            focused: true,
            cursor: 0,
            scroll_offset: 0,
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn block() -> Block<'static> {
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(TITLE)
            .title_style(Style::default().fg(Color::Gray))
            .padding(Padding::horizontal(1))
    }

    /// Moves the cursor one visual row up (`-1`) or down (`1`), keeping the column.
    fn move_vertically(&mut self, direction: isize) -> bool {
        let rows = layout_rows(&self.buffer, self.last_width);
        let current = row_of(&rows, self.cursor);
        let Some(target) = current.checked_add_signed(direction).filter(|t| *t < rows.len()) else {
            return false;
        };
        let column = column_of(&self.buffer, &rows[current], self.cursor);
        self.cursor = offset_at_column(&self.buffer, &rows[target], column);
        true
    }

    /// Keeps the cursor row inside a viewport of `height` rows.
    fn update_scroll_offset(&mut self, cursor_row: usize, height: usize) {
        if cursor_row < self.scroll_offset {
            self.scroll_offset = cursor_row;
        } else if height > 0 && cursor_row >= self.scroll_offset + height {
            self.scroll_offset = cursor_row + 1 - height;
        }
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Self::block();
        let inner = block.inner(area);
        self.last_width = inner.width.max(1);

        if self.buffer.is_empty() {
            self.scroll_offset = 0;
            let placeholder = Paragraph::new(PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(placeholder, area);
            if self.focused && !inner.is_empty() {
                frame.set_cursor_position(Position::new(inner.x, inner.y));
            }
            return;
        }

        let rows = layout_rows(&self.buffer, self.last_width);
        let (cursor_row, cursor_column) =
            cursor_cell(&self.buffer, &rows, self.cursor, self.last_width);
        self.update_scroll_offset(cursor_row, usize::from(inner.height));

        let lines: Vec<Line> = rows
            .iter()
            .skip(self.scroll_offset)
            .take(usize::from(inner.height))
            .map(|r| Line::raw(&self.buffer[r.clone()]))
            .collect();

        let paragraph = Paragraph::new(lines)
            .style(Style::default().fg(Color::White))
            .block(block);
        frame.render_widget(paragraph, area);

        if self.focused && !inner.is_empty() {
            let row = cursor_row.saturating_sub(self.scroll_offset) as u16;
            let column = cursor_column.min(inner.width - 1);
            frame.set_cursor_position(Position::new(inner.x + column, inner.y + row));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Terminals may deliver CRLF in pastes
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                InputEvent::CursorMoved
            }),
            TuiEvent::CursorHome => {
                let line_start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::CursorMoved
                })
            }
            TuiEvent::CursorUp => self.move_vertically(-1).then_some(InputEvent::CursorMoved),
            TuiEvent::CursorDown => self.move_vertically(1).then_some(InputEvent::CursorMoved),
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }
}
