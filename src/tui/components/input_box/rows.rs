//! Visual row layout for the InputBox.
//!
//! Text is hard-wrapped at the display width (no word wrapping), so every
//! byte offset maps to exactly one (row, column) on screen. Rows never
//! include the `'\n'` that ends a logical line.

use std::ops::Range;

use unicode_width::UnicodeWidthChar;

/// Byte ranges of each visual row for `text` at `width` columns.
/// Always returns at least one row.
pub(super) fn layout_rows(text: &str, width: u16) -> Vec<Range<usize>> {
    let width = usize::from(width.max(1));
    let mut rows = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let mut row_start = line_start;
        let mut row_width = 0;
        for (offset, c) in line.char_indices() {
            let w = c.width().unwrap_or(0);
            if row_width + w > width && row_width > 0 {
                rows.push(row_start..line_start + offset);
                row_start = line_start + offset;
                row_width = 0;
            }
            row_width += w;
        }
        rows.push(row_start..line_start + line.len());
        line_start += line.len() + 1;
    }

    rows
}

/// Row index containing `pos`. At a soft-wrap boundary the later row wins.
pub(super) fn row_of(rows: &[Range<usize>], pos: usize) -> usize {
    rows.iter().rposition(|r| r.start <= pos).unwrap_or(0)
}

/// Display column of `pos` within its row.
pub(super) fn column_of(text: &str, row: &Range<usize>, pos: usize) -> u16 {
    let end = pos.clamp(row.start, row.end);
    text[row.start..end]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum::<usize>() as u16
}

/// Screen (row, column) of a cursor at `pos`.
///
/// A cursor right after a row that fills the whole width sits at column 0
/// of the row below, even when that row holds no text yet.
pub(super) fn cursor_cell(text: &str, rows: &[Range<usize>], pos: usize, width: u16) -> (usize, u16) {
    let row = row_of(rows, pos);
    let column = column_of(text, &rows[row], pos);
    if column >= width.max(1) {
        (row + 1, 0)
    } else {
        (row, column)
    }
}

/// Byte offset in `row` closest to display `column` without passing it.
pub(super) fn offset_at_column(text: &str, row: &Range<usize>, column: u16) -> usize {
    let mut used = 0usize;
    for (offset, c) in text[row.clone()].char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > usize::from(column) {
            return row.start + offset;
        }
        used += w;
    }
    row.end
}

/// Byte offset of the character boundary before `pos`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the character boundary after `pos`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_has_one_row() {
        assert_eq!(layout_rows("", 10), vec![0..0]);
    }

    #[test]
    fn long_line_hard_wraps() {
        assert_eq!(layout_rows("abcdefg", 3), vec![0..3, 3..6, 6..7]);
    }

    #[test]
    fn newlines_split_rows_and_are_excluded() {
        assert_eq!(layout_rows("ab\ncd", 10), vec![0..2, 3..5]);
        assert_eq!(layout_rows("ab\n", 10), vec![0..2, 3..3]);
    }

    #[test]
    fn wide_chars_count_double() {
        // Each CJK char is 2 columns wide
        let text = "日本語";
        assert_eq!(layout_rows(text, 4), vec![0..6, 6..9]);
    }

    #[test]
    fn row_of_prefers_later_row_at_soft_wrap() {
        let rows = layout_rows("abcdef", 3);
        assert_eq!(row_of(&rows, 2), 0);
        assert_eq!(row_of(&rows, 3), 1);
        assert_eq!(row_of(&rows, 6), 1);
    }

    #[test]
    fn cursor_after_full_row_wraps_to_next_row() {
        let text = "abc";
        let rows = layout_rows(text, 3);
        assert_eq!(cursor_cell(text, &rows, 2, 3), (0, 2));
        assert_eq!(cursor_cell(text, &rows, 3, 3), (1, 0));
        // Room left on the row: stays put
        let wide = layout_rows(text, 4);
        assert_eq!(cursor_cell(text, &wide, 3, 4), (0, 3));
    }

    #[test]
    fn column_and_offset_are_inverse() {
        let text = "hello\nworld";
        let rows = layout_rows(text, 20);
        assert_eq!(column_of(text, &rows[1], 9), 3);
        assert_eq!(offset_at_column(text, &rows[1], 3), 9);
        // Column past the end clamps to row end
        assert_eq!(offset_at_column(text, &rows[0], 40), 5);
    }

    #[test]
    fn char_boundaries_handle_multibyte() {
        let text = "aé b";
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(prev_char_boundary(text, 0), 0);
        assert_eq!(next_char_boundary(text, text.len()), text.len());
    }
}
