//! Plain-text layout of a rendered grid.
//!
//! Widths are measured in terminal display columns, so wide glyphs take two
//! cells. Content wider than a fixed column width is cut with an ellipsis.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cell::Cell;
use crate::column::Alignment;
use crate::events::Click;
use crate::grid::{Grid, GridRow};

/// Gap between columns.
pub const COLUMN_GAP: &str = "  ";

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target_width = max_width - 1;
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result.push('…');
    result
}

/// Pads `s` to `width`, returning the padded text and the number of columns
/// added on the left.
fn align_to_width(s: &str, width: usize, align: Alignment) -> (String, usize) {
    let text = truncate_to_width(s, width);
    let slack = width.saturating_sub(display_width(&text));
    let left = match align {
        Alignment::Left => 0,
        Alignment::Center => slack / 2,
        Alignment::Right => slack,
    };
    let padded = format!("{}{}{}", " ".repeat(left), text, " ".repeat(slack - left));
    (padded, left)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActionSpan {
    start: usize,
    end: usize,
    id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Header,
    Rule,
    Data { row: usize, actions: Vec<ActionSpan> },
    Placeholder,
}

/// A grid laid out as text lines, with enough layout kept to map a position
/// back to a [`Click`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    lines: Vec<String>,
    kinds: Vec<LineKind>,
}

impl TextGrid {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Maps a click at display column `x` of line `line` to a table click.
    ///
    /// Positions on an action button yield an action click; anywhere else on
    /// a data line yields a row click. Header, rule and placeholder lines
    /// yield nothing.
    pub fn hit_test(&self, line: usize, x: usize) -> Option<Click> {
        match self.kinds.get(line)? {
            LineKind::Data { row, actions } => Some(
                actions
                    .iter()
                    .find(|span| span.start <= x && x < span.end)
                    .map(|span| Click::action(*row, span.id.clone()))
                    .unwrap_or_else(|| Click::row(*row)),
            ),
            LineKind::Header | LineKind::Rule | LineKind::Placeholder => None,
        }
    }
}

impl std::fmt::Display for TextGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn column_widths(grid: &Grid) -> Vec<usize> {
    grid.headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            header.width.unwrap_or_else(|| {
                grid.rows
                    .iter()
                    .filter_map(|row| match row {
                        GridRow::Data { cells, .. } => cells.get(i),
                        GridRow::Placeholder { .. } => None,
                    })
                    .map(|cell| display_width(&cell.display()))
                    .chain(std::iter::once(display_width(&header.label)))
                    .max()
                    .unwrap_or(0)
            })
        })
        .collect()
}

fn action_spans(cell: &Cell, origin: usize, width: usize) -> Vec<ActionSpan> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for action in cell.action_list() {
        let button = display_width(&action.label) + 2;
        let start = offset;
        let end = (offset + button).min(width);
        if start >= end {
            break;
        }
        spans.push(ActionSpan {
            start: origin + start,
            end: origin + end,
            id: action.id.clone(),
        });
        offset += button + 1;
    }
    spans
}

/// Lays `grid` out as a header line, a rule and one line per row.
pub fn render_text(grid: &Grid) -> TextGrid {
    let widths = column_widths(grid);
    let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);

    let mut lines = Vec::with_capacity(grid.rows.len() + 2);
    let mut kinds = Vec::with_capacity(grid.rows.len() + 2);

    let header = grid
        .headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| align_to_width(&h.label, *w, h.align).0)
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    lines.push(header.trim_end().to_string());
    kinds.push(LineKind::Header);

    let rule = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    lines.push(rule);
    kinds.push(LineKind::Rule);

    for row in &grid.rows {
        match row {
            GridRow::Data { index, cells } => {
                let mut parts = Vec::with_capacity(cells.len());
                let mut actions = Vec::new();
                let mut x = 0;
                for ((cell, width), header) in cells.iter().zip(&widths).zip(&grid.headers) {
                    let (text, lead) = align_to_width(&cell.display(), *width, header.align);
                    actions.extend(action_spans(cell, x + lead, width - lead));
                    parts.push(text);
                    x += width + COLUMN_GAP.len();
                }
                lines.push(parts.join(COLUMN_GAP).trim_end().to_string());
                kinds.push(LineKind::Data {
                    row: *index,
                    actions,
                });
            }
            GridRow::Placeholder { text, .. } => {
                let (line, _) = align_to_width(text, total.max(display_width(text)), Alignment::Center);
                lines.push(line.trim_end().to_string());
                kinds.push(LineKind::Placeholder);
            }
        }
    }

    TextGrid { lines, kinds }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
        assert_eq!(truncate_to_width("hello world", 8), "hello w…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_align_to_width() {
        assert_eq!(align_to_width("ab", 6, Alignment::Right), ("    ab".to_string(), 4));
        assert_eq!(align_to_width("ab", 6, Alignment::Center), ("  ab  ".to_string(), 2));
        assert_eq!(align_to_width("ab", 4, Alignment::Left), ("ab  ".to_string(), 0));
    }

    #[test]
    fn test_action_spans_are_clipped() {
        let cell = Cell::actions([
            crate::Action::new("accept", "Accept"),
            crate::Action::new("reject", "Reject"),
        ]);
        let spans = action_spans(&cell, 10, 10);
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].start, spans[0].end), (10, 18));
        assert_eq!((spans[1].start, spans[1].end), (19, 20));
    }
}
