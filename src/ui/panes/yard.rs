//! Yard pane: the stack collection drawn the way the input draws it
//!
//! ```text
//!     [D]
//! [N] [C]
//! [Z] [M] [P]
//!  1   2   3
//! ```
//!
//! Crates landed by the current step are highlighted, and the labels of the
//! stacks involved are coloured. Piles sit on the bottom edge of the pane; when
//! the yard is taller than the pane the label line stays pinned and the crate
//! rows scroll.

use crate::memory::StackCollection;
use crate::snapshot::LastMove;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const EMPTY_CELL: &str = "   ";

/// The label cell for stack `index` (0-based)
fn label_cell(index: usize) -> String {
    format!("{:^3}", index + 1)
}

/// Plain-text rows of the yard, highest crate row first, label line last.
///
/// For a collection parsed from a diagram this reproduces the diagram.
pub fn yard_rows(stacks: &StackCollection) -> Vec<String> {
    let height = stacks.tallest();
    let mut rows = Vec::with_capacity(height + 1);

    for level in (0..height).rev() {
        let cells: Vec<String> = stacks
            .iter()
            .map(|stack| match stack.get(level) {
                Some(&id) => format!("[{}]", char::from(id)),
                None => EMPTY_CELL.to_string(),
            })
            .collect();
        rows.push(cells.join(" "));
    }

    let labels: Vec<String> = (0..stacks.len()).map(label_cell).collect();
    rows.push(labels.join(" "));
    rows
}

fn crate_row(stacks: &StackCollection, level: usize, last_move: Option<LastMove>) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, stack) in stacks.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let Some(&id) = stack.get(level) else {
            spans.push(Span::raw(EMPTY_CELL));
            continue;
        };

        let moved = last_move.is_some_and(|m| {
            m.destination == index && level + m.quantity >= stack.len()
        });
        let style = if moved {
            Style::default()
                .fg(DEFAULT_THEME.moved_crate)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.crate_id)
        };
        spans.push(Span::styled("[", Style::default().fg(DEFAULT_THEME.comment)));
        spans.push(Span::styled(char::from(id).to_string(), style));
        spans.push(Span::styled("]", Style::default().fg(DEFAULT_THEME.comment)));
    }
    Line::from(spans)
}

fn label_row(count: usize, last_move: Option<LastMove>) -> Line<'static> {
    let mut spans = Vec::new();
    for index in 0..count {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let style = match last_move {
            Some(m) if m.source == index => Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
            Some(m) if m.destination == index => Style::default()
                .fg(DEFAULT_THEME.moved_crate)
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(DEFAULT_THEME.label),
        };
        spans.push(Span::styled(label_cell(index), style));
    }
    Line::from(spans)
}

/// Render the yard pane
pub fn render_yard_pane(
    frame: &mut Frame,
    area: Rect,
    stacks: &StackCollection,
    last_move: Option<LastMove>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(
            " Yard ({} stacks, {} crates) ",
            stacks.len(),
            stacks.total_crates()
        ))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let height = stacks.tallest();
    let visible_height = chunks[0].height as usize;

    if height > visible_height {
        *scroll_offset = (*scroll_offset).min(height - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    // Pad so short piles rest on the label line
    for _ in height..visible_height {
        lines.push(Line::default());
    }
    lines.extend(
        (0..height)
            .rev()
            .skip(*scroll_offset)
            .take(visible_height)
            .map(|level| crate_row(stacks, level, last_move)),
    );

    frame.render_widget(Paragraph::new(lines), chunks[0]);
    frame.render_widget(Paragraph::new(label_row(stacks.len(), last_move)), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_reproduce_diagram() {
        let stacks = StackCollection::from_piles(&[b"ZN", b"MCD", b"P"]).unwrap();
        assert_eq!(
            yard_rows(&stacks),
            vec![
                "    [D]    ".to_string(),
                "[N] [C]    ".to_string(),
                "[Z] [M] [P]".to_string(),
                " 1   2   3 ".to_string(),
            ]
        );
    }

    #[test]
    fn test_moved_crates_are_highlighted() {
        let stacks = StackCollection::from_piles(&[b"A", b"BCD"]).unwrap();
        let last_move = Some(LastMove {
            source: 0,
            destination: 1,
            quantity: 2,
        });
        let moved = Style::default()
            .fg(DEFAULT_THEME.moved_crate)
            .add_modifier(Modifier::BOLD);

        // An empty cell is one span, a crate is three ("[", id, "]")
        let top = crate_row(&stacks, 2, last_move);
        assert_eq!(top.spans[3].content, "D");
        assert_eq!(top.spans[3].style, moved);
        let middle = crate_row(&stacks, 1, last_move);
        assert_eq!(middle.spans[3].style, moved);
        let bottom = crate_row(&stacks, 0, last_move);
        assert_eq!(bottom.spans[5].content, "B");
        assert_ne!(bottom.spans[5].style, moved);
        assert_ne!(bottom.spans[1].style, moved);
    }
}
