//! Instruction list pane
//!
//! Shows every instruction with its step number. The instruction whose effect
//! is on screen is highlighted and kept at a fixed row while stepping; the
//! instruction that stopped the run, if any, is shown in the error colour.

use crate::parser::ast::Instruction;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Colour `move 3 from 1 to 2` by word class
fn highlight_instruction(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, word) in text.split(' ').enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if word.bytes().all(|b| b.is_ascii_digit()) {
            Style::default().fg(DEFAULT_THEME.number)
        } else {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(word.to_string(), style));
    }
    spans
}

/// Scroll state for the instruction pane
#[derive(Debug, Default)]
pub struct InstructionScrollState {
    pub offset: usize,
    /// Visual row of the current instruction (None = centre on first render)
    pub target_line_row: Option<usize>,
}

/// What the instruction pane shows
pub struct InstructionRenderData<'a> {
    pub instructions: &'a [Instruction],
    /// 1-based step of the instruction on screen, 0 before the first
    pub current_step: usize,
    /// 1-based step of the instruction that failed
    pub failed_step: Option<usize>,
}

/// Render the instruction pane
pub fn render_instruction_pane(
    frame: &mut Frame,
    area: Rect,
    data: InstructionRenderData<'_>,
    is_focused: bool,
    scroll_state: &mut InstructionScrollState,
) {
    let block = Block::default()
        .title(format!(" Instructions ({}) ", data.instructions.len()))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if data.instructions.is_empty() {
        let paragraph = Paragraph::new("(no instructions)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let total = data.instructions.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the instruction on screen at the target row
    let focus_step = data.failed_step.unwrap_or(data.current_step);
    if focus_step > 0 {
        scroll_state.offset = (focus_step - 1).saturating_sub(target_row);
    } else {
        scroll_state.offset = 0;
    }
    scroll_state.offset = scroll_state.offset.min(total.saturating_sub(visible_height));

    let number_width = total.to_string().len();
    let lines: Vec<Line> = data
        .instructions
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, instruction)| {
            let step = idx + 1;
            let is_failed = data.failed_step == Some(step);
            let is_current = step == data.current_step;

            let (marker, num_style) = if is_failed {
                (
                    "✗ ",
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                )
            } else if is_current {
                (
                    "▶ ",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else if step < data.current_step {
                ("  ", Style::default().fg(DEFAULT_THEME.comment))
            } else {
                ("  ", Style::default().fg(DEFAULT_THEME.fg))
            };

            let mut content = highlight_instruction(&instruction.to_string());
            if is_failed {
                let error_style = Style::default()
                    .bg(DEFAULT_THEME.error)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD);
                for span in &mut content {
                    span.style = error_style;
                }
            } else if is_current {
                for span in &mut content {
                    span.style = span.style.bg(DEFAULT_THEME.current_line_bg);
                }
            }

            let mut spans = vec![
                Span::styled(marker, num_style),
                Span::styled(format!("{:>width$} ", step, width = number_width), num_style),
            ];
            spans.extend(content);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
