//! Move transcript pane rendering

use crate::snapshot::TranscriptLine;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the transcript of moves up to the current step
pub fn render_transcript_pane(
    frame: &mut Frame,
    area: Rect,
    lines: &[TranscriptLine],
    failure: Option<&str>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Transcript ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if lines.is_empty() && failure.is_none() {
        let paragraph = Paragraph::new("(no moves yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let step_width = lines.last().map_or(1, |line| line.step.to_string().len());

    let mut all_items: Vec<ListItem> = lines
        .iter()
        .map(|line| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>width$}: ", line.step, width = step_width),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(line.text.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
            ]))
        })
        .collect();
    if let Some(message) = failure {
        all_items.push(ListItem::new(Span::styled(
            message.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // usize::MAX means "follow the newest line"
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
