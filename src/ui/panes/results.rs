//! Results pane rendering

use crate::ui::theme::Theme;
use crate::ui::view::ResultsContent;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the results pane: the last value, or the last error message
pub fn render_results_pane(
    frame: &mut Frame,
    area: Rect,
    results: &ResultsContent,
    theme: &Theme,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let title = match results {
        ResultsContent::Error(_) => " Result: error ",
        _ => " Result ",
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg));

    let (text, style) = match results {
        ResultsContent::Empty => (
            "(press Ctrl+R to run)",
            Style::default().fg(theme.comment),
        ),
        ResultsContent::Value(text) => (text.as_str(), Style::default().fg(theme.success)),
        ResultsContent::Error(message) => (
            message.as_str(),
            Style::default()
                .fg(theme.error)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let lines: Vec<Line> = text.lines().map(Line::from).collect();
    let paragraph = Paragraph::new(lines)
        .style(style)
        .wrap(Wrap { trim: false });

    // Borders on both sides plus one column of left padding
    let text_width = area.width.saturating_sub(3);
    let total_lines = paragraph.line_count(text_width);
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    // Clamp scroll offset against the wrapped height, not the raw line count
    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let paragraph = paragraph
        .block(block.padding(Padding::new(1, 0, 0, 0)))
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
