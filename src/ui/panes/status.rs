//! Status bar rendering with keybindings and run state

use crate::editor::{SyntaxMode, ThemeName};
use crate::ui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Outcome of the most recent run, as shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Ok,
    Error,
}

/// Render the status bar at the bottom.
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    message: &str,
    run_state: RunState,
    runs: usize,
    theme_name: ThemeName,
    mode: SyntaxMode,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (badge, badge_bg) = match run_state {
        RunState::Idle => (" READY ".to_string(), theme.primary),
        RunState::Ok => (format!(" OK #{} ", runs), theme.success),
        RunState::Error => (format!(" ERROR #{} ", runs), theme.error),
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default().bg(theme.current_line_bg).fg(theme.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default().bg(theme.current_line_bg).fg(theme.fg),
        ),
        Span::styled(
            format!(" {} · {} ", theme_name, mode),
            Style::default().bg(theme.current_line_bg).fg(theme.comment),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(theme.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(theme.comment).fg(Color::Black);
    let desc_style = Style::default().bg(theme.current_line_bg).fg(theme.fg);
    let sep_style = Style::default().bg(theme.current_line_bg).fg(theme.comment);

    let right_spans = vec![
        Span::styled(" ^R/F5 ", key_style),
        Span::styled(" run ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(theme.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
