//! Editor pane rendering with syntax highlighting
//!
//! Draws the editor buffer with line numbers, a highlighted cursor line, and
//! (in JavaScript mode) keyword/string/number/comment colouring. The
//! highlighter is a simple character scanner rather than the real lexer, so
//! it keeps working on half-typed code that would not tokenize.

use crate::editor::{EditorBuffer, SyntaxMode};
use crate::ui::theme::{palette, Theme};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the line-number gutter, including the trailing space
const GUTTER_WIDTH: u16 = 5;

/// Simple syntax highlighting for one line of JavaScript-like code
fn highlight_line<'a>(line: &'a str, theme: &Theme) -> Line<'a> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];

        // Line comment runs to the end
        if c == '/' && chars.get(i + 1).is_some_and(|(_, n)| *n == '/') {
            flush_word(&mut spans, &mut current_word, false, theme);
            spans.push(Span::styled(
                &line[byte_idx..],
                Style::default().fg(theme.comment),
            ));
            return Line::from(spans);
        }

        if c == '"' || c == '\'' {
            flush_word(&mut spans, &mut current_word, false, theme);
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != c {
                if chars[end].1 == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            end = (end + 1).min(chars.len());
            let end_byte = chars.get(end).map(|(b, _)| *b).unwrap_or(line.len());
            spans.push(Span::styled(
                &line[byte_idx..end_byte],
                Style::default().fg(theme.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' && c != '$' && !(c == '.' && is_number(&current_word)) {
            flush_word(&mut spans, &mut current_word, c == '(', theme);

            let style = match c {
                '{' | '}' | '(' | ')' => Style::default().fg(theme.primary),
                _ => Style::default().fg(theme.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false, theme);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String, is_call: bool, theme: &Theme) {
    if word.is_empty() {
        return;
    }
    let style = word_style(word, is_call, theme);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn is_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn word_style(word: &str, is_call: bool, theme: &Theme) -> Style {
    match word {
        "var" | "let" | "const" | "if" | "else" | "while" | "for" | "break" | "continue"
        | "return" | "typeof" | "function" | "new" => Style::default()
            .fg(theme.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" | "null" | "undefined" | "NaN" | "Infinity" => {
            Style::default().fg(theme.number)
        }
        _ if is_number(word) => Style::default().fg(theme.number),
        _ if is_call => Style::default().fg(theme.primary),
        _ => Style::default().fg(theme.fg),
    }
}

/// Render the editor pane and place the terminal cursor when focused
pub fn render_editor_pane(
    frame: &mut Frame,
    area: Rect,
    editor: &EditorBuffer,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let theme = palette(editor.theme());

    let border_style = if is_focused {
        Style::default()
            .fg(theme.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border_normal)
    };

    let block = Block::default()
        .title(format!(" Editor ({}) ", editor.mode()))
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg));

    let (cursor_row, cursor_col) = editor.cursor();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    // Keep the cursor row on screen
    if cursor_row < *scroll_offset {
        *scroll_offset = cursor_row;
    } else if cursor_row >= *scroll_offset + visible_height {
        *scroll_offset = cursor_row + 1 - visible_height;
    }

    let visible_lines: Vec<Line> = editor
        .lines()
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = idx == cursor_row;
            let num_style = if is_current {
                Style::default()
                    .fg(theme.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.line_number)
            };

            let mut content = match editor.mode() {
                SyntaxMode::JavaScript => highlight_line(line, theme),
                SyntaxMode::PlainText => Line::styled(line.as_str(), Style::default().fg(theme.fg)),
            };
            if is_current {
                for span in &mut content.spans {
                    span.style = span.style.bg(theme.current_line_bg);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", idx + 1), num_style)];
            spans.extend(content.spans);

            let line = Line::from(spans);
            if is_current {
                line.style(Style::default().bg(theme.current_line_bg))
            } else {
                line
            }
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);

    if is_focused {
        let x = area.x + 1 + GUTTER_WIDTH + cursor_col as u16;
        let y = area.y + 1 + (cursor_row - *scroll_offset) as u16;
        if x < area.right().saturating_sub(1) && y < area.bottom().saturating_sub(1) {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::MONOKAI;

    fn span_texts(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words_and_symbols() {
        let line = highlight_line("var x = 3;", &MONOKAI);
        assert_eq!(
            span_texts(&line),
            vec!["var", " ", "x", " ", "=", " ", "3", ";"]
        );
        assert_eq!(line.spans[0].style.fg, Some(MONOKAI.keyword));
        assert_eq!(line.spans[6].style.fg, Some(MONOKAI.number));
    }

    #[test]
    fn test_highlight_strings_and_comments() {
        let line = highlight_line("s = 'a b'; // done", &MONOKAI);
        let texts = span_texts(&line);

        assert!(texts.contains(&"'a b'".to_string()));
        assert_eq!(texts.last().map(String::as_str), Some("// done"));
        assert_eq!(line.spans.last().and_then(|s| s.style.fg), Some(MONOKAI.comment));
    }

    #[test]
    fn test_highlight_keeps_decimal_numbers_whole() {
        let line = highlight_line("1.5", &MONOKAI);
        assert_eq!(span_texts(&line), vec!["1.5"]);
    }

    #[test]
    fn test_highlight_unterminated_string() {
        let line = highlight_line("'abc", &MONOKAI);
        assert_eq!(span_texts(&line), vec!["'abc"]);
    }
}
