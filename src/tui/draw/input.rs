//! Input field and bottom bar. The field is disabled while a reply is awaited.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthChar;

use super::super::app::App;
use super::super::shortcuts::labels;

const PLACEHOLDER: &str = "Type your message...";
const THINKING: &str = "AI is thinking...";

/// Longest suffix of `input` that fits in `width` columns, and its display width.
fn visible_tail(input: &str, width: usize) -> (&str, usize) {
    let mut used = 0;
    let mut start = input.len();
    for (idx, ch) in input.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    (&input[start..], used)
}

pub(crate) fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let awaiting = app.is_awaiting();
    let border = if awaiting {
        palette.muted
    } else {
        palette.accent
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);

    // Keep the end of long input visible, with one column left for the cursor.
    let (tail, tail_width) = visible_tail(&app.input, inner.width.saturating_sub(1) as usize);
    let line = if awaiting {
        Line::from(Span::styled(
            THINKING,
            Style::default()
                .fg(palette.muted)
                .add_modifier(Modifier::ITALIC),
        ))
    } else if app.input.is_empty() {
        Line::from(Span::styled(PLACEHOLDER, Style::default().fg(palette.muted)))
    } else {
        Line::from(Span::styled(tail.to_string(), Style::default().fg(palette.text)))
    };
    f.render_widget(Paragraph::new(line).block(block), area);

    if !awaiting && !app.menu_is_open() {
        // tail_width < inner.width, so it fits in u16.
        let x = inner.x + tail_width as u16;
        f.set_cursor_position(Position::new(x, inner.y));
    }
}

pub(crate) fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let line = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(palette.accent_secondary),
        )),
        None => labels::bottom_bar(app.is_awaiting()),
    };
    f.render_widget(Paragraph::new(line), area);
}
