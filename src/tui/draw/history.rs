//! Chat history: message blocks with times, code blocks, typing indicator, and scrollbar.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::segment::{self, Segment};
use crate::core::thread::{self, Message, REPLY_UNAVAILABLE};

use super::super::app::App;
use super::super::constants::{Palette, TYPING_FRAMES};
use super::super::syntax;
use super::super::text::{char_chunks, wrap_message};

/// Repeat a character to fill width (approximate; chars may have different display widths).
fn repeat_char(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// Width of the line-number gutter for a block of `line_count` lines.
fn gutter_width(line_count: usize) -> usize {
    line_count.max(1).to_string().len()
}

fn add_text_lines(
    lines: &mut Vec<Line<'static>>,
    text: &str,
    content_width: usize,
    border_style: Style,
    text_style: Style,
) {
    let text = text.trim_matches(|c| c == '\n' || c == '\r');
    if text.trim().is_empty() {
        return;
    }
    for chunk in wrap_message(text, content_width) {
        lines.push(Line::from(vec![
            Span::styled("│ ", border_style),
            Span::styled(chunk, text_style),
        ]));
    }
}

fn add_code_lines(
    lines: &mut Vec<Line<'static>>,
    language: &str,
    code: &str,
    content_width: usize,
    border_style: Style,
    palette: &Palette,
) {
    let code_style = Style::default().fg(palette.accent_secondary);
    let number_style = Style::default().fg(palette.muted);

    let header = format!("┌─ {} ", language);
    let trail = content_width.saturating_sub(header.chars().count() + 1);
    lines.push(Line::from(vec![
        Span::styled("│ ", border_style),
        Span::styled(format!("{}{}┐", header, repeat_char('─', trail)), code_style),
    ]));

    let highlighted = syntax::highlight_block(language, code, palette);
    let gutter = gutter_width(highlighted.len());
    // "│ " + gutter + " │ "
    let code_width = content_width.saturating_sub(gutter + 5).max(1);
    for (idx, spans) in highlighted.iter().enumerate() {
        let len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
        for (chunk_idx, (start, end)) in char_chunks(len, code_width).into_iter().enumerate() {
            let number = if chunk_idx == 0 {
                format!("{:>width$}", idx + 1, width = gutter)
            } else {
                " ".repeat(gutter)
            };
            let mut line = vec![
                Span::styled("│ ", border_style),
                Span::styled("│ ", code_style),
                Span::styled(number, number_style),
                Span::styled(" │ ", number_style),
            ];
            line.extend(syntax::slice_spans_by_range(spans, start, end));
            lines.push(Line::from(line));
        }
    }

    lines.push(Line::from(vec![
        Span::styled("│ ", border_style),
        Span::styled(
            format!("└{}┘", repeat_char('─', content_width.saturating_sub(2))),
            code_style,
        ),
    ]));
}

/// Render one message as a bordered block: "┌─ You 14:32 ──┐", body, "└──┘".
pub(crate) fn message_lines(
    msg: &Message,
    width: usize,
    palette: &Palette,
) -> Vec<Line<'static>> {
    let (label, border_color) = if msg.is_user() {
        ("You", palette.accent)
    } else {
        ("Assistant", palette.accent_secondary)
    };
    let border_style = Style::default().fg(border_color);
    let text_style = if !msg.is_user() && msg.text == REPLY_UNAVAILABLE {
        Style::default().fg(palette.error)
    } else {
        Style::default().fg(palette.text)
    };
    let content_width = width.saturating_sub(4).max(1);

    let mut lines = Vec::new();
    let top_label = format!("┌─ {} {} ", label, thread::format_timestamp(msg.timestamp));
    let trail = width.saturating_sub(top_label.chars().count() + 1);
    lines.push(Line::from(Span::styled(
        format!("{}{}┐", top_label, repeat_char('─', trail)),
        border_style,
    )));

    for seg in segment::segment(&msg.text) {
        match seg {
            Segment::Text { .. } => add_text_lines(
                &mut lines,
                seg.content(),
                content_width,
                border_style,
                text_style,
            ),
            Segment::Code(block) => add_code_lines(
                &mut lines,
                block.language,
                block.content,
                content_width,
                border_style,
                palette,
            ),
        }
    }

    lines.push(Line::from(Span::styled(
        format!("└{}┘", repeat_char('─', width.saturating_sub(2))),
        border_style,
    )));
    lines
}

/// Animated dots shown while the reply for the displayed thread is pending.
fn typing_line(since: Option<Instant>, palette: &Palette) -> Line<'static> {
    let phase = since.map(|t| t.elapsed().as_millis() as usize).unwrap_or(0);
    let frame = TYPING_FRAMES[(phase / 300) % TYPING_FRAMES.len()];
    Line::from(Span::styled(
        format!("  {}", frame),
        Style::default()
            .fg(palette.muted)
            .add_modifier(Modifier::BOLD),
    ))
}

pub(crate) fn draw_history(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let text_area = chunks[0];
    let scrollbar_area = chunks[1];
    let width = text_area.width.saturating_sub(1) as usize;
    let palette = app.palette();

    let mut lines: Vec<Line<'static>> = Vec::new();
    for msg in app.current_messages() {
        lines.extend(message_lines(msg, width, &palette));
        lines.push(Line::default());
    }
    if app
        .chat
        .awaiting()
        .is_some_and(|id| Some(id) == app.chat.current_id())
    {
        lines.push(typing_line(app.awaiting_since, &palette));
    }

    let total_lines = lines.len();
    let visible = text_area.height as usize;
    let max_scroll = total_lines.saturating_sub(visible.max(1));
    app.last_max_scroll = max_scroll;
    let scroll_pos = app.scroll_line().min(max_scroll);
    let visible_lines: Vec<Line> = lines.into_iter().skip(scroll_pos).take(visible).collect();

    f.render_widget(Paragraph::new(visible_lines), text_area);

    let mut scrollbar_state = ScrollbarState::default()
        .position(scroll_pos)
        .content_length(total_lines);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_symbol("█")
        .thumb_style(Style::default().fg(palette.accent_secondary))
        .track_symbol(Some("│"));
    f.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
}
