//! Sidebar: list of chat threads, current one highlighted.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::core::thread;

use super::super::app::App;

pub(crate) fn draw_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let current = app.chat.current_id();
    let items: Vec<ListItem> = app
        .chat
        .threads()
        .iter()
        .map(|t| {
            let style = if Some(t.id) == current {
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text)
            };
            let last = t
                .messages
                .last()
                .map(|m| thread::format_timestamp(m.timestamp))
                .unwrap_or_default();
            let mut spans = vec![Span::styled(t.title.clone(), style)];
            if app.chat.awaiting() == Some(t.id) {
                spans.push(Span::styled(" …", Style::default().fg(palette.muted)));
            }
            spans.push(Span::styled(
                format!("  {}", last),
                Style::default().fg(palette.muted),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(palette.muted))
        .title(Span::styled(
            " + New Chat (Ctrl+N) ",
            Style::default().fg(palette.accent),
        ));
    let list = List::new(items)
        .block(block)
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    let mut state = ListState::default();
    state.select(app.chat.current_index());
    f.render_stateful_widget(list, area, &mut state);
}
