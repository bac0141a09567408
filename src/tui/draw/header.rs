//! Header: app title, current chat title, presentation mode, profile avatar.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::presentation::PresentationMode;
use crate::core::thread::NEW_THREAD_TITLE;

use super::super::app::App;
use super::super::constants::APP_TITLE;

const MODE_WIDTH: u16 = 10;
const AVATAR_WIDTH: u16 = 5;

fn mode_label(mode: PresentationMode) -> &'static str {
    match mode {
        PresentationMode::Dark => "☾ dark",
        PresentationMode::Light => "☀ light",
    }
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let palette = app.palette();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(MODE_WIDTH),
            Constraint::Length(AVATAR_WIDTH),
        ])
        .split(area);

    let chat_title = app
        .chat
        .current()
        .map(|t| t.title.as_str())
        .unwrap_or(NEW_THREAD_TITLE);
    let title = Line::from(vec![
        Span::styled(
            format!("{} ", APP_TITLE),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("· ", Style::default().fg(palette.muted)),
        Span::styled(chat_title.to_string(), Style::default().fg(palette.text)),
    ]);
    f.render_widget(Paragraph::new(title), chunks[0]);

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            mode_label(app.mode),
            Style::default().fg(palette.muted),
        )))
        .alignment(Alignment::Right),
        chunks[1],
    );

    let mut avatar_style = Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD);
    if app.menu_is_open() {
        avatar_style = avatar_style.add_modifier(Modifier::REVERSED);
    }
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("[{}]", app.user.initial()),
            avatar_style,
        )))
        .alignment(Alignment::Right),
        chunks[2],
    );
}
