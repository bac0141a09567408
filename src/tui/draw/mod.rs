//! TUI rendering: layout and widgets for the chat interface.

mod header;
mod history;
mod input;
mod popups;
mod sidebar;

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app::App;
use super::constants::SIDEBAR_WIDTH;

const HEADER_HEIGHT: u16 = 2;
const INPUT_HEIGHT: u16 = 3;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let palette = app.palette();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);
    header::draw_header(f, app, rows[0]);

    let sidebar_width = if app.sidebar_open {
        SIDEBAR_WIDTH.min(area.width / 2)
    } else {
        0
    };
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(rows[1]);
    if app.sidebar_open {
        sidebar::draw_sidebar(f, app, body[0]);
    }
    history::draw_history(f, app, body[1]);
    input::draw_input(f, app, rows[2]);
    input::draw_bottom_bar(f, app, rows[3]);

    if app.menu_is_open() {
        popups::draw_profile_menu(f, app, area, HEADER_HEIGHT);
    }

    // Toast: top right, below header. Opaque background so it's visible over history.
    if let Some(deadline) = app.copy_toast_until {
        if deadline > Instant::now() {
            let toast_text = " Copied! ";
            let toast_width = toast_text.len() as u16 + 2;
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(toast_width).saturating_sub(1),
                y: area.y + HEADER_HEIGHT,
                width: toast_width.min(area.width),
                height: 3u16.min(area.height),
            };
            f.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent));
            let para = Paragraph::new(Line::from(toast_text))
                .block(block)
                .style(Style::default().fg(palette.accent));
            f.render_widget(para, toast_area);
        } else {
            app.copy_toast_until = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::menu::UserProfile;
    use crate::core::presentation::PresentationMode;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::new(
            UserProfile::new(Some("ada@example.com".into())),
            PresentationMode::Dark,
        )
    }

    #[test]
    fn renders_greeting_sidebar_and_avatar() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("Chat App"));
        assert!(screen.contains("Hello! How can I help you today?"));
        assert!(screen.contains("New Chat"));
        assert!(screen.contains("[A]"));
        assert!(screen.contains("Type your message..."));
    }

    #[test]
    fn awaiting_disables_input() {
        let mut app = app();
        app.input = "hi".into();
        app.submit().unwrap();
        let screen = render(&mut app);
        assert!(screen.contains("AI is thinking..."));
    }

    #[test]
    fn profile_menu_lists_items() {
        let mut app = app();
        app.menu.toggle();
        let screen = render(&mut app);
        assert!(screen.contains("ada@example.com"));
        assert!(screen.contains("Profile"));
        assert!(screen.contains("Sign out"));
    }

    #[test]
    fn closed_sidebar_hides_thread_list() {
        let mut app = app();
        app.sidebar_open = false;
        let screen = render(&mut app);
        assert!(!screen.contains("Ctrl+N)"));
    }
}
