//! Popups: profile dropdown menu.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem};

use crate::core::menu::{MenuItem, MenuState};

use super::super::app::App;

const MENU_WIDTH: u16 = 32;

/// Dropdown anchored to the top right, under the avatar.
pub(crate) fn draw_profile_menu(f: &mut Frame, app: &App, area: Rect, header_height: u16) {
    let MenuState::Open { highlighted } = app.menu.state() else {
        return;
    };
    let palette = app.palette();
    let height = MenuItem::ALL.len() as u16 + 4;
    let width = MENU_WIDTH.min(area.width);
    let rect = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y + header_height,
        width,
        height: height.min(area.height.saturating_sub(header_height)),
    };

    let mut items = vec![
        ListItem::new(Line::from(Span::styled(
            app.user.display_name().to_string(),
            Style::default().fg(palette.muted),
        ))),
        ListItem::new(Line::default()),
    ];
    items.extend(MenuItem::ALL.iter().enumerate().map(|(idx, item)| {
        let style = if idx == highlighted {
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.text)
        };
        ListItem::new(Line::from(Span::styled(format!(" {} ", item.label()), style)))
    }));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));
    f.render_widget(Clear, rect);
    f.render_widget(List::new(items).block(block), rect);
}
