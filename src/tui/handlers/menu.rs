//! Keys while the profile menu is open.

use crossterm::event::KeyCode;

use crate::core::menu::{Dropdown, MenuItem};

use super::super::app::App;
use super::HandleResult;

pub(super) fn handle_menu_key(code: KeyCode, app: &mut App) -> HandleResult {
    match code {
        KeyCode::Esc => app.menu.close(),
        KeyCode::Up | KeyCode::BackTab => app.menu.highlight_previous(),
        KeyCode::Down | KeyCode::Tab => app.menu.highlight_next(),
        KeyCode::Enter => match app.menu.activate() {
            Some(MenuItem::Profile) => {
                app.notice = Some(format!("Signed in as {}", app.user.display_name()));
            }
            Some(MenuItem::SignOut) => {
                log::info!("signed out");
                return HandleResult::Break;
            }
            None => {}
        },
        _ => {}
    }
    HandleResult::Continue
}
