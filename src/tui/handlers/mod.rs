//! Event handlers for the TUI: keyboard and mouse.

mod chat_spawn;
mod menu;

use std::sync::Arc;
use std::sync::mpsc;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use tokio::runtime::Runtime;

use crate::core::presentation;
use crate::core::relay_client::{ClientError, RelayClient};
use crate::core::thread::ThreadId;

use super::app::App;
use super::constants;
use super::shortcuts::Shortcut;

pub use chat_spawn::spawn_reply;

/// Receiver for the reply to a message sent from `thread`.
pub struct PendingReply {
    pub thread: ThreadId,
    pub result_rx: mpsc::Receiver<Result<String, ClientError>>,
}

impl PendingReply {
    /// Outcome of the request if it has finished. A worker that went away
    /// without answering counts as a failed request.
    pub fn poll(&self) -> Option<Result<String, ClientError>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(ClientError::Interrupted)),
        }
    }
}

/// Result of handling an event: continue the loop or exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub client: &'a Arc<RelayClient>,
    pub pending: &'a mut Option<PendingReply>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a mouse event (wheel scrolls the history).
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.scroll_up(constants::SCROLL_LINES_SMALL),
        MouseEventKind::ScrollDown => app.scroll_down(constants::SCROLL_LINES_SMALL),
        _ => {}
    }
}

fn copy_last_code_block(app: &mut App) {
    let Some(code) = app.last_code_block().map(str::to_string) else {
        app.notice = Some("No code block in this chat".to_string());
        return;
    };
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(code)) {
        Ok(()) => {
            app.notice = None;
            app.show_copy_toast();
        }
        Err(e) => {
            log::warn!("clipboard unavailable: {}", e);
            app.notice = Some(format!("Copy failed: {}", e));
        }
    }
}

fn handle_shortcut(shortcut: Shortcut, app: &mut App) -> HandleResult {
    match shortcut {
        Shortcut::Quit => return HandleResult::Break,
        Shortcut::NewThread => app.new_thread(),
        Shortcut::NextThread => app.select_relative(1),
        Shortcut::PreviousThread => app.select_relative(-1),
        Shortcut::ToggleSidebar => app.sidebar_open = !app.sidebar_open,
        // The main loop picks the new mode up from its subscription.
        Shortcut::ToggleTheme => {
            presentation::global().toggle();
        }
        Shortcut::ProfileMenu => app.menu.toggle(),
        Shortcut::CopyCode => copy_last_code_block(app),
    }
    HandleResult::Continue
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        client,
        pending,
        rt,
    } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if let Some(shortcut) = Shortcut::match_key(&key) {
        // Tab cycles the menu highlight while the menu is open.
        let menu_tab = app.menu_is_open()
            && matches!(shortcut, Shortcut::NextThread | Shortcut::PreviousThread);
        if !menu_tab {
            return handle_shortcut(shortcut, app);
        }
    }

    if app.menu_is_open() {
        return menu::handle_menu_key(key.code, app);
    }

    app.notice = None;
    match key.code {
        KeyCode::Enter => {
            if let Some((thread, text)) = app.submit() {
                *pending = Some(spawn_reply(rt, Arc::clone(client), thread, text));
            }
        }
        KeyCode::Up => app.scroll_up(constants::SCROLL_LINES_SMALL),
        KeyCode::Down => app.scroll_down(constants::SCROLL_LINES_SMALL),
        KeyCode::PageUp => app.scroll_up(constants::SCROLL_LINES_PAGE),
        KeyCode::PageDown => app.scroll_down(constants::SCROLL_LINES_PAGE),
        // Input is disabled while a reply is awaited.
        _ if app.is_awaiting() => {}
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.input.push(c);
        }
        _ => {}
    }
    HandleResult::Continue
}
