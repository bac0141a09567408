//! TUI (Text User Interface) for chatting through the relay server.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod syntax;
mod text;

pub use app::App;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::config::ClientConfig;
use crate::core::menu::UserProfile;
use crate::core::presentation;
use crate::core::relay_client::RelayClient;

use draw::draw;
use handlers::{HandleResult, PendingReply};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for the relay requests.
pub fn run(config: ClientConfig) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    execute!(stdout, crossterm::event::EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );
    let client = Arc::new(RelayClient::new(&config.api_url));
    log::info!("chat client using {}", client.chat_url());

    let mut mode_rx = presentation::global().subscribe();
    let mut app = App::new(UserProfile::new(config.user_email), *mode_rx.borrow_and_update());
    let mut pending: Option<PendingReply> = None;

    loop {
        if let Some(ref reply) = pending
            && let Some(result) = reply.poll()
        {
            app.receive_reply(reply.thread, result);
            pending = None;
        }

        if mode_rx.has_changed().unwrap_or(false) {
            app.mode = *mode_rx.borrow_and_update();
        }

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Mouse(mouse) => handlers::handle_mouse(mouse, &mut app),
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        handlers::HandleKeyContext {
                            app: &mut app,
                            client: &client,
                            pending: &mut pending,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    terminal.show_cursor()?;
    Ok(())
}
