//! Centralized keyboard shortcuts.
//!
//! Complete reference:
//!
//! | Action          | Keys                 |
//! |-----------------|----------------------|
//! | Send            | Enter                |
//! | Scroll          | ↑ ↓ PageUp PageDown  |
//! | New chat        | Ctrl+N               |
//! | Next/prev chat  | Tab / Shift+Tab      |
//! | Sidebar         | Ctrl+B               |
//! | Light/dark      | Ctrl+T               |
//! | Profile menu    | Ctrl+P               |
//! | Copy code block | Ctrl+Y               |
//! | Quit            | Ctrl+C               |
//!
//! While the profile menu is open, ↑ ↓ move the highlight, Enter selects and Esc closes.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewThread,
    NextThread,
    PreviousThread,
    ToggleSidebar,
    ToggleTheme,
    ProfileMenu,
    /// Copy the last code block of the current chat.
    CopyCode,
    Quit,
}

impl Shortcut {
    /// Returns the shortcut if the key matches.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => Some(Shortcut::Quit),
            KeyCode::Char('n') if ctrl => Some(Shortcut::NewThread),
            KeyCode::Char('b') if ctrl => Some(Shortcut::ToggleSidebar),
            KeyCode::Char('t') if ctrl => Some(Shortcut::ToggleTheme),
            KeyCode::Char('p') if ctrl => Some(Shortcut::ProfileMenu),
            KeyCode::Char('y') if ctrl => Some(Shortcut::CopyCode),
            KeyCode::BackTab => Some(Shortcut::PreviousThread),
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Some(Shortcut::PreviousThread)
            }
            KeyCode::Tab => Some(Shortcut::NextThread),
            _ => None,
        }
    }
}


/// Labels for the bottom bar.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span};

    const DIM: Color = Color::DarkGray;

    pub fn bottom_bar(awaiting: bool) -> Line<'static> {
        let mut spans = if awaiting {
            vec![Span::styled("waiting for reply ", Color::Yellow)]
        } else {
            vec![Span::styled("Enter ", DIM), Span::raw("send")]
        };
        spans.extend([
            Span::styled("  Ctrl+N ", DIM),
            Span::raw("new"),
            Span::styled("  Tab ", DIM),
            Span::raw("switch"),
            Span::styled("  Ctrl+B ", DIM),
            Span::raw("sidebar"),
            Span::styled("  Ctrl+T ", DIM),
            Span::raw("theme"),
            Span::styled("  Ctrl+Y ", DIM),
            Span::raw("copy code"),
            Span::styled("  Ctrl+P ", DIM),
            Span::raw("profile"),
            Span::styled("  Ctrl+C ", DIM),
            Span::raw("quit"),
        ]);
        Line::from(spans)
    }
}
