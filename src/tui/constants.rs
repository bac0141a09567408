//! TUI constants: palettes per presentation mode, timing, layout sizes.

use ratatui::style::Color;

use crate::core::presentation::PresentationMode;

/// Colors used by the renderer for one presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    pub accent: Color,
    pub accent_secondary: Color,
    pub text: Color,
    pub muted: Color,
    pub error: Color,
    /// Name of the syntect theme used for code blocks.
    pub code_theme: &'static str,
}

/// Accent green (#98FB98) on dark backgrounds.
const DARK: Palette = Palette {
    accent: Color::Rgb(152, 251, 152),
    accent_secondary: Color::Rgb(126, 200, 227),
    text: Color::Reset,
    muted: Color::DarkGray,
    error: Color::Red,
    code_theme: "base16-ocean.dark",
};

/// Indigo accents readable on light backgrounds.
const LIGHT: Palette = Palette {
    accent: Color::Rgb(79, 70, 229),
    accent_secondary: Color::Rgb(14, 116, 144),
    text: Color::Black,
    muted: Color::Gray,
    error: Color::Rgb(185, 28, 28),
    code_theme: "base16-ocean.light",
};

pub(crate) fn palette(mode: PresentationMode) -> Palette {
    match mode {
        PresentationMode::Dark => DARK,
        PresentationMode::Light => LIGHT,
    }
}

/// Window title, shown in the header.
pub(crate) const APP_TITLE: &str = crate::core::app::TITLE;

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Sidebar width when open.
pub(crate) const SIDEBAR_WIDTH: u16 = 28;

/// How long the "Copied!" toast stays visible.
pub(crate) const TOAST_MS: u64 = 1500;

/// Dots of the typing indicator, cycled while a reply is awaited.
pub(crate) const TYPING_FRAMES: &[&str] = &["●  ", "●● ", "●●●"];
