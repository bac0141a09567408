//! TUI application state: chat threads, input, scroll, sidebar, profile menu.

use std::time::{Duration, Instant};

use chrono::Utc;

use crate::core::menu::{Dropdown, ProfileMenu, UserProfile};
use crate::core::presentation::PresentationMode;
use crate::core::relay_client::ClientError;
use crate::core::segment;
use crate::core::thread::{Action, ChatState, Message, ThreadId};

use super::constants::{self, Palette};

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollPosition {
    Line(usize),
    #[default]
    Bottom,
}

pub struct App {
    pub(crate) chat: ChatState,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    pub(crate) sidebar_open: bool,
    pub(crate) menu: ProfileMenu,
    pub(crate) user: UserProfile,
    /// Last mode received from the presentation channel.
    pub(crate) mode: PresentationMode,
    /// When set, show "Copied!" toast until this instant.
    pub(crate) copy_toast_until: Option<Instant>,
    /// One-line notice in the bottom bar (profile info, copy failures).
    pub(crate) notice: Option<String>,
    /// Start of the current wait; drives the typing indicator animation.
    pub(crate) awaiting_since: Option<Instant>,
}

impl App {
    pub fn new(user: UserProfile, mode: PresentationMode) -> Self {
        Self {
            chat: ChatState::new(),
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            sidebar_open: true,
            menu: ProfileMenu::new(),
            user,
            mode,
            copy_toast_until: None,
            notice: None,
            awaiting_since: None,
        }
    }

    pub(crate) fn palette(&self) -> Palette {
        constants::palette(self.mode)
    }

    fn dispatch(&mut self, action: Action) {
        let state = std::mem::replace(&mut self.chat, ChatState::empty());
        self.chat = state.apply(action);
    }

    /// Messages of the current thread (empty when there is none).
    pub(crate) fn current_messages(&self) -> &[Message] {
        self.chat
            .current()
            .map(|t| t.messages.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn is_awaiting(&self) -> bool {
        self.chat.is_awaiting()
    }

    pub(crate) fn menu_is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub(crate) fn new_thread(&mut self) {
        self.dispatch(Action::CreateThread {
            id: ThreadId::generate(),
            at: Utc::now(),
        });
        self.scroll = ScrollPosition::Bottom;
    }

    /// Select the thread `delta` positions away from the current one, wrapping around.
    pub(crate) fn select_relative(&mut self, delta: isize) {
        let threads = self.chat.threads();
        if threads.is_empty() {
            return;
        }
        let len = threads.len() as isize;
        let current = self.chat.current_index().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        let id = threads[next].id;
        self.dispatch(Action::SelectThread(id));
        self.scroll = ScrollPosition::Bottom;
    }

    /// Move the input into the current thread as a user message.
    /// Returns the thread and text to send, or `None` when nothing was submitted.
    pub(crate) fn submit(&mut self) -> Option<(ThreadId, String)> {
        if self.input.trim().is_empty() || self.chat.is_awaiting() {
            return None;
        }
        let text = std::mem::take(&mut self.input);
        self.dispatch(Action::Submit {
            text: text.clone(),
            at: Utc::now(),
        });
        let thread = self.chat.awaiting()?;
        self.awaiting_since = Some(Instant::now());
        self.scroll = ScrollPosition::Bottom;
        Some((thread, text))
    }

    /// Record the outcome of the request sent from `thread`.
    pub(crate) fn receive_reply(&mut self, thread: ThreadId, result: Result<String, ClientError>) {
        let at = Utc::now();
        match result {
            Ok(text) => self.dispatch(Action::ReplyReceived { thread, text, at }),
            Err(e) => {
                log::warn!("chat request failed: {}", e);
                self.dispatch(Action::ReplyFailed { thread, at });
            }
        }
        self.awaiting_since = None;
        if self.chat.current_id() == Some(thread) {
            self.scroll = ScrollPosition::Bottom;
        }
    }

    /// Code of the most recent code block in the current thread.
    pub(crate) fn last_code_block(&self) -> Option<&str> {
        self.current_messages()
            .iter()
            .rev()
            .find_map(|m| segment::last_code_block(&m.text))
            .map(|block| block.content)
    }

    pub(crate) fn show_copy_toast(&mut self) {
        self.copy_toast_until = Some(Instant::now() + Duration::from_millis(constants::TOAST_MS));
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            let next = (pos + n).min(self.last_max_scroll);
            self.scroll = if next == self.last_max_scroll {
                ScrollPosition::Bottom
            } else {
                ScrollPosition::Line(next)
            };
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::thread::{GREETING, REPLY_UNAVAILABLE, Role};

    fn app() -> App {
        App::new(UserProfile::new(None), PresentationMode::Dark)
    }

    #[test]
    fn starts_with_greeting_thread() {
        let app = app();
        assert_eq!(app.chat.threads().len(), 1);
        assert_eq!(app.current_messages()[0].text, GREETING);
        assert!(!app.is_awaiting());
    }

    #[test]
    fn submit_then_reply() {
        let mut app = app();
        app.input = "hello".into();
        let (thread, text) = app.submit().expect("submitted");
        assert_eq!(text, "hello");
        assert!(app.input.is_empty());
        assert!(app.is_awaiting());
        assert!(app.awaiting_since.is_some());

        app.receive_reply(thread, Ok("hi there".into()));
        let msgs = app.current_messages();
        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[1].role, Role::User);
        assert_eq!(msgs[2].text, "hi there");
        assert!(!app.is_awaiting());
        assert!(app.awaiting_since.is_none());
    }

    #[test]
    fn submit_ignored_while_awaiting_or_blank() {
        let mut app = app();
        app.input = "   ".into();
        assert!(app.submit().is_none());
        assert_eq!(app.input, "   ");

        app.input = "first".into();
        app.submit().unwrap();
        app.input = "second".into();
        assert!(app.submit().is_none());
        assert_eq!(app.input, "second");
    }

    #[test]
    fn failed_reply_shows_fallback() {
        let mut app = app();
        app.input = "hello".into();
        let (thread, _) = app.submit().unwrap();
        app.receive_reply(thread, Err(ClientError::MalformedReply));
        assert_eq!(app.current_messages().last().unwrap().text, REPLY_UNAVAILABLE);
        assert!(!app.is_awaiting());
    }

    #[test]
    fn reply_lands_in_originating_thread() {
        let mut app = app();
        let first = app.chat.current_id().unwrap();
        app.input = "question".into();
        app.submit().unwrap();
        app.new_thread();
        app.receive_reply(first, Ok("answer".into()));
        assert_eq!(app.current_messages().len(), 1);
        let origin = app.chat.thread(first).unwrap();
        assert_eq!(origin.messages.last().unwrap().text, "answer");
    }

    #[test]
    fn select_relative_wraps() {
        let mut app = app();
        let first = app.chat.current_id().unwrap();
        app.new_thread();
        let second = app.chat.current_id().unwrap();
        app.select_relative(1);
        assert_eq!(app.chat.current_id(), Some(first));
        app.select_relative(-1);
        assert_eq!(app.chat.current_id(), Some(second));
    }

    #[test]
    fn last_code_block_searches_newest_first() {
        let mut app = app();
        let thread = app.chat.current_id().unwrap();
        app.input = "q".into();
        app.submit().unwrap();
        app.receive_reply(thread, Ok("```py\nold\n```".into()));
        app.input = "q2".into();
        app.submit().unwrap();
        app.receive_reply(thread, Ok("```rs\nnew\n```\nno more code".into()));
        assert_eq!(app.last_code_block(), Some("new"));
    }

    #[test]
    fn last_code_block_none_without_code() {
        assert_eq!(app().last_code_block(), None);
    }

    #[test]
    fn scroll_down_to_end_follows_bottom() {
        let mut app = app();
        app.last_max_scroll = 10;
        app.scroll_up(4);
        assert_eq!(app.scroll, ScrollPosition::Line(6));
        app.scroll_down(100);
        assert_eq!(app.scroll, ScrollPosition::Bottom);
        assert_eq!(app.scroll_line(), 10);
    }
}
