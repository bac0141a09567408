//! Chat threads: a state container updated through pure transitions.
//!
//! Every change to the client's conversations goes through [`ChatState::apply`],
//! which consumes the old state and returns the new one.

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

/// Title shown for a freshly created thread.
pub const NEW_THREAD_TITLE: &str = "New Chat";

/// First assistant message in every new thread.
pub const GREETING: &str = "Hello! How can I help you today?";

/// Assistant message appended when a reply could not be obtained.
pub const REPLY_UNAVAILABLE: &str = "Sorry, I encountered an error while processing your request.";

/// Identifier of a chat thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadId(Uuid);

impl ThreadId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ThreadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            role: Role::User,
            timestamp: at,
        }
    }

    pub fn assistant(text: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            role: Role::Assistant,
            timestamp: at,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread {
    pub id: ThreadId,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Thread {
    fn new(id: ThreadId, at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: NEW_THREAD_TITLE.to_string(),
            messages: vec![Message::assistant(GREETING, at)],
        }
    }
}

/// Transitions accepted by [`ChatState::apply`].
#[derive(Debug, Clone)]
pub enum Action {
    /// Add a thread and make it current.
    CreateThread { id: ThreadId, at: DateTime<Utc> },
    /// Make an existing thread current.
    SelectThread(ThreadId),
    /// Append a message to a thread.
    AppendMessage { thread: ThreadId, message: Message },
    /// User sent `text` from the current thread; a reply is now awaited.
    Submit { text: String, at: DateTime<Utc> },
    /// Reply arrived for the thread that sent the request.
    ReplyReceived {
        thread: ThreadId,
        text: String,
        at: DateTime<Utc>,
    },
    /// The request for `thread` failed.
    ReplyFailed { thread: ThreadId, at: DateTime<Utc> },
}

/// All chat threads of the client plus selection and in-flight tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatState {
    threads: Vec<Thread>,
    current: Option<ThreadId>,
    awaiting: Option<ThreadId>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// State with one fresh thread selected.
    pub fn new() -> Self {
        Self::empty().apply(Action::CreateThread {
            id: ThreadId::generate(),
            at: Utc::now(),
        })
    }

    /// State with no threads at all.
    pub fn empty() -> Self {
        Self {
            threads: Vec::new(),
            current: None,
            awaiting: None,
        }
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn thread(&self, id: ThreadId) -> Option<&Thread> {
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn current_id(&self) -> Option<ThreadId> {
        self.current
    }

    pub fn current(&self) -> Option<&Thread> {
        self.current.and_then(|id| self.thread(id))
    }

    /// Thread whose request is in flight, if any.
    pub fn awaiting(&self) -> Option<ThreadId> {
        self.awaiting
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Position of the current thread in [`threads`](Self::threads).
    pub fn current_index(&self) -> Option<usize> {
        let id = self.current?;
        self.threads.iter().position(|t| t.id == id)
    }

    /// Apply one transition and return the resulting state.
    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::CreateThread { id, at } => {
                if self.thread(id).is_some() {
                    log::debug!("thread {} already exists", id);
                    return self;
                }
                self.threads.push(Thread::new(id, at));
                self.current = Some(id);
            }
            Action::SelectThread(id) => {
                if self.thread(id).is_some() {
                    self.current = Some(id);
                } else {
                    log::debug!("select ignored: no thread {}", id);
                }
            }
            Action::AppendMessage { thread, message } => {
                match self.threads.iter_mut().find(|t| t.id == thread) {
                    Some(t) => t.messages.push(message),
                    None => log::debug!("append ignored: no thread {}", thread),
                }
            }
            Action::Submit { text, at } => {
                if text.trim().is_empty() || self.awaiting.is_some() {
                    return self;
                }
                let Some(id) = self.current.filter(|id| self.thread(*id).is_some()) else {
                    return self;
                };
                self = self.apply(Action::AppendMessage {
                    thread: id,
                    message: Message::user(text, at),
                });
                self.awaiting = Some(id);
            }
            Action::ReplyReceived { thread, text, at } => {
                self = self.apply(Action::AppendMessage {
                    thread,
                    message: Message::assistant(text, at),
                });
                self.clear_awaiting(thread);
            }
            Action::ReplyFailed { thread, at } => {
                self = self.apply(Action::AppendMessage {
                    thread,
                    message: Message::assistant(REPLY_UNAVAILABLE, at),
                });
                self.clear_awaiting(thread);
            }
        }
        self
    }

    fn clear_awaiting(&mut self, id: ThreadId) {
        if self.awaiting == Some(id) {
            self.awaiting = None;
        }
    }
}

/// Render a message time as local `HH:MM`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn new_state_has_one_greeted_thread() {
        let state = ChatState::new();
        assert_eq!(state.threads().len(), 1);
        let thread = state.current().unwrap();
        assert_eq!(thread.title, NEW_THREAD_TITLE);
        assert_eq!(thread.messages.len(), 1);
        assert_eq!(thread.messages[0].text, GREETING);
        assert_eq!(thread.messages[0].role, Role::Assistant);
    }

    #[test]
    fn create_thread_appends_and_selects() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        let state = ChatState::empty()
            .apply(Action::CreateThread { id: a, at: at(0) })
            .apply(Action::CreateThread { id: b, at: at(1) });
        assert_eq!(state.threads().len(), 2);
        assert_eq!(state.threads()[0].id, a);
        assert_eq!(state.current_id(), Some(b));
        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn create_thread_with_existing_id_is_ignored() {
        let a = ThreadId::generate();
        let once = ChatState::empty().apply(Action::CreateThread { id: a, at: at(0) });
        let twice = once.clone().apply(Action::CreateThread { id: a, at: at(5) });
        assert_eq!(once, twice);
    }

    #[test]
    fn select_thread_switches_current() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        let state = ChatState::empty()
            .apply(Action::CreateThread { id: a, at: at(0) })
            .apply(Action::CreateThread { id: b, at: at(0) })
            .apply(Action::SelectThread(a));
        assert_eq!(state.current_id(), Some(a));
    }

    #[test]
    fn select_unknown_thread_is_noop() {
        let state = ChatState::new();
        let before = state.current_id();
        let state = state.apply(Action::SelectThread(ThreadId::generate()));
        assert_eq!(state.current_id(), before);
    }

    #[test]
    fn append_message_targets_named_thread() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        let state = ChatState::empty()
            .apply(Action::CreateThread { id: a, at: at(0) })
            .apply(Action::CreateThread { id: b, at: at(0) })
            .apply(Action::AppendMessage {
                thread: a,
                message: Message::user("hi", at(2)),
            });
        assert_eq!(state.thread(a).unwrap().messages.len(), 2);
        assert_eq!(state.thread(b).unwrap().messages.len(), 1);
    }

    #[test]
    fn reply_for_unknown_thread_changes_nothing() {
        let state = ChatState::new().apply(Action::Submit {
            text: "hi".into(),
            at: at(0),
        });
        let after = state.clone().apply(Action::ReplyReceived {
            thread: ThreadId::generate(),
            text: "stray".into(),
            at: at(1),
        });
        assert_eq!(state, after);
        assert!(after.is_awaiting());
    }

    #[test]
    fn submit_appends_user_message_and_awaits() {
        let state = ChatState::new().apply(Action::Submit {
            text: "What is Rust?".into(),
            at: at(3),
        });
        let id = state.current_id().unwrap();
        assert_eq!(state.awaiting(), Some(id));
        let last = state.current().unwrap().messages.last().unwrap();
        assert!(last.is_user());
        assert_eq!(last.text, "What is Rust?");
    }

    #[test]
    fn submit_blank_text_is_ignored() {
        let state = ChatState::new();
        let after = state.clone().apply(Action::Submit {
            text: "   \n".into(),
            at: at(0),
        });
        assert_eq!(state, after);
    }

    #[test]
    fn submit_while_awaiting_is_ignored() {
        let state = ChatState::new().apply(Action::Submit {
            text: "first".into(),
            at: at(0),
        });
        let after = state.clone().apply(Action::Submit {
            text: "second".into(),
            at: at(1),
        });
        assert_eq!(state, after);
    }

    #[test]
    fn submit_without_current_thread_is_ignored() {
        let state = ChatState::empty().apply(Action::Submit {
            text: "hello".into(),
            at: at(0),
        });
        assert!(!state.is_awaiting());
        assert!(state.threads().is_empty());
    }

    #[test]
    fn reply_goes_to_sending_thread_after_switch() {
        let a = ThreadId::generate();
        let b = ThreadId::generate();
        let state = ChatState::empty()
            .apply(Action::CreateThread { id: a, at: at(0) })
            .apply(Action::Submit {
                text: "question".into(),
                at: at(1),
            })
            .apply(Action::CreateThread { id: b, at: at(2) })
            .apply(Action::ReplyReceived {
                thread: a,
                text: "answer".into(),
                at: at(3),
            });
        assert!(!state.is_awaiting());
        assert_eq!(state.current_id(), Some(b));
        let thread_a = state.thread(a).unwrap();
        assert_eq!(thread_a.messages.last().unwrap().text, "answer");
        assert_eq!(state.thread(b).unwrap().messages.len(), 1);
    }

    #[test]
    fn reply_failed_appends_fallback() {
        let state = ChatState::new().apply(Action::Submit {
            text: "hi".into(),
            at: at(0),
        });
        let id = state.awaiting().unwrap();
        let state = state.apply(Action::ReplyFailed {
            thread: id,
            at: at(1),
        });
        assert!(!state.is_awaiting());
        let last = state.current().unwrap().messages.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.text, REPLY_UNAVAILABLE);
    }

    #[test]
    fn format_timestamp_is_hours_and_minutes() {
        let s = format_timestamp(at(1_700_000_000));
        assert_eq!(s.len(), 5);
        assert_eq!(s.as_bytes()[2], b':');
    }
}
