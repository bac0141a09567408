//! Light/dark presentation mode shared by the whole process.
//!
//! The mode lives behind a `watch` channel: setters publish, and the rendering layer
//! holds the single receiver obtained from [`Presentation::subscribe`].

use std::str::FromStr;
use std::sync::OnceLock;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    Light,
    #[default]
    Dark,
}

impl PresentationMode {
    pub fn toggled(self) -> Self {
        match self {
            PresentationMode::Light => PresentationMode::Dark,
            PresentationMode::Dark => PresentationMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresentationMode::Light => "light",
            PresentationMode::Dark => "dark",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown presentation mode {0:?} (expected \"light\" or \"dark\")")]
pub struct ParseModeError(String);

impl FromStr for PresentationMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(PresentationMode::Light),
            "dark" => Ok(PresentationMode::Dark),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Holder of the current mode.
#[derive(Debug)]
pub struct Presentation {
    tx: watch::Sender<PresentationMode>,
}

impl Presentation {
    pub fn new(mode: PresentationMode) -> Self {
        let (tx, _rx) = watch::channel(mode);
        Self { tx }
    }

    pub fn get(&self) -> PresentationMode {
        *self.tx.borrow()
    }

    /// Set the mode. Subscribers are notified only when it actually changes.
    pub fn set(&self, mode: PresentationMode) {
        self.tx.send_if_modified(|current| {
            if *current == mode {
                false
            } else {
                log::debug!("presentation mode -> {}", mode.as_str());
                *current = mode;
                true
            }
        });
    }

    /// Flip between light and dark; returns the new mode.
    pub fn toggle(&self) -> PresentationMode {
        let next = self.get().toggled();
        self.set(next);
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<PresentationMode> {
        self.tx.subscribe()
    }
}

static GLOBAL: OnceLock<Presentation> = OnceLock::new();

/// Process-wide presentation, created with `initial` on first use.
/// Later calls ignore `initial`.
pub fn init(initial: PresentationMode) -> &'static Presentation {
    GLOBAL.get_or_init(|| Presentation::new(initial))
}

/// Process-wide presentation (dark until [`init`] says otherwise).
pub fn global() -> &'static Presentation {
    init(PresentationMode::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_case_insensitive() {
        assert_eq!(
            "Light".parse::<PresentationMode>().unwrap(),
            PresentationMode::Light
        );
        assert_eq!(
            " dark ".parse::<PresentationMode>().unwrap(),
            PresentationMode::Dark
        );
        assert!("sepia".parse::<PresentationMode>().is_err());
    }

    #[test]
    fn toggle_flips_mode() {
        let p = Presentation::new(PresentationMode::Dark);
        assert_eq!(p.toggle(), PresentationMode::Light);
        assert_eq!(p.get(), PresentationMode::Light);
        assert_eq!(p.toggle(), PresentationMode::Dark);
    }

    #[test]
    fn subscriber_sees_changes() {
        let p = Presentation::new(PresentationMode::Dark);
        let mut rx = p.subscribe();
        assert!(!rx.has_changed().unwrap());
        p.set(PresentationMode::Light);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), PresentationMode::Light);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn setting_same_mode_does_not_notify() {
        let p = Presentation::new(PresentationMode::Light);
        let rx = p.subscribe();
        p.set(PresentationMode::Light);
        assert!(!rx.has_changed().unwrap());
    }
}
