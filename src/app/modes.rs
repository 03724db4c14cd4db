//! Input mode and status line types.
//!
//! The application is in one of two input modes:
//! - **Browse**: navigate the event list, delete, refresh, open the form
//! - **Compose**: type into the new-event form
//!
//! The status line carries the outcome of the most recent operation. Failures
//! that the API client reports end up here instead of being swallowed.

/// Current input handling mode.
///
/// Controls which keybindings are active and whether the form is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default list navigation mode.
    ///
    /// Available keybindings: j/k (navigate), n (new event), d (delete),
    /// r (refresh), Esc (dismiss status), q (quit).
    Browse,

    /// New-event form is open and receives typed characters.
    ///
    /// Available keybindings: Tab/Shift+Tab (switch field), Enter (submit),
    /// Esc (back to the list, keeping what was typed).
    Compose,
}

/// Severity of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One-line message shown above the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, StatusKind::Error)
    }
}
