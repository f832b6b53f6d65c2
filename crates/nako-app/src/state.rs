//! Observable application state types.
//!
//! [`ConnectionState`] and [`LogLine`] are the view model the shell renders.
//! They carry no transport details beyond what the status bar and chat panel
//! need.

use chrono::NaiveDateTime;

use crate::colour::bold;

/// Clock format of the time token in front of every log line.
pub const TIME_FORMAT: &str = "%H:%M";

/// Broker connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected to the broker.
    Disconnected,
    /// Connection or reconnection in progress.
    Connecting,
    /// Connected and subscribed.
    Connected,
}

/// A rendered chat log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// `HH:MM` time token.
    pub time: String,
    /// Formatted text, possibly containing ANSI escapes.
    pub text: String,
}

impl LogLine {
    /// Line stamped with `time`.
    pub fn at(time: NaiveDateTime, text: impl Into<String>) -> Self {
        Self { time: time.format(TIME_FORMAT).to_string(), text: text.into() }
    }

    /// Display form: bold time token, a space, then the text.
    pub fn render(&self) -> String {
        format!("{} {}", bold(&self.time), self.text)
    }
}
