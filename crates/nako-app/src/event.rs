//! Application input events.
//!
//! This module defines [`AppEvent`], the set of inputs that drive the
//! [`crate::App`] state machine.
//!
//! Events originate from two sources:
//! - User interactions (keyboard, resize) and periodic ticks from the shell.
//! - Log lines and connection changes produced by the [`crate::Router`].

use crate::{ConnectionState, KeyInput, LogLine};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Broker connection state changed.
    Connection(ConnectionState),

    /// A line to append to the chat log.
    Line(LogLine),
}
